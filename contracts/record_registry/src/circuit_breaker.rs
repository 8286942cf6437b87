use crate::errors::{raise, ContractError, ErrorDetail};
use soroban_sdk::{symbol_short, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────

pub fn global_pause_key() -> Symbol {
    symbol_short!("P_GLOB")
}

// ── Core Logistics ───────────────────────────────────────────

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&global_pause_key())
        .unwrap_or(false)
}

/// Rejects state-mutating entry points while the registry is halted.
/// Reads never call this.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(raise(env, ContractError::Paused, ErrorDetail::None));
    }
    Ok(())
}

/// Authorization is the caller's job; this only flips the flag.
pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&global_pause_key(), &paused);
}
