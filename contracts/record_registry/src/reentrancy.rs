//! Reentrancy latch for the fee-bearing entry points.
//!
//! The latch lives in instance storage and is held for the whole body of a
//! guarded call, including the token transfers that hand control to the
//! fee token contract. [`non_reentrant`] releases it on every return path;
//! a failed invocation additionally has all its writes rolled back by the
//! host.

use crate::errors::{raise, ContractError, ErrorDetail};
use soroban_sdk::{symbol_short, Env, Symbol};

const LOCKED: Symbol = symbol_short!("LOCKED");

pub fn is_entered(env: &Env) -> bool {
    env.storage().instance().get(&LOCKED).unwrap_or(false)
}

pub fn enter(env: &Env) -> Result<(), ContractError> {
    if is_entered(env) {
        return Err(raise(env, ContractError::ReentrantCall, ErrorDetail::None));
    }
    env.storage().instance().set(&LOCKED, &true);
    Ok(())
}

pub fn leave(env: &Env) {
    env.storage().instance().remove(&LOCKED);
}

/// Runs `body` while holding the latch.
pub fn non_reentrant<T, F>(env: &Env, body: F) -> Result<T, ContractError>
where
    F: FnOnce() -> Result<T, ContractError>,
{
    enter(env)?;
    let result = body();
    leave(env);
    result
}
