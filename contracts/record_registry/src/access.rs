//! Authorization decisions.
//!
//! Every gate is an OR over independent predicates. [`evaluate`] reports
//! which predicate let the caller through; it never writes state. Gates
//! that name a token check existence first, so an unknown id is always
//! `NotFound` regardless of who asks.

use soroban_sdk::{contracttype, Address, Env};

use crate::errors::{raise, ContractError, ErrorDetail};
use crate::roles::{self, RoleKind};
use crate::{records, storage, whitelist};

/// Composite gates used by the registry entry points.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Gate {
    /// Holder of the token only.
    TokenOwner(u64),
    /// Holder of the token, or an address whitelisted on it.
    OwnerOrWhitelisted(u64),
    /// Holder, whitelisted address, or any agency or medical provider.
    OwnerWhitelistedOrRole(u64),
    /// The named address itself.
    SelfOnly(Address),
    /// Any registered agency.
    Agency,
    /// The registry owner set at initialization.
    RegistryOwner,
}

/// The predicate that satisfied a gate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessOutcome {
    TokenOwner,
    Whitelisted,
    RoleHolder(RoleKind),
    SelfAccess,
    RegistryOwner,
    Denied,
}

pub fn is_token_owner(owner: &Address, caller: &Address) -> bool {
    owner == caller
}

pub fn is_whitelisted(env: &Env, token_id: u64, caller: &Address) -> bool {
    whitelist::is_active(env, token_id, caller)
}

pub fn is_role_holder(env: &Env, kind: &RoleKind, caller: &Address) -> bool {
    roles::has_role(env, kind, caller)
}

pub fn is_registry_owner(env: &Env, caller: &Address) -> Result<bool, ContractError> {
    let admin: Address = env
        .storage()
        .instance()
        .get(&storage::ADMIN)
        .ok_or(ContractError::NotInitialized)?;
    Ok(admin == *caller)
}

/// Evaluates `gate` for `caller`. Only token existence and a missing admin
/// produce errors; a failed permission check is `Ok(AccessOutcome::Denied)`.
pub fn evaluate(env: &Env, caller: &Address, gate: &Gate) -> Result<AccessOutcome, ContractError> {
    let outcome = match gate {
        Gate::TokenOwner(token_id) => {
            let owner = records::require_owner(env, *token_id)?;
            if is_token_owner(&owner, caller) {
                AccessOutcome::TokenOwner
            } else {
                AccessOutcome::Denied
            }
        }
        Gate::OwnerOrWhitelisted(token_id) => {
            let owner = records::require_owner(env, *token_id)?;
            if is_token_owner(&owner, caller) {
                AccessOutcome::TokenOwner
            } else if is_whitelisted(env, *token_id, caller) {
                AccessOutcome::Whitelisted
            } else {
                AccessOutcome::Denied
            }
        }
        Gate::OwnerWhitelistedOrRole(token_id) => {
            let owner = records::require_owner(env, *token_id)?;
            if is_token_owner(&owner, caller) {
                AccessOutcome::TokenOwner
            } else if is_whitelisted(env, *token_id, caller) {
                AccessOutcome::Whitelisted
            } else if let Some(kind) = roles::has_any_role(env, caller) {
                AccessOutcome::RoleHolder(kind)
            } else {
                AccessOutcome::Denied
            }
        }
        Gate::SelfOnly(subject) => {
            if subject == caller {
                AccessOutcome::SelfAccess
            } else {
                AccessOutcome::Denied
            }
        }
        Gate::Agency => {
            if is_role_holder(env, &RoleKind::Agency, caller) {
                AccessOutcome::RoleHolder(RoleKind::Agency)
            } else {
                AccessOutcome::Denied
            }
        }
        Gate::RegistryOwner => {
            if is_registry_owner(env, caller)? {
                AccessOutcome::RegistryOwner
            } else {
                AccessOutcome::Denied
            }
        }
    };
    Ok(outcome)
}

/// Like [`evaluate`], but a denial becomes `Unauthorized` carrying the caller.
pub fn authorize(env: &Env, caller: &Address, gate: &Gate) -> Result<AccessOutcome, ContractError> {
    match evaluate(env, caller, gate)? {
        AccessOutcome::Denied => Err(raise(
            env,
            ContractError::Unauthorized,
            ErrorDetail::Caller(caller.clone()),
        )),
        outcome => Ok(outcome),
    }
}
