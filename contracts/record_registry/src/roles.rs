//! Global role sets: agencies and medical providers.
//!
//! Each kind keeps `address -> name` plus an insertion-ordered address list
//! for enumeration. An address holds a role iff a non-empty name is stored
//! for it. Removal swap-removes from the list, so enumeration order is only
//! insertion order until the first removal.

use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::errors::{raise, ContractError, ErrorDetail};
use crate::storage::{self, role_key, role_list_key};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RoleKind {
    Agency = 1,
    MedicalProvider = 2,
}

pub const ALL_ROLE_KINDS: [RoleKind; 2] = [RoleKind::Agency, RoleKind::MedicalProvider];

pub fn role_name(env: &Env, kind: &RoleKind, account: &Address) -> Option<String> {
    env.storage()
        .persistent()
        .get::<_, String>(&role_key(kind, account))
        .filter(|name| !name.is_empty())
}

pub fn has_role(env: &Env, kind: &RoleKind, account: &Address) -> bool {
    role_name(env, kind, account).is_some()
}

pub fn has_any_role(env: &Env, account: &Address) -> Option<RoleKind> {
    ALL_ROLE_KINDS
        .iter()
        .find(|kind| has_role(env, kind, account))
        .copied()
}

pub fn members(env: &Env, kind: &RoleKind) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&role_list_key(kind))
        .unwrap_or(Vec::new(env))
}

/// Names in the same order as [`members`].
pub fn member_names(env: &Env, kind: &RoleKind) -> Vec<String> {
    let mut names = Vec::new(env);
    for account in members(env, kind).iter() {
        names.push_back(role_name(env, kind, &account).unwrap_or(String::from_str(env, "")));
    }
    names
}

/// Registers `account` under `kind`. Validation of the address and name is
/// the caller's job; this only guards against duplicates.
pub fn add(env: &Env, kind: &RoleKind, account: &Address, name: &String) -> Result<(), ContractError> {
    if has_role(env, kind, account) {
        return Err(raise(
            env,
            ContractError::AlreadyExists,
            ErrorDetail::Account(account.clone()),
        ));
    }

    let key = role_key(kind, account);
    env.storage().persistent().set(&key, name);
    storage::extend_ttl(env, &key);

    let mut list = members(env, kind);
    list.push_back(account.clone());
    storage::set_list(env, &role_list_key(kind), &list);

    Ok(())
}

pub fn remove(env: &Env, kind: &RoleKind, account: &Address) -> Result<(), ContractError> {
    if !has_role(env, kind, account) {
        return Err(raise(
            env,
            ContractError::NotFound,
            ErrorDetail::Account(account.clone()),
        ));
    }

    env.storage().persistent().remove(&role_key(kind, account));

    let mut list = members(env, kind);
    if let Some(index) = list.first_index_of(account.clone()) {
        storage::swap_remove(&mut list, index);
    }
    storage::set_list(env, &role_list_key(kind), &list);

    Ok(())
}
