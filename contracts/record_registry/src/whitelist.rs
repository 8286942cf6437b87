//! Per-token whitelists with forward and reverse indexes.
//!
//! * `(token, account) -> WhitelistEntry` marks the pair active.
//! * `token -> Vec<Address>` lists the active accounts of a token.
//! * `account -> Vec<WhitelistedToken>` lists `(token_id, token_name)` pairs
//!   for every token the account is whitelisted on.
//!
//! All three move together: an entry exists iff the account is in the
//! token's list iff the token is in the account's list. Removal uses
//! swap-remove on both lists, so neither keeps insertion order once an
//! element has been removed.

use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::errors::{raise, ContractError, ErrorDetail};
use crate::storage::{self, account_whitelist_key, token_whitelist_key, whitelist_entry_key};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistEntry {
    pub name: String,
    pub added_at: u64,
}

/// Reverse-index element: a token an account is whitelisted on.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistedToken {
    pub token_id: u64,
    pub token_name: String,
}

/// Forward-index view returned to token owners.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistedAddress {
    pub account: Address,
    pub name: String,
    /// Ledger timestamp of the add that made the entry active.
    pub added_at: u64,
}

pub fn entry(env: &Env, token_id: u64, account: &Address) -> Option<WhitelistEntry> {
    env.storage()
        .persistent()
        .get(&whitelist_entry_key(token_id, account))
}

pub fn is_active(env: &Env, token_id: u64, account: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&whitelist_entry_key(token_id, account))
}

pub fn token_accounts(env: &Env, token_id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&token_whitelist_key(token_id))
        .unwrap_or(Vec::new(env))
}

pub fn account_tokens(env: &Env, account: &Address) -> Vec<WhitelistedToken> {
    env.storage()
        .persistent()
        .get(&account_whitelist_key(account))
        .unwrap_or(Vec::new(env))
}

/// Activates `(token_id, account)`. Fails with `AlreadyExists` before any
/// write, so a duplicate leaves every index untouched.
pub fn add(
    env: &Env,
    token_id: u64,
    account: &Address,
    name: String,
    token_name: String,
) -> Result<(), ContractError> {
    if is_active(env, token_id, account) {
        return Err(raise(
            env,
            ContractError::AlreadyExists,
            ErrorDetail::Account(account.clone()),
        ));
    }

    let key = whitelist_entry_key(token_id, account);
    env.storage().persistent().set(
        &key,
        &WhitelistEntry {
            name,
            added_at: env.ledger().timestamp(),
        },
    );
    storage::extend_ttl(env, &key);

    let mut accounts = token_accounts(env, token_id);
    accounts.push_back(account.clone());
    storage::set_list(env, &token_whitelist_key(token_id), &accounts);

    let mut tokens = account_tokens(env, account);
    tokens.push_back(WhitelistedToken {
        token_id,
        token_name,
    });
    storage::set_list(env, &account_whitelist_key(account), &tokens);

    Ok(())
}

pub fn remove(env: &Env, token_id: u64, account: &Address) -> Result<(), ContractError> {
    if !is_active(env, token_id, account) {
        return Err(raise(
            env,
            ContractError::NotFound,
            ErrorDetail::Account(account.clone()),
        ));
    }

    env.storage()
        .persistent()
        .remove(&whitelist_entry_key(token_id, account));

    let mut accounts = token_accounts(env, token_id);
    if let Some(index) = accounts.first_index_of(account.clone()) {
        storage::swap_remove(&mut accounts, index);
    }
    storage::set_list(env, &token_whitelist_key(token_id), &accounts);

    let mut tokens = account_tokens(env, account);
    if let Some(index) = tokens.iter().position(|t| t.token_id == token_id) {
        storage::swap_remove(&mut tokens, index as u32);
    }
    storage::set_list(env, &account_whitelist_key(account), &tokens);

    Ok(())
}

/// Active entries of a token, in forward-list order.
pub fn active_entries(env: &Env, token_id: u64) -> Vec<WhitelistedAddress> {
    let mut out = Vec::new(env);
    for account in token_accounts(env, token_id).iter() {
        if let Some(found) = entry(env, token_id, &account) {
            out.push_back(WhitelistedAddress {
                account,
                name: found.name,
                added_at: found.added_at,
            });
        }
    }
    out
}

pub fn account_token_ids(env: &Env, account: &Address) -> Vec<u64> {
    let mut ids = Vec::new(env);
    for token in account_tokens(env, account).iter() {
        ids.push_back(token.token_id);
    }
    ids
}

pub fn account_token_names(env: &Env, account: &Address) -> Vec<String> {
    let mut names = Vec::new(env);
    for token in account_tokens(env, account).iter() {
        names.push_back(token.token_name);
    }
    names
}
