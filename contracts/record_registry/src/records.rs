use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::errors::{raise, ContractError, ErrorDetail};
use crate::storage::{self, balance_key, metadata_key, owner_key, NEXT_TOKEN_ID};

/// Metadata bound to a record token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordMetadata {
    /// Opaque content-store locator of the encrypted record.
    pub locator: String,
    pub display_name: String,
    /// Symmetric key material, already encrypted for its holders.
    pub key_material: String,
    pub created_at: u64,
    pub last_modified_at: u64,
}

pub fn next_token_id(env: &Env) -> u64 {
    env.storage().instance().get(&NEXT_TOKEN_ID).unwrap_or(0)
}

pub fn owner_of(env: &Env, token_id: u64) -> Option<Address> {
    if token_id >= next_token_id(env) {
        return None;
    }
    env.storage().persistent().get(&owner_key(token_id))
}

/// Returns the owner, or `NotFound` for an id that was never minted.
pub fn require_owner(env: &Env, token_id: u64) -> Result<Address, ContractError> {
    owner_of(env, token_id)
        .ok_or_else(|| raise(env, ContractError::NotFound, ErrorDetail::Token(token_id)))
}

pub fn balance_of(env: &Env, owner: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&balance_key(owner))
        .unwrap_or(0)
}

fn set_balance(env: &Env, owner: &Address, balance: u64) {
    let key = balance_key(owner);
    if balance == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &balance);
        storage::extend_ttl(env, &key);
    }
}

fn set_owner(env: &Env, token_id: u64, owner: &Address) {
    let key = owner_key(token_id);
    env.storage().persistent().set(&key, owner);
    storage::extend_ttl(env, &key);
}

fn set_metadata(env: &Env, token_id: u64, metadata: &RecordMetadata) {
    let key = metadata_key(token_id);
    env.storage().persistent().set(&key, metadata);
    storage::extend_ttl(env, &key);
}

pub fn metadata(env: &Env, token_id: u64) -> Result<RecordMetadata, ContractError> {
    env.storage()
        .persistent()
        .get(&metadata_key(token_id))
        .ok_or_else(|| raise(env, ContractError::NotFound, ErrorDetail::Token(token_id)))
}

/// Allocates the next id, records `owner` as its holder and stores the
/// metadata with both timestamps set to now.
pub fn create(
    env: &Env,
    owner: &Address,
    locator: String,
    display_name: String,
    key_material: String,
) -> u64 {
    let token_id = next_token_id(env);
    let now = env.ledger().timestamp();

    set_owner(env, token_id, owner);
    set_balance(env, owner, balance_of(env, owner).saturating_add(1));
    set_metadata(
        env,
        token_id,
        &RecordMetadata {
            locator,
            display_name,
            key_material,
            created_at: now,
            last_modified_at: now,
        },
    );

    env.storage()
        .instance()
        .set(&NEXT_TOKEN_ID, &token_id.saturating_add(1));
    storage::extend_ttl_instance(env);

    token_id
}

/// Overwrites the three string fields, keeping `created_at`.
pub fn update(
    env: &Env,
    token_id: u64,
    locator: String,
    display_name: String,
    key_material: String,
) -> Result<(), ContractError> {
    let mut record = metadata(env, token_id)?;
    record.locator = locator;
    record.display_name = display_name;
    record.key_material = key_material;
    record.last_modified_at = env.ledger().timestamp();
    set_metadata(env, token_id, &record);
    Ok(())
}

pub fn transfer(env: &Env, token_id: u64, from: &Address, to: &Address) {
    set_owner(env, token_id, to);
    set_balance(env, from, balance_of(env, from).saturating_sub(1));
    set_balance(env, to, balance_of(env, to).saturating_add(1));
}

/// Display names for ids in `[start, end)`, in id order.
pub fn display_names(env: &Env, start: u64, end: u64) -> Result<Vec<String>, ContractError> {
    let mut names = Vec::new(env);
    for token_id in start..end {
        names.push_back(metadata(env, token_id)?.display_name);
    }
    Ok(names)
}

pub fn token_ids(env: &Env, start: u64, end: u64) -> Vec<u64> {
    let mut ids = Vec::new(env);
    for token_id in start..end {
        ids.push_back(token_id);
    }
    ids
}
