use soroban_sdk::{symbol_short, Address, Env, IntoVal, Symbol, TryFromVal, Val, Vec};

use crate::roles::RoleKind;

// ── Instance keys ────────────────────────────────────────────

pub const ADMIN: Symbol = symbol_short!("ADMIN");
pub const INITIALIZED: Symbol = symbol_short!("INIT");
pub const FEE_TOKEN: Symbol = symbol_short!("FEE_TKN");
pub const NEXT_TOKEN_ID: Symbol = symbol_short!("NEXT_ID");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Persistent keys ──────────────────────────────────────────

pub fn owner_key(token_id: u64) -> (Symbol, u64) {
    (symbol_short!("OWNER"), token_id)
}

pub fn balance_key(owner: &Address) -> (Symbol, Address) {
    (symbol_short!("BALANCE"), owner.clone())
}

pub fn metadata_key(token_id: u64) -> (Symbol, u64) {
    (symbol_short!("META"), token_id)
}

pub fn whitelist_entry_key(token_id: u64, account: &Address) -> (Symbol, u64, Address) {
    (symbol_short!("WL"), token_id, account.clone())
}

pub fn token_whitelist_key(token_id: u64) -> (Symbol, u64) {
    (symbol_short!("WL_ADDRS"), token_id)
}

pub fn account_whitelist_key(account: &Address) -> (Symbol, Address) {
    (symbol_short!("WL_TOKENS"), account.clone())
}

pub fn role_key(kind: &RoleKind, account: &Address) -> (Symbol, RoleKind, Address) {
    (symbol_short!("ROLE"), kind.clone(), account.clone())
}

pub fn role_list_key(kind: &RoleKind) -> (Symbol, RoleKind) {
    (symbol_short!("ROLE_LST"), kind.clone())
}

// ── TTL ──────────────────────────────────────────────────────

/// Extends the time-to-live (TTL) for a persistent storage key.
/// Every record, whitelist and role key goes through here after a write.
pub fn extend_ttl<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for instance storage.
/// Instance storage TTL applies to all keys in the instance storage.
pub fn extend_ttl_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Helpers ──────────────────────────────────────────────────

/// Writes a list under `key`, dropping the key entirely once the list is empty.
pub fn set_list<K, T>(env: &Env, key: &K, list: &Vec<T>)
where
    K: IntoVal<Env, Val>,
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    if list.is_empty() {
        env.storage().persistent().remove(key);
    } else {
        env.storage().persistent().set(key, list);
        extend_ttl(env, key);
    }
}

/// Removes the element at `index` by moving the last element into its slot.
/// Order is not preserved.
pub fn swap_remove<T>(list: &mut Vec<T>, index: u32)
where
    T: IntoVal<Env, Val> + TryFromVal<Env, Val>,
{
    let len = list.len();
    if index >= len {
        return;
    }
    let last = len - 1;
    if index != last {
        if let Some(tail) = list.get(last) {
            list.set(index, tail);
        }
    }
    list.pop_back();
}
