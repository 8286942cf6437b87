use crate::errors::ErrorContext;
use crate::roles::RoleKind;
use soroban_sdk::{symbol_short, Address, Env, IntoVal, String};

/// Event published when the registry is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub fee_token: Address,
    pub timestamp: u64,
}

/// Event published when a record token is minted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintedEvent {
    pub owner: Address,
    pub token_id: u64,
    pub display_name: String,
    pub timestamp: u64,
}

/// Event published when a token's metadata is overwritten.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetadataUpdatedEvent {
    pub token_id: u64,
    pub editor: Address,
    pub timestamp: u64,
}

/// Event published when token ownership moves.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub token_id: u64,
    pub timestamp: u64,
}

/// Event published when an address is whitelisted for a token.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistedEvent {
    pub token_id: u64,
    pub account: Address,
    pub name: String,
    pub timestamp: u64,
}

/// Event published when an address is removed from a token's whitelist.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistRemovedEvent {
    pub token_id: u64,
    pub account: Address,
    pub timestamp: u64,
}

/// Event published when an agency or medical provider is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleAddedEvent {
    pub kind: RoleKind,
    pub account: Address,
    pub name: String,
    pub timestamp: u64,
}

/// Event published when an agency or medical provider is removed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRemovedEvent {
    pub kind: RoleKind,
    pub account: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEvent {
    pub caller: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferredEvent {
    pub previous: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Event published when the pooled fee balance is swept to the admin.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub admin: Address,
    pub amount: i128,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, fee_token: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        fee_token,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a token is minted.
/// Topics carry the owner so indexers can follow a holder's tokens.
pub fn publish_minted(env: &Env, owner: Address, token_id: u64, display_name: String) {
    let topics = (symbol_short!("MINTED"), owner.clone());
    let data = MintedEvent {
        owner,
        token_id,
        display_name,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_metadata_updated(env: &Env, token_id: u64, editor: Address) {
    let topics = (symbol_short!("UPDATED"), token_id);
    let data = MetadataUpdatedEvent {
        token_id,
        editor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_transfer(env: &Env, from: Address, to: Address, token_id: u64) {
    let topics = (symbol_short!("TRANSFER"), from.clone(), to.clone());
    let data = TransferEvent {
        from,
        to,
        token_id,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when an address is whitelisted.
/// This event includes the token, the whitelisted address, its name and timestamp.
pub fn publish_whitelisted(env: &Env, token_id: u64, account: Address, name: String) {
    let topics = (symbol_short!("WL_ADD"), token_id, account.clone());
    let data = WhitelistedEvent {
        token_id,
        account,
        name,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_whitelist_removed(env: &Env, token_id: u64, account: Address) {
    let topics = (symbol_short!("WL_REM"), token_id, account.clone());
    let data = WhitelistRemovedEvent {
        token_id,
        account,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_role_added(env: &Env, kind: RoleKind, account: Address, name: String) {
    let topics = (symbol_short!("ROLE_ADD"), kind.clone(), account.clone());
    let data = RoleAddedEvent {
        kind,
        account,
        name,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_role_removed(env: &Env, kind: RoleKind, account: Address) {
    let topics = (symbol_short!("ROLE_REM"), kind.clone(), account.clone());
    let data = RoleRemovedEvent {
        kind,
        account,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_paused(env: &Env, caller: Address) {
    let topics = (symbol_short!("PAUSED"),);
    let data = PauseEvent {
        caller,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_unpaused(env: &Env, caller: Address) {
    let topics = (symbol_short!("UNPAUSED"),);
    let data = PauseEvent {
        caller,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_admin_transferred(env: &Env, previous: Address, new_admin: Address) {
    let topics = (symbol_short!("ADMIN"), new_admin.clone());
    let data = AdminTransferredEvent {
        previous,
        new_admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_withdraw(env: &Env, admin: Address, amount: i128) {
    let topics = (symbol_short!("WITHDRAW"), admin.clone());
    let data = WithdrawEvent {
        admin,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Records a failure as a diagnostic `log` event carrying the error code and
/// its [`ErrorContext`]. Contract events of a failed invocation are dropped
/// by the host; diagnostic events are kept and come back with the
/// simulation or transaction result.
pub fn log_error(env: &Env, error_code: u32, context: ErrorContext) {
    env.logs().add(
        "contract error",
        &[error_code.into_val(env), context.into_val(env)],
    );
}
