#![no_std]

pub mod access;
pub mod circuit_breaker;
pub mod errors;
pub mod events;
pub mod records;
pub mod reentrancy;
pub mod roles;
pub mod storage;
pub mod treasury;
pub mod validation;
pub mod whitelist;

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Vec};

pub use access::{AccessOutcome, Gate};
pub use errors::{ContractError, ErrorCategory, ErrorContext, ErrorDetail, ErrorSeverity};
pub use records::RecordMetadata;
pub use roles::RoleKind;
pub use treasury::{EDIT_FEE, MINT_FEE};
pub use whitelist::{WhitelistedAddress, WhitelistedToken};

use storage::{ADMIN, FEE_TOKEN, INITIALIZED};

/// Largest window any enumeration call will return.
pub const MAX_BATCH_SIZE: u32 = 100;

/// One page of token ids plus the unfiltered token count.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenPage {
    pub token_ids: Vec<u64>,
    pub total: u64,
}

/// One page of token display names plus the unfiltered token count.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamePage {
    pub names: Vec<String>,
    pub total: u64,
}

#[contract]
pub struct RecordRegistryContract;

impl RecordRegistryContract {
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Validates a pagination window and clamps it to the token count.
    /// Returns `(start, end, total)`.
    fn page_bounds(env: &Env, offset: u64, limit: u32) -> Result<(u64, u64, u64), ContractError> {
        if limit > MAX_BATCH_SIZE {
            return Err(errors::raise(
                env,
                ContractError::BatchSizeExceeded,
                ErrorDetail::Batch(limit as u64, MAX_BATCH_SIZE),
            ));
        }

        let total = records::next_token_id(env);
        if offset >= total {
            return Err(errors::raise(
                env,
                ContractError::OffsetOutOfBounds,
                ErrorDetail::Offset(offset, total),
            ));
        }

        let end = offset.saturating_add(limit as u64).min(total);
        Ok((offset, end, total))
    }

    /// Full-range enumeration refuses to truncate: more than one batch of
    /// tokens is an error rather than a partial answer.
    fn full_range(env: &Env) -> Result<u64, ContractError> {
        let total = records::next_token_id(env);
        if total > MAX_BATCH_SIZE as u64 {
            return Err(errors::raise(
                env,
                ContractError::BatchSizeExceeded,
                ErrorDetail::Batch(total, MAX_BATCH_SIZE),
            ));
        }
        Ok(total)
    }

    fn add_role(
        env: &Env,
        caller: &Address,
        kind: RoleKind,
        account: &Address,
        name: String,
    ) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        circuit_breaker::require_not_paused(env)?;
        access::authorize(env, caller, &Gate::RegistryOwner)?;

        validation::require_holder_address(env, account)?;
        validation::require_non_empty(env, &name, validation::NAME)?;

        roles::add(env, &kind, account, &name)?;
        events::publish_role_added(env, kind, account.clone(), name);
        Ok(())
    }

    fn remove_role(
        env: &Env,
        caller: &Address,
        kind: RoleKind,
        account: &Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        circuit_breaker::require_not_paused(env)?;
        access::authorize(env, caller, &Gate::RegistryOwner)?;

        roles::remove(env, &kind, account)?;
        events::publish_role_removed(env, kind, account.clone());
        Ok(())
    }

    fn list_role(
        env: &Env,
        caller: &Address,
        kind: RoleKind,
    ) -> Result<Vec<Address>, ContractError> {
        caller.require_auth();
        access::authorize(env, caller, &Gate::RegistryOwner)?;
        Ok(roles::members(env, &kind))
    }

    fn list_role_names(
        env: &Env,
        caller: &Address,
        kind: RoleKind,
    ) -> Result<Vec<String>, ContractError> {
        caller.require_auth();
        access::authorize(env, caller, &Gate::RegistryOwner)?;
        Ok(roles::member_names(env, &kind))
    }
}

#[contractimpl]
impl RecordRegistryContract {
    // ── Administration ──────────────────────────────────────────────────────

    /// Initialize the registry with its owner and the token fees are paid in.
    pub fn initialize(env: Env, admin: Address, fee_token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&FEE_TOKEN, &fee_token);
        env.storage().instance().set(&INITIALIZED, &true);
        storage::extend_ttl_instance(&env);

        events::publish_initialized(&env, admin, fee_token);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_fee_token(env: Env) -> Result<Address, ContractError> {
        treasury::fee_token(&env)
    }

    /// Returns `(MINT_FEE, EDIT_FEE)`.
    pub fn get_fees() -> (i128, i128) {
        (MINT_FEE, EDIT_FEE)
    }

    pub fn version() -> u32 {
        1
    }

    /// Hands the registry-owner role to `new_admin`.
    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::RegistryOwner)?;
        validation::require_holder_address(&env, &new_admin)?;

        env.storage().instance().set(&ADMIN, &new_admin);
        events::publish_admin_transferred(&env, caller, new_admin);
        Ok(())
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::RegistryOwner)?;

        circuit_breaker::set_paused(&env, true);
        events::publish_paused(&env, caller);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::RegistryOwner)?;

        circuit_breaker::set_paused(&env, false);
        events::publish_unpaused(&env, caller);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        circuit_breaker::is_paused(&env)
    }

    /// Sweeps the registry's pooled fee-token balance to the registry owner.
    /// Available while paused. Returns the amount moved.
    pub fn emergency_withdraw(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::RegistryOwner)?;

        let amount = treasury::sweep(&env)?;
        events::publish_withdraw(&env, caller, amount);
        Ok(amount)
    }

    // ── Records ─────────────────────────────────────────────────────────────

    /// Mint a record token to `to`, paid for by `caller`.
    ///
    /// `fee_paid` must be at least [`MINT_FEE`]; the full amount is pulled
    /// from `caller` and forwarded to the registry owner.
    #[allow(clippy::too_many_arguments)]
    pub fn mint(
        env: Env,
        caller: Address,
        to: Address,
        locator: String,
        display_name: String,
        key_material: String,
        fee_paid: i128,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::non_reentrant(&env, || {
            validation::require_holder_address(&env, &to)?;
            validation::validate_record_fields(&env, &locator, &display_name, &key_material)?;
            treasury::require_fee(&env, MINT_FEE, fee_paid)?;

            let token_id =
                records::create(&env, &to, locator, display_name.clone(), key_material);
            treasury::settle_fee(&env, &caller, fee_paid)?;

            events::publish_minted(&env, to.clone(), token_id, display_name);
            Ok(token_id)
        })
    }

    /// Overwrite a token's locator, display name and key material.
    /// The caller must own the token or be whitelisted on it.
    #[allow(clippy::too_many_arguments)]
    pub fn edit_token_metadata(
        env: Env,
        caller: Address,
        token_id: u64,
        locator: String,
        display_name: String,
        key_material: String,
        fee_paid: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        circuit_breaker::require_not_paused(&env)?;

        reentrancy::non_reentrant(&env, || {
            access::authorize(&env, &caller, &Gate::OwnerOrWhitelisted(token_id))?;
            treasury::require_fee(&env, EDIT_FEE, fee_paid)?;
            validation::validate_record_fields(&env, &locator, &display_name, &key_material)?;

            records::update(&env, token_id, locator, display_name, key_material)?;
            treasury::settle_fee(&env, &caller, fee_paid)?;

            events::publish_metadata_updated(&env, token_id, caller.clone());
            Ok(())
        })
    }

    /// Read a token's metadata. Open to the owner, whitelisted addresses and
    /// any agency or medical provider.
    pub fn get_metadata(
        env: Env,
        caller: Address,
        token_id: u64,
    ) -> Result<RecordMetadata, ContractError> {
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::OwnerWhitelistedOrRole(token_id))?;
        records::metadata(&env, token_id)
    }

    /// Which predicate would let `caller` read `token_id`, or `Denied`.
    pub fn check_access(
        env: Env,
        caller: Address,
        token_id: u64,
    ) -> Result<AccessOutcome, ContractError> {
        access::evaluate(&env, &caller, &Gate::OwnerWhitelistedOrRole(token_id))
    }

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, ContractError> {
        records::require_owner(&env, token_id)
    }

    pub fn balance_of(env: Env, owner: Address) -> u64 {
        records::balance_of(&env, &owner)
    }

    pub fn next_token_id(env: Env) -> u64 {
        records::next_token_id(&env)
    }

    /// Tokens are never burned, so the supply is the id counter.
    pub fn total_supply(env: Env) -> u64 {
        records::next_token_id(&env)
    }

    /// Move a token to `to`. Its whitelist travels with it.
    pub fn transfer(env: Env, from: Address, to: Address, token_id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();
        circuit_breaker::require_not_paused(&env)?;
        access::authorize(&env, &from, &Gate::TokenOwner(token_id))?;
        validation::require_holder_address(&env, &to)?;

        records::transfer(&env, token_id, &from, &to);
        events::publish_transfer(&env, from, to, token_id);
        Ok(())
    }

    // ── Whitelist ───────────────────────────────────────────────────────────

    /// Whitelist `account` on `token_id` under `name`. `token_name` is the
    /// label recorded in the account's own token list.
    pub fn whitelist_address(
        env: Env,
        caller: Address,
        token_id: u64,
        account: Address,
        name: String,
        token_name: String,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        circuit_breaker::require_not_paused(&env)?;
        access::authorize(&env, &caller, &Gate::TokenOwner(token_id))?;

        validation::require_holder_address(&env, &account)?;
        validation::require_non_empty(&env, &name, validation::NAME)?;
        validation::require_non_empty(&env, &token_name, validation::TOKEN_NAME)?;

        whitelist::add(&env, token_id, &account, name.clone(), token_name)?;
        events::publish_whitelisted(&env, token_id, account, name);
        Ok(())
    }

    pub fn remove_whitelisted_address(
        env: Env,
        caller: Address,
        token_id: u64,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        circuit_breaker::require_not_paused(&env)?;
        access::authorize(&env, &caller, &Gate::TokenOwner(token_id))?;

        whitelist::remove(&env, token_id, &account)?;
        events::publish_whitelist_removed(&env, token_id, account);
        Ok(())
    }

    /// Active whitelist of a token. Owner only.
    pub fn get_whitelisted_addresses(
        env: Env,
        caller: Address,
        token_id: u64,
    ) -> Result<Vec<WhitelistedAddress>, ContractError> {
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::TokenOwner(token_id))?;
        Ok(whitelist::active_entries(&env, token_id))
    }

    /// Tokens `account` is whitelisted on. Only `account` may ask.
    pub fn get_whitelisted_tokens(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<Vec<WhitelistedToken>, ContractError> {
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::SelfOnly(account.clone()))?;
        Ok(whitelist::account_tokens(&env, &account))
    }

    pub fn get_whitelisted_token_ids(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<Vec<u64>, ContractError> {
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::SelfOnly(account.clone()))?;
        Ok(whitelist::account_token_ids(&env, &account))
    }

    /// Same order as [`Self::get_whitelisted_token_ids`].
    pub fn get_whitelisted_token_names(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<Vec<String>, ContractError> {
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::SelfOnly(account.clone()))?;
        Ok(whitelist::account_token_names(&env, &account))
    }

    pub fn is_whitelisted(env: Env, token_id: u64, account: Address) -> bool {
        whitelist::is_active(&env, token_id, &account)
    }

    // ── Roles ───────────────────────────────────────────────────────────────

    pub fn add_agency(
        env: Env,
        caller: Address,
        agency: Address,
        name: String,
    ) -> Result<(), ContractError> {
        Self::add_role(&env, &caller, RoleKind::Agency, &agency, name)
    }

    pub fn remove_agency(env: Env, caller: Address, agency: Address) -> Result<(), ContractError> {
        Self::remove_role(&env, &caller, RoleKind::Agency, &agency)
    }

    pub fn add_medical_provider(
        env: Env,
        caller: Address,
        provider: Address,
        name: String,
    ) -> Result<(), ContractError> {
        Self::add_role(&env, &caller, RoleKind::MedicalProvider, &provider, name)
    }

    pub fn remove_medical_provider(
        env: Env,
        caller: Address,
        provider: Address,
    ) -> Result<(), ContractError> {
        Self::remove_role(&env, &caller, RoleKind::MedicalProvider, &provider)
    }

    pub fn is_agency(env: Env, account: Address) -> bool {
        roles::has_role(&env, &RoleKind::Agency, &account)
    }

    pub fn is_medical_provider(env: Env, account: Address) -> bool {
        roles::has_role(&env, &RoleKind::MedicalProvider, &account)
    }

    pub fn get_agencies(env: Env, caller: Address) -> Result<Vec<Address>, ContractError> {
        Self::list_role(&env, &caller, RoleKind::Agency)
    }

    pub fn get_agency_names(env: Env, caller: Address) -> Result<Vec<String>, ContractError> {
        Self::list_role_names(&env, &caller, RoleKind::Agency)
    }

    pub fn get_medical_providers(env: Env, caller: Address) -> Result<Vec<Address>, ContractError> {
        Self::list_role(&env, &caller, RoleKind::MedicalProvider)
    }

    pub fn get_medical_provider_names(
        env: Env,
        caller: Address,
    ) -> Result<Vec<String>, ContractError> {
        Self::list_role_names(&env, &caller, RoleKind::MedicalProvider)
    }

    // ── Enumeration ─────────────────────────────────────────────────────────

    /// Every token id. Agencies only; fails once the registry holds more
    /// than [`MAX_BATCH_SIZE`] tokens.
    pub fn list_all_token_ids(env: Env, caller: Address) -> Result<Vec<u64>, ContractError> {
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::Agency)?;
        let total = Self::full_range(&env)?;
        Ok(records::token_ids(&env, 0, total))
    }

    pub fn list_all_token_names(env: Env, caller: Address) -> Result<Vec<String>, ContractError> {
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::Agency)?;
        let total = Self::full_range(&env)?;
        records::display_names(&env, 0, total)
    }

    /// Token ids in `[offset, min(offset + limit, total))`.
    ///
    /// `total` in the returned page is the full token count, not the page
    /// length. An `offset` at or past the end is rejected, including offset
    /// 0 on an empty registry.
    pub fn list_token_ids_paginated(
        env: Env,
        caller: Address,
        offset: u64,
        limit: u32,
    ) -> Result<TokenPage, ContractError> {
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::Agency)?;
        let (start, end, total) = Self::page_bounds(&env, offset, limit)?;
        Ok(TokenPage {
            token_ids: records::token_ids(&env, start, end),
            total,
        })
    }

    pub fn list_token_names_paginated(
        env: Env,
        caller: Address,
        offset: u64,
        limit: u32,
    ) -> Result<NamePage, ContractError> {
        caller.require_auth();
        access::authorize(&env, &caller, &Gate::Agency)?;
        let (start, end, total) = Self::page_bounds(&env, offset, limit)?;
        Ok(NamePage {
            names: records::display_names(&env, start, end)?,
            total,
        })
    }
}




#[cfg(test)]
mod test_whitelist;
