use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

use crate::errors::{raise, ContractError, ErrorDetail};

pub const LOCATOR: Symbol = symbol_short!("locator");
pub const DISPLAY_NAME: Symbol = symbol_short!("disp_name");
pub const KEY_MATERIAL: Symbol = symbol_short!("key_mat");
pub const NAME: Symbol = symbol_short!("name");
pub const TOKEN_NAME: Symbol = symbol_short!("tok_name");

/// Rejects an empty string, naming the offending argument.
pub fn require_non_empty(env: &Env, value: &String, field: Symbol) -> Result<(), ContractError> {
    if value.is_empty() {
        return Err(raise(env, ContractError::EmptyField, ErrorDetail::Field(field)));
    }
    Ok(())
}

/// Validates the three metadata strings of a record, in argument order.
pub fn validate_record_fields(
    env: &Env,
    locator: &String,
    display_name: &String,
    key_material: &String,
) -> Result<(), ContractError> {
    require_non_empty(env, locator, LOCATOR)?;
    require_non_empty(env, display_name, DISPLAY_NAME)?;
    require_non_empty(env, key_material, KEY_MATERIAL)?;
    Ok(())
}

/// Soroban has no zero address; the registry's own address plays that part.
/// It can never sign, so tokens, whitelist slots or roles given to it would
/// be unusable.
pub fn require_holder_address(env: &Env, account: &Address) -> Result<(), ContractError> {
    if *account == env.current_contract_address() {
        return Err(raise(
            env,
            ContractError::InvalidAddress,
            ErrorDetail::Account(account.clone()),
        ));
    }
    Ok(())
}
