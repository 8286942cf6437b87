//! Fee settlement through the fee token configured at initialization.
//!
//! A fee is pulled from the payer into the registry and then forwarded to
//! the registry owner. Both legs use the fallible `try_transfer` so a
//! rejected transfer surfaces as `TransferFailed` and the whole invocation
//! rolls back.

use soroban_sdk::{log, token, Address, Env};

use crate::errors::{raise, ContractError, ErrorDetail};
use crate::storage::{ADMIN, FEE_TOKEN};

/// Fee for minting a record token, in fee-token base units.
pub const MINT_FEE: i128 = 10_000_000;
/// Fee for editing a record token's metadata.
pub const EDIT_FEE: i128 = 5_000_000;

pub fn fee_token(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&FEE_TOKEN)
        .ok_or(ContractError::NotInitialized)
}

fn admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

pub fn require_fee(env: &Env, required: i128, provided: i128) -> Result<(), ContractError> {
    if provided < required {
        return Err(raise(
            env,
            ContractError::InsufficientFunds,
            ErrorDetail::Funds(required, provided),
        ));
    }
    Ok(())
}

fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    let client = token::Client::new(env, &fee_token(env)?);
    match client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(raise(
            env,
            ContractError::TransferFailed,
            ErrorDetail::Account(from.clone()),
        )),
    }
}

/// Pulls `amount` from `payer` and forwards it to the registry owner.
pub fn settle_fee(env: &Env, payer: &Address, amount: i128) -> Result<(), ContractError> {
    let registry = env.current_contract_address();
    transfer(env, payer, &registry, amount)?;
    transfer(env, &registry, &admin(env)?, amount)?;
    log!(env, "fee settled", payer.clone(), amount);
    Ok(())
}

/// Moves the registry's whole fee-token balance to the registry owner.
pub fn sweep(env: &Env) -> Result<i128, ContractError> {
    let registry = env.current_contract_address();
    let balance = token::Client::new(env, &fee_token(env)?).balance(&registry);
    if balance > 0 {
        transfer(env, &registry, &admin(env)?, balance)?;
    }
    Ok(balance)
}
