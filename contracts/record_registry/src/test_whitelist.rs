#![cfg(test)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]

use crate::{
    ContractError, RecordRegistryContract, RecordRegistryContractClient, WhitelistedAddress,
    WhitelistedToken, MINT_FEE,
};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, String,
};

fn setup_test() -> (Env, RecordRegistryContractClient<'static>, Address, u64) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(RecordRegistryContract, ());
    let client = RecordRegistryContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token);

    let owner = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&owner, &(MINT_FEE * 4));
    let token_id = client.mint(
        &owner,
        &owner,
        &String::from_str(&env, "loc"),
        &String::from_str(&env, "Scan"),
        &String::from_str(&env, "key"),
        &MINT_FEE,
    );

    (env, client, owner, token_id)
}

fn mint_more(env: &Env, client: &RecordRegistryContractClient, owner: &Address, name: &str) -> u64 {
    client.mint(
        owner,
        owner,
        &String::from_str(env, "loc"),
        &String::from_str(env, name),
        &String::from_str(env, "key"),
        &MINT_FEE,
    )
}

fn add(
    env: &Env,
    client: &RecordRegistryContractClient,
    owner: &Address,
    token_id: u64,
    account: &Address,
    name: &str,
) {
    client.whitelist_address(
        owner,
        &token_id,
        account,
        &String::from_str(env, name),
        &String::from_str(env, "Scan"),
    );
}

#[test]
fn test_whitelist_and_list() {
    let (env, client, owner, id) = setup_test();
    let a = Address::generate(&env);
    let b = Address::generate(&env);

    env.ledger().set_timestamp(100);
    add(&env, &client, &owner, id, &a, "Alice");
    env.ledger().set_timestamp(200);
    add(&env, &client, &owner, id, &b, "Bob");

    assert!(client.is_whitelisted(&id, &a));
    assert_eq!(
        client.get_whitelisted_addresses(&owner, &id),
        vec![
            &env,
            WhitelistedAddress {
                account: a.clone(),
                name: String::from_str(&env, "Alice"),
                added_at: 100,
            },
            WhitelistedAddress {
                account: b.clone(),
                name: String::from_str(&env, "Bob"),
                added_at: 200,
            }
        ]
    );

    assert_eq!(client.get_whitelisted_token_ids(&a, &a), vec![&env, id]);
    assert_eq!(
        client.get_whitelisted_token_names(&a, &a),
        vec![&env, String::from_str(&env, "Scan")]
    );
    assert_eq!(
        client.get_whitelisted_tokens(&b, &b),
        vec![
            &env,
            WhitelistedToken {
                token_id: id,
                token_name: String::from_str(&env, "Scan"),
            }
        ]
    );
}

#[test]
fn test_duplicate_whitelist_leaves_indexes_unchanged() {
    let (env, client, owner, id) = setup_test();
    let a = Address::generate(&env);
    add(&env, &client, &owner, id, &a, "Alice");

    let forward = client.get_whitelisted_addresses(&owner, &id);
    let reverse = client.get_whitelisted_tokens(&a, &a);

    let res = client.try_whitelist_address(
        &owner,
        &id,
        &a,
        &String::from_str(&env, "Alice again"),
        &String::from_str(&env, "Other name"),
    );
    assert_eq!(res, Err(Ok(ContractError::AlreadyExists)));

    assert_eq!(client.get_whitelisted_addresses(&owner, &id), forward);
    assert_eq!(client.get_whitelisted_tokens(&a, &a), reverse);
}

#[test]
fn test_remove_cleans_both_indexes() {
    let (env, client, owner, id) = setup_test();
    let second = mint_more(&env, &client, &owner, "Labs");
    let a = Address::generate(&env);
    let b = Address::generate(&env);
    let c = Address::generate(&env);

    add(&env, &client, &owner, id, &a, "Alice");
    add(&env, &client, &owner, id, &b, "Bob");
    add(&env, &client, &owner, id, &c, "Carol");
    client.whitelist_address(
        &owner,
        &second,
        &a,
        &String::from_str(&env, "Alice"),
        &String::from_str(&env, "Labs"),
    );

    client.remove_whitelisted_address(&owner, &id, &a);

    assert!(!client.is_whitelisted(&id, &a));
    assert!(client.is_whitelisted(&second, &a));

    let live = client.get_whitelisted_addresses(&owner, &id);
    assert_eq!(live.len(), 2);
    assert!(live.iter().all(|entry| entry.account != a));

    // only the pair for the removed token goes away, with its own name
    assert_eq!(client.get_whitelisted_token_ids(&a, &a), vec![&env, second]);
    assert_eq!(
        client.get_whitelisted_token_names(&a, &a),
        vec![&env, String::from_str(&env, "Labs")]
    );
}

#[test]
fn test_remove_then_readd() {
    let (env, client, owner, id) = setup_test();
    let a = Address::generate(&env);

    env.ledger().set_timestamp(10);
    add(&env, &client, &owner, id, &a, "Alice");
    client.remove_whitelisted_address(&owner, &id, &a);
    assert!(client.get_whitelisted_addresses(&owner, &id).is_empty());
    assert!(client.get_whitelisted_token_ids(&a, &a).is_empty());

    env.ledger().set_timestamp(20);
    add(&env, &client, &owner, id, &a, "Alice (new)");
    let live = client.get_whitelisted_addresses(&owner, &id);
    assert_eq!(live.len(), 1);
    let entry = live.get(0).unwrap();
    assert_eq!(entry.name, String::from_str(&env, "Alice (new)"));
    // a re-add starts a fresh entry
    assert_eq!(entry.added_at, 20);
    assert_eq!(client.get_whitelisted_token_ids(&a, &a), vec![&env, id]);
}

#[test]
fn test_remove_inactive_is_not_found() {
    let (env, client, owner, id) = setup_test();
    let a = Address::generate(&env);

    let res = client.try_remove_whitelisted_address(&owner, &id, &a);
    assert_eq!(res, Err(Ok(ContractError::NotFound)));
}

#[test]
fn test_only_token_owner_manages_whitelist() {
    let (env, client, owner, id) = setup_test();
    let a = Address::generate(&env);
    let b = Address::generate(&env);
    add(&env, &client, &owner, id, &a, "Alice");

    // a whitelisted address may edit but not extend the whitelist
    let res = client.try_whitelist_address(
        &a,
        &id,
        &b,
        &String::from_str(&env, "Bob"),
        &String::from_str(&env, "Scan"),
    );
    assert_eq!(res, Err(Ok(ContractError::Unauthorized)));

    let res = client.try_remove_whitelisted_address(&a, &id, &a);
    assert_eq!(res, Err(Ok(ContractError::Unauthorized)));

    let res = client.try_get_whitelisted_addresses(&a, &id);
    assert_eq!(res, Err(Ok(ContractError::Unauthorized)));

    let res = client.try_whitelist_address(
        &owner,
        &77,
        &b,
        &String::from_str(&env, "Bob"),
        &String::from_str(&env, "Scan"),
    );
    assert_eq!(res, Err(Ok(ContractError::NotFound)));
}

#[test]
fn test_reverse_lists_are_self_only() {
    let (env, client, owner, id) = setup_test();
    let a = Address::generate(&env);
    add(&env, &client, &owner, id, &a, "Alice");

    let res = client.try_get_whitelisted_token_ids(&owner, &a);
    assert_eq!(res, Err(Ok(ContractError::Unauthorized)));
    let res = client.try_get_whitelisted_token_names(&owner, &a);
    assert_eq!(res, Err(Ok(ContractError::Unauthorized)));
    let res = client.try_get_whitelisted_tokens(&owner, &a);
    assert_eq!(res, Err(Ok(ContractError::Unauthorized)));
}

#[test]
fn test_whitelist_input_validation() {
    let (env, client, owner, id) = setup_test();
    let a = Address::generate(&env);

    let res = client.try_whitelist_address(
        &owner,
        &id,
        &client.address,
        &String::from_str(&env, "Registry"),
        &String::from_str(&env, "Scan"),
    );
    assert_eq!(res, Err(Ok(ContractError::InvalidAddress)));

    let res = client.try_whitelist_address(
        &owner,
        &id,
        &a,
        &String::from_str(&env, ""),
        &String::from_str(&env, "Scan"),
    );
    assert_eq!(res, Err(Ok(ContractError::EmptyField)));

    let res = client.try_whitelist_address(
        &owner,
        &id,
        &a,
        &String::from_str(&env, "Alice"),
        &String::from_str(&env, ""),
    );
    assert_eq!(res, Err(Ok(ContractError::EmptyField)));

    assert!(!client.is_whitelisted(&id, &a));
}
