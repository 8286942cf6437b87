#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Model-based property tests for the whitelist indexes.
//!
//! A random sequence of add/remove operations is applied both to the
//! registry and to a plain in-memory model. After every step:
//! - `is_whitelisted` agrees with the model for every (token, account) pair
//! - the forward list of each token holds exactly the live accounts
//! - the reverse list of each account holds exactly the live tokens, each
//!   paired with the name it was whitelisted under
//!
//! Removal is swap-remove, so list order is compared as a set.

use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use record_registry::{
    ContractError, RecordRegistryContract, RecordRegistryContractClient, MINT_FEE,
};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env, String};

const TOKENS: u8 = 3;
const ACCOUNTS: u8 = 4;

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    Add { token: u8, account: u8 },
    Remove { token: u8, account: u8 },
}

struct Harness {
    env: Env,
    client: RecordRegistryContractClient<'static>,
    owner: Address,
    token_ids: Vec<u64>,
    accounts: Vec<Address>,
}

fn setup() -> Harness {
    let env = Env::default();
    env.mock_all_auths();

    let fee_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(RecordRegistryContract, ());
    let client = RecordRegistryContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &fee_token);

    let owner = Address::generate(&env);
    StellarAssetClient::new(&env, &fee_token).mint(&owner, &(MINT_FEE * TOKENS as i128));
    let token_ids = (0..TOKENS)
        .map(|i| {
            client.mint(
                &owner,
                &owner,
                &String::from_str(&env, "loc"),
                &String::from_str(&env, &format!("Record {i}")),
                &String::from_str(&env, "key"),
                &MINT_FEE,
            )
        })
        .collect();
    let accounts = (0..ACCOUNTS).map(|_| Address::generate(&env)).collect();

    Harness {
        env,
        client,
        owner,
        token_ids,
        accounts,
    }
}

fn token_label(token: u8) -> std::string::String {
    format!("Label {token}")
}

/// Live (token, account) pairs, by index.
type Model = BTreeSet<(u8, u8)>;

fn check_against_model(h: &Harness, model: &Model) -> Result<(), TestCaseError> {
    for t in 0..TOKENS {
        let token_id = h.token_ids[t as usize];

        let mut expected: Vec<Address> = (0..ACCOUNTS)
            .filter(|a| model.contains(&(t, *a)))
            .map(|a| h.accounts[a as usize].clone())
            .collect();
        let mut live: Vec<Address> = h
            .client
            .get_whitelisted_addresses(&h.owner, &token_id)
            .iter()
            .map(|entry| entry.account)
            .collect();
        expected.sort();
        live.sort();
        prop_assert_eq!(live, expected);

        for a in 0..ACCOUNTS {
            prop_assert_eq!(
                h.client.is_whitelisted(&token_id, &h.accounts[a as usize]),
                model.contains(&(t, a))
            );
        }
    }

    for a in 0..ACCOUNTS {
        let account = &h.accounts[a as usize];

        let mut expected: Vec<(u64, String)> = (0..TOKENS)
            .filter(|t| model.contains(&(*t, a)))
            .map(|t| {
                (
                    h.token_ids[t as usize],
                    String::from_str(&h.env, &token_label(t)),
                )
            })
            .collect();
        let mut live: Vec<(u64, String)> = h
            .client
            .get_whitelisted_tokens(account, account)
            .iter()
            .map(|pair| (pair.token_id, pair.token_name))
            .collect();
        expected.sort();
        live.sort();
        prop_assert_eq!(&live, &expected);

        let ids = h.client.get_whitelisted_token_ids(account, account);
        let names = h.client.get_whitelisted_token_names(account, account);
        prop_assert_eq!(ids.len(), names.len());
        prop_assert_eq!(ids.len() as usize, expected.len());
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_indexes_track_model(ops in prop::collection::vec(any::<Op>(), 1..30)) {
        let h = setup();
        let mut model = Model::new();

        for op in ops {
            match op {
                Op::Add { token, account } => {
                    let (t, a) = (token % TOKENS, account % ACCOUNTS);
                    let res = h.client.try_whitelist_address(
                        &h.owner,
                        &h.token_ids[t as usize],
                        &h.accounts[a as usize],
                        &String::from_str(&h.env, "Grantee"),
                        &String::from_str(&h.env, &token_label(t)),
                    );
                    if model.contains(&(t, a)) {
                        prop_assert_eq!(res, Err(Ok(ContractError::AlreadyExists)));
                    } else {
                        prop_assert!(res.is_ok());
                        model.insert((t, a));
                    }
                }
                Op::Remove { token, account } => {
                    let (t, a) = (token % TOKENS, account % ACCOUNTS);
                    let res = h.client.try_remove_whitelisted_address(
                        &h.owner,
                        &h.token_ids[t as usize],
                        &h.accounts[a as usize],
                    );
                    if model.remove(&(t, a)) {
                        prop_assert!(res.is_ok());
                    } else {
                        prop_assert_eq!(res, Err(Ok(ContractError::NotFound)));
                    }
                }
            }

            check_against_model(&h, &model)?;
        }
    }
}
