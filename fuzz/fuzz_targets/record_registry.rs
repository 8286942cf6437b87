#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use record_registry::{RecordRegistryContract, RecordRegistryContractClient, EDIT_FEE, MINT_FEE};
use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, Address, Env, String};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Mint { caller: u8, to: u8, name_len: u8, fee_delta: i16 },
    Edit { caller: u8, token: u8, name_len: u8, fee_delta: i16 },
    Whitelist { caller: u8, token: u8, account: u8 },
    RemoveWhitelisted { caller: u8, token: u8, account: u8 },
    Transfer { from: u8, to: u8, token: u8 },
    AddAgency { account: u8 },
    RemoveAgency { account: u8 },
    ListPage { caller: u8, offset: u8, limit: u8 },
    TogglePause,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let fee_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(RecordRegistryContract, ());
    let client = RecordRegistryContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let _ = client.try_initialize(&admin, &fee_token);

    let mut users = vec![admin.clone()];
    for _ in 0..5 {
        users.push(Address::generate(&env));
    }
    let minter = StellarAssetClient::new(&env, &fee_token);
    for user in users.iter() {
        minter.mint(user, &(MINT_FEE * 1_000));
    }

    let pick = |i: u8| users[i as usize % users.len()].clone();
    let text = |len: u8| {
        // zero length exercises the empty-field path
        let s = "r".repeat(len as usize % 40);
        String::from_str(&env, &s)
    };

    for action in actions {
        match action {
            FuzzAction::Mint { caller, to, name_len, fee_delta } => {
                let fee = MINT_FEE + fee_delta as i128;
                let _ = client.try_mint(
                    &pick(caller),
                    &pick(to),
                    &text(name_len.wrapping_add(1)),
                    &text(name_len),
                    &text(name_len.wrapping_add(2)),
                    &fee,
                );
            }
            FuzzAction::Edit { caller, token, name_len, fee_delta } => {
                let fee = EDIT_FEE + fee_delta as i128;
                let _ = client.try_edit_token_metadata(
                    &pick(caller),
                    &(token as u64),
                    &text(name_len.wrapping_add(1)),
                    &text(name_len),
                    &text(name_len.wrapping_add(2)),
                    &fee,
                );
            }
            FuzzAction::Whitelist { caller, token, account } => {
                let _ = client.try_whitelist_address(
                    &pick(caller),
                    &(token as u64),
                    &pick(account),
                    &text(account.wrapping_add(1)),
                    &text(token.wrapping_add(1)),
                );
            }
            FuzzAction::RemoveWhitelisted { caller, token, account } => {
                let _ = client.try_remove_whitelisted_address(
                    &pick(caller),
                    &(token as u64),
                    &pick(account),
                );
            }
            FuzzAction::Transfer { from, to, token } => {
                let _ = client.try_transfer(&pick(from), &pick(to), &(token as u64));
            }
            FuzzAction::AddAgency { account } => {
                let _ = client.try_add_agency(&admin, &pick(account), &text(account));
            }
            FuzzAction::RemoveAgency { account } => {
                let _ = client.try_remove_agency(&admin, &pick(account));
            }
            FuzzAction::ListPage { caller, offset, limit } => {
                let _ = client.try_list_token_ids_paginated(
                    &pick(caller),
                    &(offset as u64),
                    &(limit as u32),
                );
            }
            FuzzAction::TogglePause => {
                if client.is_paused() {
                    let _ = client.try_unpause(&admin);
                } else {
                    let _ = client.try_pause(&admin);
                }
            }
        }

        // the id counter and the token count never drift apart
        assert_eq!(client.total_supply(), client.next_token_id());

        // every live whitelist entry is visible from both sides
        for t in 0..client.next_token_id() {
            let owner = client.owner_of(&t);
            for entry in client.get_whitelisted_addresses(&owner, &t).iter() {
                assert!(client.is_whitelisted(&t, &entry.account));
                let ids = client.get_whitelisted_token_ids(&entry.account, &entry.account);
                assert!(ids.contains(t));
            }
        }
    }
});
