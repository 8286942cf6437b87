#![allow(dead_code)]

use record_registry::{RecordRegistryContract, RecordRegistryContractClient, MINT_FEE};
use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, Address, Env, String};

pub struct TestContext {
    pub env: Env,
    pub client: RecordRegistryContractClient<'static>,
    pub admin: Address,
    pub fee_token: Address,
}

/// Creates a mocked Soroban environment with a fee token, deploys the
/// registry and initializes it.
pub fn setup_test_env() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let fee_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(RecordRegistryContract, ());
    let client = RecordRegistryContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &fee_token);

    TestContext {
        env,
        client,
        admin,
        fee_token,
    }
}

pub fn text(ctx: &TestContext, value: &str) -> String {
    String::from_str(&ctx.env, value)
}

pub fn fund(ctx: &TestContext, who: &Address, amount: i128) {
    StellarAssetClient::new(&ctx.env, &ctx.fee_token).mint(who, &amount);
}

/// Funds `owner`, mints a record to it and returns the token id.
pub fn mint_record(ctx: &TestContext, owner: &Address, display_name: &str) -> u64 {
    fund(ctx, owner, MINT_FEE);
    ctx.client.mint(
        owner,
        owner,
        &text(ctx, "bafkreihdwdcefgh4dqkjv67uzcmw7ojee6xedzdetojuzjevtenxquvyku"),
        &text(ctx, display_name),
        &text(ctx, "sealed-key"),
        &MINT_FEE,
    )
}

/// Registers a fresh agency and returns its address.
pub fn create_agency(ctx: &TestContext, name: &str) -> Address {
    let agency = Address::generate(&ctx.env);
    ctx.client.add_agency(&ctx.admin, &agency, &text(ctx, name));
    agency
}
