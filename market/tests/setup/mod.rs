use multiversx_sc_scenario::imports::*;

use market::borrow::BorrowModule;
use market::config::ConfigModule;
use market::LendingMarket;
use market::liquidation::LiquidationModule;
use market::oracle::OracleModule;
use market::positions::PositionsModule;
use market::storage::Storage;
use market::utils::UtilsModule;
use market::views::ViewModule;

pub const OWNER: TestAddress = TestAddress::new("owner");
pub const ORACLE: TestAddress = TestAddress::new("oracle");
pub const SUPPLIER: TestAddress = TestAddress::new("supplier");
pub const BORROWER: TestAddress = TestAddress::new("borrower");
pub const LIQUIDATOR: TestAddress = TestAddress::new("liquidator");

pub const MARKET_ADDRESS: TestSCAddress = TestSCAddress::new("market");
pub const CODE_PATH: MxscPath = MxscPath::new("output/market.mxsc.json");

pub const USDC_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("USDC-123456");
pub const WEGLD_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("WEGLD-123456");

/// One whole unit of a 6-decimals test asset.
pub const UNIT: u64 = 1_000_000;
pub const WAD: u128 = 1_000_000_000_000_000_000;

pub fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();
    blockchain.register_contract(CODE_PATH, market::ContractBuilder);
    blockchain
}

pub struct MarketTestState {
    pub world: ScenarioWorld,
    pub usdc_pool: u64,
    pub wegld_pool: u64,
}

impl MarketTestState {
    /// Deploys the market with two six-decimals pools: USDC priced at 1 and
    /// WEGLD priced at 10. Close factor 50%, no liquidation fee, minimum
    /// health factor 1.0, liquidation boundary 90%, prices valid for 600s.
    pub fn new() -> Self {
        let mut world = world();

        world.account(OWNER).nonce(1);
        world.account(ORACLE).nonce(1);
        world
            .account(SUPPLIER)
            .nonce(1)
            .esdt_balance(USDC_TOKEN, 10_000 * UNIT);
        world
            .account(BORROWER)
            .nonce(1)
            .esdt_balance(USDC_TOKEN, 1_000 * UNIT)
            .esdt_balance(WEGLD_TOKEN, 10_000 * UNIT);
        world
            .account(LIQUIDATOR)
            .nonce(1)
            .esdt_balance(USDC_TOKEN, 10_000 * UNIT);

        world.current_block().block_timestamp(0);

        world
            .tx()
            .from(OWNER)
            .raw_deploy()
            .code(CODE_PATH)
            .new_address(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                sc.init(
                    OWNER.to_managed_address(),
                    BigUint::from(5_000u64),
                    BigUint::from(0u64),
                    BigUint::from(WAD),
                    BigUint::from(9_000u64),
                    600,
                );
            });

        let mut state = MarketTestState {
            world,
            usdc_pool: 0,
            wegld_pool: 0,
        };

        state.usdc_pool = state.register_pool(USDC_TOKEN, b"USD Coin", b"Pooled USDC", b"PUSDC");
        state.wegld_pool =
            state.register_pool(WEGLD_TOKEN, b"Wrapped EGLD", b"Pooled WEGLD", b"PWEGLD");

        state.set_price_source(state.usdc_pool);
        state.set_price_source(state.wegld_pool);
        state.submit_price(state.usdc_pool, WAD);
        state.submit_price(state.wegld_pool, 10 * WAD);

        state
    }

    pub fn set_block_timestamp(&mut self, timestamp: u64) {
        self.world.current_block().block_timestamp(timestamp);
    }

    pub fn register_pool(
        &mut self,
        token: TestTokenIdentifier,
        name: &[u8],
        share_name: &[u8],
        share_ticker: &[u8],
    ) -> u64 {
        let mut pool_id = 0u64;
        self.world
            .tx()
            .from(OWNER)
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                pool_id = sc.register_pool(
                    EgldOrEsdtTokenIdentifier::esdt(token.to_token_identifier()),
                    6usize,
                    ManagedBuffer::new_from_bytes(name),
                    ManagedBuffer::new_from_bytes(share_name),
                    ManagedBuffer::new_from_bytes(share_ticker),
                    BigUint::from(7_500u64),
                    BigUint::from(1_000u64),
                    BigUint::from(10_500u64),
                    BigUint::from(0u64),
                    BigUint::from(2_000u64),
                    BigUint::from(50_000u64),
                    BigUint::from(8_000u64),
                );
            });
        pool_id
    }

    pub fn set_price_source(&mut self, pool_id: u64) {
        self.world
            .tx()
            .from(OWNER)
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                sc.set_price_source(pool_id, ORACLE.to_managed_address(), 18usize);
            });
    }

    pub fn submit_price(&mut self, pool_id: u64, price: u128) {
        self.world
            .tx()
            .from(ORACLE)
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                sc.submit_price(pool_id, BigUint::from(price));
            });
    }

    pub fn submit_price_error(&mut self, from: TestAddress, pool_id: u64, price: u128, error: &[u8]) {
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .returns(ExpectMessage(core::str::from_utf8(error).unwrap()))
            .whitebox(market::contract_obj, |sc| {
                sc.submit_price(pool_id, BigUint::from(price));
            });
    }

    pub fn set_pool_active(&mut self, pool_id: u64, active: bool) {
        self.world
            .tx()
            .from(OWNER)
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                sc.set_pool_active(pool_id, active);
            });
    }

    pub fn set_liquidation_fee(&mut self, liquidation_fee: u64) {
        self.world
            .tx()
            .from(OWNER)
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                sc.set_protocol_params(
                    OWNER.to_managed_address(),
                    BigUint::from(5_000u64),
                    BigUint::from(liquidation_fee),
                    BigUint::from(WAD),
                    BigUint::from(9_000u64),
                    600,
                );
            });
    }

    pub fn deposit(
        &mut self,
        from: TestAddress,
        token: TestTokenIdentifier,
        pool_id: u64,
        amount: u64,
    ) -> u64 {
        let mut minted = 0u64;
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .single_esdt(&token.to_token_identifier(), 0, &BigUint::from(amount))
            .whitebox(market::contract_obj, |sc| {
                minted = sc.deposit(pool_id).into_raw_units().to_u64().unwrap();
            });
        minted
    }

    pub fn deposit_error(
        &mut self,
        from: TestAddress,
        token: TestTokenIdentifier,
        pool_id: u64,
        amount: u64,
        error: &[u8],
    ) {
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .single_esdt(&token.to_token_identifier(), 0, &BigUint::from(amount))
            .returns(ExpectMessage(core::str::from_utf8(error).unwrap()))
            .whitebox(market::contract_obj, |sc| {
                sc.deposit(pool_id);
            });
    }

    pub fn withdraw(&mut self, from: TestAddress, pool_id: u64, amount: u64) {
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                sc.withdraw(pool_id, BigUint::from(amount));
            });
    }

    pub fn withdraw_error(&mut self, from: TestAddress, pool_id: u64, amount: u64, error: &[u8]) {
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .returns(ExpectMessage(core::str::from_utf8(error).unwrap()))
            .whitebox(market::contract_obj, |sc| {
                sc.withdraw(pool_id, BigUint::from(amount));
            });
    }

    pub fn toggle_collateral(&mut self, from: TestAddress, pool_id: u64) -> bool {
        let mut flag = false;
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                flag = sc.toggle_collateral(pool_id);
            });
        flag
    }

    pub fn toggle_collateral_error(&mut self, from: TestAddress, pool_id: u64, error: &[u8]) {
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .returns(ExpectMessage(core::str::from_utf8(error).unwrap()))
            .whitebox(market::contract_obj, |sc| {
                sc.toggle_collateral(pool_id);
            });
    }

    pub fn borrow(&mut self, from: TestAddress, pool_id: u64, amount: u64) {
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                sc.borrow(pool_id, BigUint::from(amount));
            });
    }

    pub fn borrow_error(&mut self, from: TestAddress, pool_id: u64, amount: u64, error: &[u8]) {
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .returns(ExpectMessage(core::str::from_utf8(error).unwrap()))
            .whitebox(market::contract_obj, |sc| {
                sc.borrow(pool_id, BigUint::from(amount));
            });
    }

    pub fn repay(
        &mut self,
        from: TestAddress,
        token: TestTokenIdentifier,
        pool_id: u64,
        amount: u64,
    ) -> u64 {
        let mut applied = 0u64;
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .single_esdt(&token.to_token_identifier(), 0, &BigUint::from(amount))
            .whitebox(market::contract_obj, |sc| {
                applied = sc.repay(pool_id).into_raw_units().to_u64().unwrap();
            });
        applied
    }

    pub fn repay_error(
        &mut self,
        from: TestAddress,
        token: TestTokenIdentifier,
        pool_id: u64,
        amount: u64,
        error: &[u8],
    ) {
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .single_esdt(&token.to_token_identifier(), 0, &BigUint::from(amount))
            .returns(ExpectMessage(core::str::from_utf8(error).unwrap()))
            .whitebox(market::contract_obj, |sc| {
                sc.repay(pool_id);
            });
    }

    pub fn liquidate(
        &mut self,
        from: TestAddress,
        debtor: TestAddress,
        token: TestTokenIdentifier,
        collateral_pool_id: u64,
        amount: u64,
    ) -> u64 {
        let mut repaid = 0u64;
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .single_esdt(&token.to_token_identifier(), 0, &BigUint::from(amount))
            .whitebox(market::contract_obj, |sc| {
                repaid = sc
                    .liquidate(debtor.to_managed_address(), collateral_pool_id)
                    .into_raw_units()
                    .to_u64()
                    .unwrap();
            });
        repaid
    }

    pub fn liquidate_error(
        &mut self,
        from: TestAddress,
        debtor: TestAddress,
        token: TestTokenIdentifier,
        collateral_pool_id: u64,
        amount: u64,
        error: &[u8],
    ) {
        self.world
            .tx()
            .from(from)
            .to(MARKET_ADDRESS)
            .single_esdt(&token.to_token_identifier(), 0, &BigUint::from(amount))
            .returns(ExpectMessage(core::str::from_utf8(error).unwrap()))
            .whitebox(market::contract_obj, |sc| {
                sc.liquidate(debtor.to_managed_address(), collateral_pool_id);
            });
    }

    pub fn accrue(&mut self, pool_id: u64) -> u64 {
        let mut rate = 0u64;
        self.world
            .tx()
            .from(OWNER)
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                rate = sc.accrue(pool_id).into_raw_units().to_u64().unwrap();
            });
        rate
    }

    pub fn accrue_error(&mut self, pool_id: u64, error: &[u8]) {
        self.world
            .tx()
            .from(OWNER)
            .to(MARKET_ADDRESS)
            .returns(ExpectMessage(core::str::from_utf8(error).unwrap()))
            .whitebox(market::contract_obj, |sc| {
                sc.accrue(pool_id);
            });
    }

    // --- assertions ---

    pub fn check_pool_state(
        &mut self,
        pool_id: u64,
        supplied: u64,
        borrowed: u64,
        share_supply: u64,
    ) {
        self.world
            .query()
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                assert_eq!(
                    sc.supplied(pool_id).get().into_raw_units(),
                    &BigUint::from(supplied)
                );
                assert_eq!(
                    sc.borrowed(pool_id).get().into_raw_units(),
                    &BigUint::from(borrowed)
                );
                assert_eq!(
                    sc.share_supply(pool_id).get().into_raw_units(),
                    &BigUint::from(share_supply)
                );
            });
    }

    pub fn check_revenue(&mut self, pool_id: u64, revenue: u64) {
        self.world
            .query()
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                assert_eq!(
                    sc.revenue(pool_id).get().into_raw_units(),
                    &BigUint::from(revenue)
                );
            });
    }

    pub fn check_index(&mut self, pool_id: u64, index: u128) {
        self.world
            .query()
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                assert_eq!(
                    sc.cumulative_index(pool_id).get().into_raw_units(),
                    &BigUint::from(index)
                );
            });
    }

    pub fn get_index(&mut self, pool_id: u64) -> u128 {
        let mut index = 0u128;
        self.world
            .query()
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                index = u128::from(
                    sc.cumulative_index(pool_id)
                        .get()
                        .into_raw_units()
                        .to_u64()
                        .unwrap(),
                );
            });
        index
    }

    pub fn check_deposit_shares(
        &mut self,
        pool_id: u64,
        account: TestAddress,
        shares: u64,
        is_collateral: bool,
    ) {
        self.world
            .query()
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                let position =
                    sc.get_deposit_position(pool_id, account.to_managed_address());
                assert_eq!(position.shares.into_raw_units(), &BigUint::from(shares));
                assert_eq!(position.is_collateral, is_collateral);
            });
    }

    pub fn check_loan_principal(&mut self, pool_id: u64, account: TestAddress, principal: u64) {
        self.world
            .query()
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                let position = sc.get_loan_position(pool_id, account.to_managed_address());
                assert_eq!(position.principal.into_raw_units(), &BigUint::from(principal));
            });
    }

    pub fn check_accrued_debt(&mut self, pool_id: u64, account: TestAddress, debt: u64) {
        self.world
            .query()
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                let accrued = sc.get_accrued_debt(pool_id, account.to_managed_address());
                assert_eq!(accrued.into_raw_units(), &BigUint::from(debt));
            });
    }

    pub fn check_share_price(&mut self, pool_id: u64, price: u128) {
        self.world
            .query()
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                assert_eq!(
                    sc.get_share_price(pool_id).into_raw_units(),
                    &BigUint::from(price)
                );
            });
    }

    pub fn check_health_factor(&mut self, account: TestAddress, health_factor: u128) {
        self.world
            .query()
            .to(MARKET_ADDRESS)
            .whitebox(market::contract_obj, |sc| {
                assert_eq!(
                    sc.get_health_factor(account.to_managed_address())
                        .into_raw_units(),
                    &BigUint::from(health_factor)
                );
            });
    }

    pub fn check_esdt_balance(
        &mut self,
        account: TestAddress,
        token: TestTokenIdentifier,
        amount: u64,
    ) {
        self.world
            .check_account(account)
            .esdt_balance(token, amount);
    }

    pub fn check_market_esdt_balance(&mut self, token: TestTokenIdentifier, amount: u64) {
        self.world
            .check_account(MARKET_ADDRESS)
            .esdt_balance(token, amount);
    }
}
