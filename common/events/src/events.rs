#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

#[multiversx_sc::module]
pub trait EventsModule {
    #[event("register_pool")]
    fn register_pool_event(
        &self,
        #[indexed] pool_id: u64,
        #[indexed] asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] name: &ManagedBuffer,
    );

    #[event("set_pool_active")]
    fn set_pool_active_event(&self, #[indexed] pool_id: u64, #[indexed] active: bool);

    #[event("update_protocol_params")]
    fn update_protocol_params_event(
        &self,
        #[indexed] fee_recipient: &ManagedAddress,
        #[indexed] close_factor: &BigUint,
        #[indexed] liquidation_fee: &BigUint,
        #[indexed] min_health_factor: &BigUint,
        #[indexed] liquidation_boundary: &BigUint,
        #[indexed] price_max_age: u64,
    );

    #[event("set_price_source")]
    fn set_price_source_event(
        &self,
        #[indexed] pool_id: u64,
        #[indexed] oracle: &ManagedAddress,
        #[indexed] price_decimals: u64,
    );

    #[event("submit_price")]
    fn submit_price_event(
        &self,
        #[indexed] pool_id: u64,
        #[indexed] price: &BigUint,
        #[indexed] timestamp: u64,
    );

    /// Snapshot of a pool after every accrual-bearing operation.
    #[event("update_market_state")]
    fn update_market_state_event(
        &self,
        #[indexed] pool_id: u64,
        #[indexed] timestamp: u64,
        #[indexed] cumulative_index: &BigUint,
        #[indexed] supplied: &BigUint,
        #[indexed] borrowed: &BigUint,
        #[indexed] revenue: &BigUint,
        #[indexed] rate: &BigUint,
    );

    #[event("deposit")]
    fn deposit_event(
        &self,
        #[indexed] pool_id: u64,
        #[indexed] caller: &ManagedAddress,
        #[indexed] amount: &BigUint,
        #[indexed] shares: &BigUint,
    );

    #[event("withdraw")]
    fn withdraw_event(
        &self,
        #[indexed] pool_id: u64,
        #[indexed] caller: &ManagedAddress,
        #[indexed] amount: &BigUint,
        #[indexed] shares: &BigUint,
    );

    #[event("toggle_collateral")]
    fn toggle_collateral_event(
        &self,
        #[indexed] pool_id: u64,
        #[indexed] caller: &ManagedAddress,
        #[indexed] is_collateral: bool,
    );

    #[event("borrow")]
    fn borrow_event(
        &self,
        #[indexed] pool_id: u64,
        #[indexed] caller: &ManagedAddress,
        #[indexed] amount: &BigUint,
    );

    #[event("repay")]
    fn repay_event(
        &self,
        #[indexed] pool_id: u64,
        #[indexed] caller: &ManagedAddress,
        #[indexed] amount: &BigUint,
    );

    #[event("liquidate")]
    fn liquidate_event(
        &self,
        #[indexed] debtor: &ManagedAddress,
        #[indexed] caller: &ManagedAddress,
        #[indexed] repay_pool_id: u64,
        #[indexed] collateral_pool_id: u64,
        #[indexed] repaid: &BigUint,
        #[indexed] seized_shares: &BigUint,
    );
}
