multiversx_sc::imports!();

use common_structs::{
    DepositPosition, LoanPosition, PoolConfig, PriceEntry, ProtocolParams, ShareToken,
};

/// Storage mappers for the market ledger. Pool records are keyed by pool id,
/// positions by pool id and account address.
#[multiversx_sc::module]
pub trait Storage {
    /// Id of the most recently registered pool; ids start at 1.
    #[view(getLastPoolId)]
    #[storage_mapper("last_pool_id")]
    fn last_pool_id(&self) -> SingleValueMapper<u64>;

    #[view(getPoolConfig)]
    #[storage_mapper("pool_config")]
    fn pool_config(&self, pool_id: u64) -> SingleValueMapper<PoolConfig<Self::Api>>;

    /// Reverse lookup; also enforces one pool per asset.
    #[view(getPoolIdByAsset)]
    #[storage_mapper("pool_by_asset")]
    fn pool_by_asset(&self, asset: &EgldOrEsdtTokenIdentifier) -> SingleValueMapper<u64>;

    /// Total deposited units plus the suppliers' share of accrued interest.
    #[view(getSuppliedAmount)]
    #[storage_mapper("supplied")]
    fn supplied(&self, pool_id: u64) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Total outstanding debt including accrued interest.
    #[view(getBorrowedAmount)]
    #[storage_mapper("borrowed")]
    fn borrowed(&self, pool_id: u64) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Protocol's accumulated cut of accrued interest. Custody value that is
    /// not claimable by shares; no withdrawal endpoint exists.
    #[view(getProtocolRevenue)]
    #[storage_mapper("revenue")]
    fn revenue(&self, pool_id: u64) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Circulating pool shares.
    #[view(getShareSupply)]
    #[storage_mapper("share_supply")]
    fn share_supply(
        &self,
        pool_id: u64,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[view(getShareToken)]
    #[storage_mapper("share_token")]
    fn share_token(&self, pool_id: u64) -> SingleValueMapper<ShareToken<Self::Api>>;

    /// Monotonically non-decreasing interest accumulator, WAD scaled,
    /// starting at 1.0.
    #[view(getCumulativeIndex)]
    #[storage_mapper("cumulative_index")]
    fn cumulative_index(
        &self,
        pool_id: u64,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    /// Periodic rate computed at the last accrual, basis points.
    #[view(getCurrentRate)]
    #[storage_mapper("current_rate")]
    fn current_rate(
        &self,
        pool_id: u64,
    ) -> SingleValueMapper<ManagedDecimal<Self::Api, NumDecimals>>;

    #[view(getLastAccrual)]
    #[storage_mapper("last_accrual")]
    fn last_accrual(&self, pool_id: u64) -> SingleValueMapper<u64>;

    #[storage_mapper("deposit_position")]
    fn deposit_position(
        &self,
        pool_id: u64,
        account: &ManagedAddress,
    ) -> SingleValueMapper<DepositPosition<Self::Api>>;

    #[storage_mapper("loan_position")]
    fn loan_position(
        &self,
        pool_id: u64,
        account: &ManagedAddress,
    ) -> SingleValueMapper<LoanPosition<Self::Api>>;

    /// Pools an account has ever deposited into; drives cross-pool
    /// collateral valuation.
    #[view(getAccountDeposits)]
    #[storage_mapper("account_deposits")]
    fn account_deposits(&self, account: &ManagedAddress) -> UnorderedSetMapper<u64>;

    /// Pools an account has ever borrowed from; drives cross-pool debt
    /// valuation.
    #[view(getAccountBorrows)]
    #[storage_mapper("account_borrows")]
    fn account_borrows(&self, account: &ManagedAddress) -> UnorderedSetMapper<u64>;

    #[view(getPriceEntry)]
    #[storage_mapper("price_entry")]
    fn price_entry(&self, pool_id: u64) -> SingleValueMapper<PriceEntry<Self::Api>>;

    #[view(getProtocolParams)]
    #[storage_mapper("protocol_params")]
    fn protocol_params(&self) -> SingleValueMapper<ProtocolParams<Self::Api>>;
}
