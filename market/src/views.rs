multiversx_sc::imports!();

use common_structs::{AccountLiquidity, DepositPosition, LoanPosition};

use crate::{oracle, storage, utils, validation};

/// Read-only endpoints. Pool-keyed views fail on unknown ids; position
/// views fall back to the documented zero records for accounts that never
/// touched the pool.
#[multiversx_sc::module]
pub trait ViewModule:
    storage::Storage
    + validation::ValidationModule
    + oracle::OracleModule
    + utils::UtilsModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
{
    /// Utilization as it would be after accruing now.
    #[view(getUtilization)]
    fn get_utilization_view(&self, pool_id: u64) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_pool_exists(pool_id);
        let (supplied, borrowed, _) = self.simulate_pool_state(pool_id);
        self.get_utilization(&borrowed, &supplied)
    }

    /// The periodic rate the pool would charge right now.
    #[view(getLendingRate)]
    fn get_lending_rate(&self, pool_id: u64) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_pool_exists(pool_id);
        let config = self.pool_config(pool_id).get();
        let (supplied, borrowed, _) = self.simulate_pool_state(pool_id);
        let utilization = self.get_utilization(&borrowed, &supplied);
        self.calculate_lending_rate(utilization, &config)
    }

    /// Exchange rate between one pool share and the underlying, WAD scaled,
    /// including interest accrued up to now.
    #[view(getSharePrice)]
    fn get_share_price(&self, pool_id: u64) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_pool_exists(pool_id);
        let (supplied, _, _) = self.simulate_pool_state(pool_id);
        let share_supply = self.share_supply(pool_id).get();
        self.share_price(&supplied, &share_supply)
    }

    #[view(getDepositPosition)]
    fn get_deposit_position(
        &self,
        pool_id: u64,
        account: ManagedAddress,
    ) -> DepositPosition<Self::Api> {
        self.require_pool_exists(pool_id);
        let mapper = self.deposit_position(pool_id, &account);
        if mapper.is_empty() {
            let config = self.pool_config(pool_id).get();
            DepositPosition::zero(config.asset_decimals)
        } else {
            mapper.get()
        }
    }

    #[view(getLoanPosition)]
    fn get_loan_position(&self, pool_id: u64, account: ManagedAddress) -> LoanPosition<Self::Api> {
        self.require_pool_exists(pool_id);
        let mapper = self.loan_position(pool_id, &account);
        if mapper.is_empty() {
            let config = self.pool_config(pool_id).get();
            let zero = self.to_decimal(BigUint::zero(), config.asset_decimals);
            LoanPosition::new(zero, self.cumulative_index(pool_id).get())
        } else {
            mapper.get()
        }
    }

    /// Debt accrued to date, including interest since the position's last
    /// settlement.
    #[view(getAccruedDebt)]
    fn get_accrued_debt(
        &self,
        pool_id: u64,
        account: ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_pool_exists(pool_id);
        let config = self.pool_config(pool_id).get();
        let mapper = self.loan_position(pool_id, &account);
        if mapper.is_empty() {
            return self.to_decimal(BigUint::zero(), config.asset_decimals);
        }
        let (_, _, index) = self.simulate_pool_state(pool_id);
        self.accrued_debt(&mapper.get(), &index, config.asset_decimals)
    }

    /// Cross-pool account summary: collateral value, debt value and the
    /// resulting health factor, all WAD.
    #[view(getAccountLiquidity)]
    fn get_account_liquidity(&self, account: ManagedAddress) -> AccountLiquidity<Self::Api> {
        let collateral_value = self.account_collateral_value(&account, None);
        let debt_value = self.account_debt_value(&account);
        let health_factor = self.compute_health_factor(&collateral_value, &debt_value);
        AccountLiquidity {
            collateral_value,
            debt_value,
            health_factor,
        }
    }

    #[view(getHealthFactor)]
    fn get_health_factor(&self, account: ManagedAddress) -> ManagedDecimal<Self::Api, NumDecimals> {
        let collateral_value = self.account_collateral_value(&account, None);
        let debt_value = self.account_debt_value(&account);
        self.compute_health_factor(&collateral_value, &debt_value)
    }
}
