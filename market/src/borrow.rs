multiversx_sc::imports!();

use common_constants::WAD_PRECISION;
use common_errors::*;
use common_structs::LoanPosition;

use crate::{cache::Cache, oracle, storage, utils, validation};

/// Debt-side position ledger. Loan records store a principal and the
/// cumulative index at which it was last settled; every read or mutation
/// folds accrued interest forward and re-snapshots the index.
#[multiversx_sc::module]
pub trait BorrowModule:
    storage::Storage
    + validation::ValidationModule
    + oracle::OracleModule
    + utils::UtilsModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + multiversx_sc_modules::pause::PauseModule
{
    /// Borrows `amount` units against the account's aggregate collateral.
    /// The health factor including the new debt is checked before any state
    /// is mutated, so a rejected borrow leaves no trace.
    #[endpoint(borrow)]
    fn borrow(&self, pool_id: u64, amount: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_not_paused();
        self.require_pool_exists(pool_id);

        let mut cache = Cache::new(self, pool_id);
        require!(cache.config.active, ERROR_POOL_NOT_ACTIVE);

        self.require_amount_greater_than_zero(&amount);
        let amount = cache.get_decimal_value(&amount);

        self.global_sync(&mut cache);

        require!(cache.has_liquidity(&amount), ERROR_INSUFFICIENT_LIQUIDITY);

        let caller = self.blockchain().get_caller();

        let price = self.get_asset_price(pool_id);
        let borrow_value = self.mul_half_up(&amount, &price, WAD_PRECISION);
        let debt_value = self.account_debt_value(&caller) + borrow_value;
        let collateral_value = self.account_collateral_value(&caller, None);
        let health_factor = self.compute_health_factor(&collateral_value, &debt_value);
        require!(
            health_factor >= self.protocol_params().get().min_health_factor,
            ERROR_HEALTH_FACTOR_BECOME_LOW
        );

        let position_mapper = self.loan_position(pool_id, &caller);
        let mut position = if position_mapper.is_empty() {
            self.account_borrows(&caller).insert(pool_id);
            LoanPosition::new(cache.zero.clone(), cache.index.clone())
        } else {
            position_mapper.get()
        };

        let current_debt =
            self.accrued_debt(&position, &cache.index, cache.config.asset_decimals);
        position.principal = current_debt + amount.clone();
        position.index_snapshot = cache.index.clone();
        position_mapper.set(&position);

        cache.borrowed += &amount;

        self.send_asset(&cache, &amount, &caller);

        self.borrow_event(pool_id, &caller, amount.into_raw_units());
        self.emit_market_update(&cache);

        amount
    }

    /// Repays the attached payment against the caller's accrued debt.
    /// Overpayment is refunded; the applied amount is returned. Repayment
    /// stays open on inactive pools.
    #[payable("*")]
    #[endpoint(repay)]
    fn repay(&self, pool_id: u64) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_not_paused();
        self.require_pool_exists(pool_id);

        let caller = self.blockchain().get_caller();
        let position_mapper = self.loan_position(pool_id, &caller);
        require!(!position_mapper.is_empty(), ERROR_NO_LOAN_POSITION);

        let mut cache = Cache::new(self, pool_id);
        let payment = self.get_payment_amount(&cache);

        self.global_sync(&mut cache);

        let mut position = position_mapper.get();
        let current_debt =
            self.accrued_debt(&position, &cache.index, cache.config.asset_decimals);
        require!(current_debt > cache.zero, ERROR_NO_LOAN_POSITION);

        let (applied, overpaid) = if payment >= current_debt {
            (current_debt.clone(), payment - current_debt.clone())
        } else {
            (payment, cache.zero.clone())
        };

        position.principal = current_debt - applied.clone();
        position.index_snapshot = cache.index.clone();
        position_mapper.set(&position);

        // Aggregate and per-position debt are rounded independently, so the
        // last repayment may exceed the remaining aggregate by one raw unit.
        let reduce = self.get_min(applied.clone(), cache.borrowed.clone());
        cache.borrowed -= &reduce;

        if overpaid > cache.zero {
            self.send_asset(&cache, &overpaid, &caller);
        }

        self.repay_event(pool_id, &caller, applied.into_raw_units());
        self.emit_market_update(&cache);

        applied
    }
}
