multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use common_constants::WAD_PRECISION;
use common_errors::ERROR_INVALID_ASSET;
use common_structs::{DepositPosition, PoolConfig};

use crate::{cache::Cache, oracle, storage, validation};

/// Accrual glue, the conversion engine and cross-pool account valuation.
#[multiversx_sc::module]
pub trait UtilsModule:
    storage::Storage
    + validation::ValidationModule
    + oracle::OracleModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
{
    /// Advances the pool's aggregates and cumulative index to the current
    /// block. Idempotent within one time unit: zero elapsed time leaves the
    /// cache untouched, so repeated calls never double-accrue.
    ///
    /// Mandatory first step of every operation that reads or mutates pool
    /// state; skipping it would break the proportional-accrual invariant of
    /// the loan positions.
    fn global_sync(&self, cache: &mut Cache<Self>) {
        let elapsed = cache.timestamp - cache.last_accrual;
        if elapsed > 0 {
            let step = self.accrue_step(
                elapsed,
                &cache.borrowed,
                &cache.supplied,
                &cache.index,
                &cache.config,
            );

            cache.borrowed = step.borrowed;
            cache.supplied = step.supplied;
            cache.revenue += &step.fee;
            cache.index = step.index;
            cache.rate = step.rate;
            cache.last_accrual = cache.timestamp;
        }
    }

    /// Accrues a pool and returns the periodic rate in force.
    #[endpoint(accrue)]
    fn accrue(&self, pool_id: u64) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_pool_exists(pool_id);

        let mut cache = Cache::new(self, pool_id);
        self.global_sync(&mut cache);
        self.emit_market_update(&cache);

        cache.rate.clone()
    }

    /// Pool aggregates and index as they would be after accruing now,
    /// without writing anything. Cross-pool valuation uses this so that
    /// pools untouched in the current block are still priced consistently.
    fn simulate_pool_state(
        &self,
        pool_id: u64,
    ) -> (
        ManagedDecimal<Self::Api, NumDecimals>, // supplied
        ManagedDecimal<Self::Api, NumDecimals>, // borrowed
        ManagedDecimal<Self::Api, NumDecimals>, // cumulative index
    ) {
        let supplied = self.supplied(pool_id).get();
        let borrowed = self.borrowed(pool_id).get();
        let index = self.cumulative_index(pool_id).get();

        let now = self.blockchain().get_block_timestamp();
        let elapsed = now - self.last_accrual(pool_id).get();
        if elapsed == 0 {
            return (supplied, borrowed, index);
        }

        let config = self.pool_config(pool_id).get();
        let step = self.accrue_step(elapsed, &borrowed, &supplied, &index, &config);
        (step.supplied, step.borrowed, step.index)
    }

    /// WAD value this pool contributes to the account's borrowing power:
    /// share balance in units, priced, weighted by the pool's collateral
    /// factor.
    fn collateral_contribution(
        &self,
        pool_id: u64,
        shares: &ManagedDecimal<Self::Api, NumDecimals>,
        config: &PoolConfig<Self::Api>,
        supplied: &ManagedDecimal<Self::Api, NumDecimals>,
        share_supply: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let price_per_share = self.share_price(supplied, share_supply);
        let units = self.shares_to_units(shares, &price_per_share, config.asset_decimals);
        let value = self.mul_half_up(&units, &self.get_asset_price(pool_id), WAD_PRECISION);
        self.mul_half_up(&value, &config.collateral_factor, WAD_PRECISION)
    }

    /// Aggregate collateral value over every collateral-flagged deposit,
    /// optionally excluding one pool (used for withdrawal and collateral
    /// toggle checks).
    fn account_collateral_value(
        &self,
        account: &ManagedAddress,
        skip_pool: Option<u64>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mut total = self.wad_zero();
        for pool_id in self.account_deposits(account).iter() {
            if skip_pool == Some(pool_id) {
                continue;
            }
            let position = self.deposit_position(pool_id, account).get();
            if !position.is_collateral || position.shares.into_raw_units() == &BigUint::zero() {
                continue;
            }
            let config = self.pool_config(pool_id).get();
            let (supplied, _, _) = self.simulate_pool_state(pool_id);
            let share_supply = self.share_supply(pool_id).get();
            total += self.collateral_contribution(
                pool_id,
                &position.shares,
                &config,
                &supplied,
                &share_supply,
            );
        }
        total
    }

    /// Aggregate accrued debt value over every loan position.
    fn account_debt_value(
        &self,
        account: &ManagedAddress,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mut total = self.wad_zero();
        for pool_id in self.account_borrows(account).iter() {
            let position = self.loan_position(pool_id, account).get();
            if position.principal.into_raw_units() == &BigUint::zero() {
                continue;
            }
            let config = self.pool_config(pool_id).get();
            let (_, _, index) = self.simulate_pool_state(pool_id);
            let debt_units = self.accrued_debt(&position, &index, config.asset_decimals);
            total += self.mul_half_up(&debt_units, &self.get_asset_price(pool_id), WAD_PRECISION);
        }
        total
    }

    /// Discounted collateral over debt, WAD. An account with no debt is
    /// infinitely healthy and reports the maximum representable value.
    fn compute_health_factor(
        &self,
        collateral_value: &ManagedDecimal<Self::Api, NumDecimals>,
        debt_value: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if debt_value.into_raw_units() == &BigUint::zero() {
            return self.to_decimal_wad(BigUint::from(u128::MAX));
        }

        let boundary = self.protocol_params().get().liquidation_boundary;
        let discounted = self.mul_half_up(collateral_value, &boundary, WAD_PRECISION);
        self.div_half_up(&discounted, debt_value, WAD_PRECISION)
    }

    /// Adds shares to an account's deposit position, creating the record
    /// with the collateral flag on first contact with the pool.
    fn credit_deposit_shares(
        &self,
        pool_id: u64,
        account: &ManagedAddress,
        shares: &ManagedDecimal<Self::Api, NumDecimals>,
        zero: &ManagedDecimal<Self::Api, NumDecimals>,
    ) {
        let mapper = self.deposit_position(pool_id, account);
        let mut position = if mapper.is_empty() {
            self.account_deposits(account).insert(pool_id);
            DepositPosition::new(zero.clone(), true)
        } else {
            mapper.get()
        };
        position.shares += shares;
        mapper.set(&position);
    }

    /// Extracts and validates the single payment attached to the call.
    fn get_payment_amount(&self, cache: &Cache<Self>) -> ManagedDecimal<Self::Api, NumDecimals> {
        let (asset, amount) = self.call_value().egld_or_single_fungible_esdt();

        require!(cache.is_same_asset(&asset), ERROR_INVALID_ASSET);
        self.require_amount_greater_than_zero(&amount);

        cache.get_decimal_value(&amount)
    }

    fn send_asset(
        &self,
        cache: &Cache<Self>,
        amount: &ManagedDecimal<Self::Api, NumDecimals>,
        to: &ManagedAddress,
    ) -> EgldOrEsdtTokenPayment<Self::Api> {
        let payment = EgldOrEsdtTokenPayment::new(
            cache.config.asset_id.clone(),
            0,
            amount.into_raw_units().clone(),
        );

        self.tx().to(to).payment(&payment).transfer_if_not_empty();

        payment
    }

    #[inline(always)]
    fn emit_market_update(&self, cache: &Cache<Self>) {
        self.update_market_state_event(
            cache.pool_id,
            cache.timestamp,
            cache.index.into_raw_units(),
            cache.supplied.into_raw_units(),
            cache.borrowed.into_raw_units(),
            cache.revenue.into_raw_units(),
            cache.rate.into_raw_units(),
        );
    }
}
