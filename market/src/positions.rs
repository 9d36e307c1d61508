multiversx_sc::imports!();

use common_errors::*;

use crate::{cache::Cache, oracle, storage, utils, validation};

/// Supply-side position ledger: deposits mint pool shares, withdrawals burn
/// them, and the collateral flag controls whether a balance backs the
/// account's borrows.
#[multiversx_sc::module]
pub trait PositionsModule:
    storage::Storage
    + validation::ValidationModule
    + oracle::OracleModule
    + utils::UtilsModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + multiversx_sc_modules::pause::PauseModule
{
    /// Deposits the attached payment into a pool and mints shares at the
    /// current conversion rate; the first deposit ever mints 1:1 to
    /// bootstrap the pool. Returns the minted shares.
    #[payable("*")]
    #[endpoint(deposit)]
    fn deposit(&self, pool_id: u64) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_not_paused();
        self.require_pool_exists(pool_id);

        let mut cache = Cache::new(self, pool_id);
        require!(cache.config.active, ERROR_POOL_NOT_ACTIVE);

        let amount = self.get_payment_amount(&cache);

        self.global_sync(&mut cache);

        let shares = if cache.share_supply == cache.zero {
            amount.clone()
        } else {
            let price = self.share_price(&cache.supplied, &cache.share_supply);
            self.units_to_shares(&amount, &price, cache.config.asset_decimals)
        };
        require!(shares > cache.zero, ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO);

        let caller = self.blockchain().get_caller();
        self.credit_deposit_shares(pool_id, &caller, &shares, &cache.zero);

        cache.supplied += &amount;
        cache.share_supply += &shares;

        self.deposit_event(
            pool_id,
            &caller,
            amount.into_raw_units(),
            shares.into_raw_units(),
        );
        self.emit_market_update(&cache);

        shares
    }

    /// Withdraws `amount` underlying units by burning the matching shares.
    /// Collateral-flagged positions may only shrink while the account's
    /// aggregate health factor stays above the minimum.
    #[endpoint(withdraw)]
    fn withdraw(&self, pool_id: u64, amount: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_not_paused();
        self.require_pool_exists(pool_id);

        let caller = self.blockchain().get_caller();
        let position_mapper = self.deposit_position(pool_id, &caller);
        require!(!position_mapper.is_empty(), ERROR_NO_DEPOSIT_POSITION);

        let mut cache = Cache::new(self, pool_id);
        require!(cache.config.active, ERROR_POOL_NOT_ACTIVE);

        self.require_amount_greater_than_zero(&amount);
        let amount = cache.get_decimal_value(&amount);

        self.global_sync(&mut cache);

        let price = self.share_price(&cache.supplied, &cache.share_supply);
        let shares_to_burn = self.units_to_shares(&amount, &price, cache.config.asset_decimals);
        require!(shares_to_burn > cache.zero, ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO);

        let mut position = position_mapper.get();
        require!(shares_to_burn <= position.shares, ERROR_INSUFFICIENT_DEPOSIT);
        require!(cache.has_liquidity(&amount), ERROR_INSUFFICIENT_LIQUIDITY);

        if position.is_collateral {
            let debt_value = self.account_debt_value(&caller);
            if debt_value.into_raw_units() > &BigUint::zero() {
                let other_collateral = self.account_collateral_value(&caller, Some(pool_id));
                let remaining_shares = position.shares.clone() - shares_to_burn.clone();
                let remaining_contribution = self.collateral_contribution(
                    pool_id,
                    &remaining_shares,
                    &cache.config,
                    &cache.supplied,
                    &cache.share_supply,
                );
                let health_factor = self
                    .compute_health_factor(&(other_collateral + remaining_contribution), &debt_value);
                require!(
                    health_factor >= self.protocol_params().get().min_health_factor,
                    ERROR_HEALTH_FACTOR_WITHDRAW
                );
            }
        }

        position.shares -= &shares_to_burn;
        position_mapper.set(&position);

        cache.supplied -= &amount;
        cache.share_supply -= &shares_to_burn;

        self.send_asset(&cache, &amount, &caller);

        self.withdraw_event(
            pool_id,
            &caller,
            amount.into_raw_units(),
            shares_to_burn.into_raw_units(),
        );
        self.emit_market_update(&cache);

        amount
    }

    /// Flips whether this pool's balance counts toward borrowing power.
    /// Turning the flag off with a nonzero balance requires the remaining
    /// collateral to still cover the account's debt. Returns the new flag.
    #[endpoint(toggleCollateral)]
    fn toggle_collateral(&self, pool_id: u64) -> bool {
        self.require_not_paused();
        self.require_pool_exists(pool_id);

        let caller = self.blockchain().get_caller();
        let position_mapper = self.deposit_position(pool_id, &caller);
        require!(!position_mapper.is_empty(), ERROR_NO_DEPOSIT_POSITION);

        let mut position = position_mapper.get();

        if position.is_collateral && position.shares.into_raw_units() > &BigUint::zero() {
            let debt_value = self.account_debt_value(&caller);
            if debt_value.into_raw_units() > &BigUint::zero() {
                let remaining_collateral = self.account_collateral_value(&caller, Some(pool_id));
                let health_factor =
                    self.compute_health_factor(&remaining_collateral, &debt_value);
                require!(
                    health_factor >= self.protocol_params().get().min_health_factor,
                    ERROR_HEALTH_FACTOR_BECOME_LOW
                );
            }
        }

        position.is_collateral = !position.is_collateral;
        position_mapper.set(&position);

        self.toggle_collateral_event(pool_id, &caller, position.is_collateral);

        position.is_collateral
    }
}
