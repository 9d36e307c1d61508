multiversx_sc::imports!();

use common_constants::WAD_PRECISION;
use common_errors::*;

use crate::{cache::Cache, oracle, storage, utils, validation};

/// Partial liquidation of insolvent accounts.
///
/// A liquidation is one atomic step: the solvency check, the debt
/// repayment and the collateral seizure happen in the same call, so the
/// debtor's health factor cannot move between check and seizure.
#[multiversx_sc::module]
pub trait LiquidationModule:
    storage::Storage
    + validation::ValidationModule
    + oracle::OracleModule
    + utils::UtilsModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + multiversx_sc_modules::pause::PauseModule
{
    /// Repays part of `debtor`'s debt with the attached payment and seizes
    /// collateral shares from `collateral_pool_id` at a bonus. The repay
    /// pool is resolved from the payment asset. The repaid amount is capped
    /// at the close factor; any excess payment is refunded. Returns the
    /// amount actually repaid.
    #[payable("*")]
    #[endpoint(liquidate)]
    fn liquidate(
        &self,
        debtor: ManagedAddress,
        collateral_pool_id: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.require_not_paused();

        let caller = self.blockchain().get_caller();
        require!(caller != debtor, ERROR_SELF_LIQUIDATION);

        let (payment_asset, payment_amount) = self.call_value().egld_or_single_fungible_esdt();
        self.require_amount_greater_than_zero(&payment_amount);

        let repay_pool_mapper = self.pool_by_asset(&payment_asset);
        require!(!repay_pool_mapper.is_empty(), ERROR_POOL_NOT_FOUND);
        let repay_pool_id = repay_pool_mapper.get();
        self.require_pool_exists(collateral_pool_id);

        let params = self.protocol_params().get();

        // The debtor must actually be backing debt with this pool.
        let collateral_mapper = self.deposit_position(collateral_pool_id, &debtor);
        require!(!collateral_mapper.is_empty(), ERROR_NO_COLLATERAL_TOKEN);
        let mut debtor_collateral = collateral_mapper.get();
        require!(debtor_collateral.is_collateral, ERROR_NO_COLLATERAL_TOKEN);

        let loan_mapper = self.loan_position(repay_pool_id, &debtor);
        require!(!loan_mapper.is_empty(), ERROR_NO_LOAN_POSITION);

        // Solvency gate over the debtor's full cross-pool position.
        let collateral_value = self.account_collateral_value(&debtor, None);
        let debt_value = self.account_debt_value(&debtor);
        let health_factor = self.compute_health_factor(&collateral_value, &debt_value);
        require!(health_factor < params.min_health_factor, ERROR_HEALTH_FACTOR);

        // Repay side. The cache commits when it goes out of scope, before
        // the collateral pool is opened, so same-asset liquidations never
        // hold two snapshots of one pool.
        let actual_repay;
        {
            let mut cache = Cache::new(self, repay_pool_id);
            let payment = cache.get_decimal_value(&payment_amount);

            self.global_sync(&mut cache);

            let mut loan = loan_mapper.get();
            let current_debt =
                self.accrued_debt(&loan, &cache.index, cache.config.asset_decimals);
            require!(current_debt > cache.zero, ERROR_NO_LOAN_POSITION);

            let max_repay = self.mul_half_up(
                &current_debt,
                &params.close_factor,
                cache.config.asset_decimals,
            );
            actual_repay = self.get_min(payment.clone(), max_repay);
            let overpaid = payment - actual_repay.clone();

            loan.principal = current_debt - actual_repay.clone();
            loan.index_snapshot = cache.index.clone();
            loan_mapper.set(&loan);

            let reduce = self.get_min(actual_repay.clone(), cache.borrowed.clone());
            cache.borrowed -= &reduce;

            if overpaid > cache.zero {
                self.send_asset(&cache, &overpaid, &caller);
            }

            self.emit_market_update(&cache);
        }

        // Collateral side: price the seizure with the bonus and move shares
        // from the debtor to the liquidator.
        let mut cache = Cache::new(self, collateral_pool_id);
        self.global_sync(&mut cache);

        let repay_price = self.get_asset_price(repay_pool_id);
        let collateral_price = self.get_asset_price(collateral_pool_id);

        let repay_value = self.mul_half_up(&actual_repay, &repay_price, WAD_PRECISION);
        let seize_value =
            self.mul_half_up(&repay_value, &cache.config.liquidation_bonus, WAD_PRECISION);
        let seize_units = self.rescale_half_up(
            &self.div_half_up(&seize_value, &collateral_price, WAD_PRECISION),
            cache.config.asset_decimals,
        );

        let price_per_share = self.share_price(&cache.supplied, &cache.share_supply);
        let seize_shares =
            self.units_to_shares(&seize_units, &price_per_share, cache.config.asset_decimals);
        require!(
            seize_shares <= debtor_collateral.shares,
            ERROR_INSUFFICIENT_LIQUIDATION
        );

        debtor_collateral.shares -= &seize_shares;
        collateral_mapper.set(&debtor_collateral);

        // The configured share of the seizure bonus goes to the protocol's
        // fee recipient; the liquidator keeps the rest.
        let base_units = self.rescale_half_up(
            &self.div_half_up(&repay_value, &collateral_price, WAD_PRECISION),
            cache.config.asset_decimals,
        );
        let base_shares =
            self.units_to_shares(&base_units, &price_per_share, cache.config.asset_decimals);
        let bonus_shares = if seize_shares > base_shares {
            seize_shares.clone() - base_shares
        } else {
            cache.zero.clone()
        };
        let fee_shares = self.mul_half_up(
            &bonus_shares,
            &params.liquidation_fee,
            cache.config.asset_decimals,
        );
        let liquidator_shares = seize_shares.clone() - fee_shares.clone();

        self.credit_deposit_shares(collateral_pool_id, &caller, &liquidator_shares, &cache.zero);
        if fee_shares > cache.zero {
            self.credit_deposit_shares(
                collateral_pool_id,
                &params.fee_recipient,
                &fee_shares,
                &cache.zero,
            );
        }

        self.liquidate_event(
            &debtor,
            &caller,
            repay_pool_id,
            collateral_pool_id,
            actual_repay.into_raw_units(),
            seize_shares.into_raw_units(),
        );
        self.emit_market_update(&cache);

        actual_repay
    }
}
