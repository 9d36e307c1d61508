#![no_std]

use common_constants::{BPS_PRECISION, WAD_PRECISION};
use common_structs::{AccrualStep, LoanPosition, PoolConfig};

multiversx_sc::imports!();

/// Interest mechanics shared by the state-changing path and the read-only
/// simulation used for cross-pool valuation: the kinked rate curve, the
/// linear accrual step over a pool's aggregates, per-position debt growth
/// and the share/unit conversion rate.
#[multiversx_sc::module]
pub trait InterestRates: common_math::SharedMathModule {
    /// Utilization ratio `borrowed / supplied` in basis points, zero for an
    /// empty pool.
    fn get_utilization(
        &self,
        borrowed: &ManagedDecimal<Self::Api, NumDecimals>,
        supplied: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if supplied.into_raw_units() == &BigUint::zero() {
            return self.bps_zero();
        }
        self.div_half_up(borrowed, supplied, BPS_PRECISION)
    }

    /// The kinked two-segment rate curve.
    ///
    /// Below the target utilization the rate climbs with `rate_multiplier`;
    /// past the kink every extra point of utilization is priced with
    /// `surge_multiplier`:
    /// - `u <= target`: `base + u * multiplier`
    /// - `u > target`: `base + target * multiplier + (u - target) * surge`
    ///
    /// All terms are basis-point decimals; the result is the periodic rate
    /// charged per time unit on the borrowed aggregate.
    fn calculate_lending_rate(
        &self,
        utilization: ManagedDecimal<Self::Api, NumDecimals>,
        config: &PoolConfig<Self::Api>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if utilization <= config.target_utilization {
            let slope = self.mul_half_up(&utilization, &config.rate_multiplier, BPS_PRECISION);
            config.base_rate.clone() + slope
        } else {
            let kink = self.mul_half_up(
                &config.target_utilization,
                &config.rate_multiplier,
                BPS_PRECISION,
            );
            let excess = utilization - config.target_utilization.clone();
            let surge = self.mul_half_up(&excess, &config.surge_multiplier, BPS_PRECISION);
            config.base_rate.clone() + kink + surge
        }
    }

    /// One accrual step over `elapsed > 0` time units.
    ///
    /// Interest is linear in elapsed time: `interest = borrowed * rate * t`.
    /// The borrowed aggregate grows by the full interest, suppliers receive
    /// it net of the reserve factor, and the cumulative index is scaled by
    /// the same `1 + rate * t` growth so that stored principals keep their
    /// proportional claim on the new debt.
    fn accrue_step(
        &self,
        elapsed: u64,
        borrowed: &ManagedDecimal<Self::Api, NumDecimals>,
        supplied: &ManagedDecimal<Self::Api, NumDecimals>,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
        config: &PoolConfig<Self::Api>,
    ) -> AccrualStep<Self::Api> {
        let utilization = self.get_utilization(borrowed, supplied);
        let rate = self.calculate_lending_rate(utilization, config);

        let elapsed_dec = self.to_decimal(BigUint::from(elapsed), 0);
        let growth = self.mul_half_up(&rate, &elapsed_dec, BPS_PRECISION);

        let interest = self.mul_half_up(borrowed, &growth, config.asset_decimals);
        let fee = self.mul_half_up(&interest, &config.reserve_factor, config.asset_decimals);
        let to_suppliers = interest.clone() - fee.clone();

        let growth_factor = self.wad() + growth.rescale(WAD_PRECISION);
        let new_index = self.mul_half_up(index, &growth_factor, WAD_PRECISION);

        AccrualStep {
            borrowed: borrowed.clone() + interest,
            supplied: supplied.clone() + to_suppliers,
            fee,
            index: new_index,
            rate,
        }
    }

    /// Debt accrued to date: `principal * cumulative_index / index_snapshot`,
    /// rescaled back to the asset's decimals.
    fn accrued_debt(
        &self,
        position: &LoanPosition<Self::Api>,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
        asset_decimals: usize,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if position.principal.into_raw_units() == &BigUint::zero() {
            return self.to_decimal(BigUint::zero(), asset_decimals);
        }

        let grown = self.mul_half_up(&position.principal, index, WAD_PRECISION);
        let debt = self.div_half_up(&grown, &position.index_snapshot, WAD_PRECISION);
        self.rescale_half_up(&debt, asset_decimals)
    }

    /// Exchange rate between one pool share and the underlying asset, WAD
    /// scaled. Defined as exactly 1.0 while no shares circulate.
    fn share_price(
        &self,
        supplied: &ManagedDecimal<Self::Api, NumDecimals>,
        share_supply: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if share_supply.into_raw_units() == &BigUint::zero() {
            return self.wad();
        }
        self.div_half_up(supplied, share_supply, WAD_PRECISION)
    }

    fn units_to_shares(
        &self,
        units: &ManagedDecimal<Self::Api, NumDecimals>,
        share_price: &ManagedDecimal<Self::Api, NumDecimals>,
        asset_decimals: usize,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let shares = self.div_half_up(units, share_price, WAD_PRECISION);
        self.rescale_half_up(&shares, asset_decimals)
    }

    fn shares_to_units(
        &self,
        shares: &ManagedDecimal<Self::Api, NumDecimals>,
        share_price: &ManagedDecimal<Self::Api, NumDecimals>,
        asset_decimals: usize,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let units = self.mul_half_up(shares, share_price, WAD_PRECISION);
        self.rescale_half_up(&units, asset_decimals)
    }
}
