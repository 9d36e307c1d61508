multiversx_sc::imports!();

use common_constants::{BPS, MAX_LIQUIDATION_BONUS, MAX_RESERVE_FACTOR};
use common_errors::*;
use common_structs::{PoolConfig, PriceEntry, ProtocolParams, ShareToken};

use crate::{storage, validation};

/// Administration of pools, protocol parameters and price sources. All
/// endpoints here are owner-only; the rest of the engine only reads what
/// this module writes.
#[multiversx_sc::module]
pub trait ConfigModule:
    storage::Storage
    + validation::ValidationModule
    + common_events::EventsModule
    + common_math::SharedMathModule
{
    /// Creates a new pool for an asset, with its share-token metadata, risk
    /// factors and rate curve. Aggregates start at zero, the cumulative
    /// index at 1.0. Returns the new pool id.
    #[only_owner]
    #[endpoint(registerPool)]
    fn register_pool(
        &self,
        asset: EgldOrEsdtTokenIdentifier,
        asset_decimals: usize,
        name: ManagedBuffer,
        share_name: ManagedBuffer,
        share_ticker: ManagedBuffer,
        collateral_factor: BigUint,
        reserve_factor: BigUint,
        liquidation_bonus: BigUint,
        base_rate: BigUint,
        rate_multiplier: BigUint,
        surge_multiplier: BigUint,
        target_utilization: BigUint,
    ) -> u64 {
        require!(!name.is_empty(), ERROR_EMPTY_POOL_NAME);

        let asset_map = self.pool_by_asset(&asset);
        require!(asset_map.is_empty(), ERROR_ASSET_ALREADY_SUPPORTED);

        let bps = BigUint::from(BPS);
        require!(collateral_factor < bps, ERROR_INVALID_COLLATERAL_FACTOR);
        require!(
            reserve_factor <= BigUint::from(MAX_RESERVE_FACTOR),
            ERROR_INVALID_RESERVE_FACTOR
        );
        require!(
            liquidation_bonus > bps
                && liquidation_bonus <= bps.clone() + BigUint::from(MAX_LIQUIDATION_BONUS),
            ERROR_INVALID_LIQUIDATION_BONUS
        );
        require!(target_utilization <= bps, ERROR_INVALID_TARGET_UTILIZATION);

        let pool_id = self.last_pool_id().update(|id| {
            *id += 1;
            *id
        });

        self.pool_config(pool_id).set(&PoolConfig {
            asset_id: asset.clone(),
            asset_decimals,
            name: name.clone(),
            active: true,
            collateral_factor: self.to_decimal_bps(collateral_factor),
            reserve_factor: self.to_decimal_bps(reserve_factor),
            liquidation_bonus: self.to_decimal_bps(liquidation_bonus),
            base_rate: self.to_decimal_bps(base_rate),
            rate_multiplier: self.to_decimal_bps(rate_multiplier),
            surge_multiplier: self.to_decimal_bps(surge_multiplier),
            target_utilization: self.to_decimal_bps(target_utilization),
        });
        asset_map.set(pool_id);

        self.share_token(pool_id).set(&ShareToken {
            name: share_name,
            ticker: share_ticker,
        });

        let zero = self.to_decimal(BigUint::zero(), asset_decimals);
        self.supplied(pool_id).set(&zero);
        self.borrowed(pool_id).set(&zero);
        self.revenue(pool_id).set(&zero);
        self.share_supply(pool_id).set(&zero);

        self.cumulative_index(pool_id).set(self.wad());
        self.current_rate(pool_id).set(self.bps_zero());
        self.last_accrual(pool_id)
            .set(self.blockchain().get_block_timestamp());

        self.register_pool_event(pool_id, &asset, &name);

        pool_id
    }

    /// Flips a pool in or out of service. Inactive pools refuse deposits,
    /// withdrawals and borrows; repayments and liquidations stay open.
    #[only_owner]
    #[endpoint(setPoolActive)]
    fn set_pool_active(&self, pool_id: u64, active: bool) {
        self.require_pool_exists(pool_id);

        self.pool_config(pool_id).update(|config| {
            config.active = active;
        });

        self.set_pool_active_event(pool_id, active);
    }

    #[only_owner]
    #[endpoint(setProtocolParams)]
    fn set_protocol_params(
        &self,
        fee_recipient: ManagedAddress,
        close_factor: BigUint,
        liquidation_fee: BigUint,
        min_health_factor: BigUint,
        liquidation_boundary: BigUint,
        price_max_age: u64,
    ) {
        self.store_protocol_params(
            fee_recipient,
            close_factor,
            liquidation_fee,
            min_health_factor,
            liquidation_boundary,
            price_max_age,
        );
    }

    /// Points a pool at an oracle account. Any previously cached price is
    /// discarded; the new source must submit before risk-bearing operations
    /// can price this pool again.
    #[only_owner]
    #[endpoint(setPriceSource)]
    fn set_price_source(&self, pool_id: u64, oracle: ManagedAddress, price_decimals: usize) {
        self.require_pool_exists(pool_id);

        self.price_entry(pool_id).set(&PriceEntry {
            oracle: oracle.clone(),
            price_decimals,
            price: self.wad_zero(),
            updated_at: 0,
        });

        self.set_price_source_event(pool_id, &oracle, price_decimals as u64);
    }

    fn store_protocol_params(
        &self,
        fee_recipient: ManagedAddress,
        close_factor: BigUint,
        liquidation_fee: BigUint,
        min_health_factor: BigUint,
        liquidation_boundary: BigUint,
        price_max_age: u64,
    ) {
        let bps = BigUint::from(BPS);
        require!(
            close_factor > BigUint::zero() && close_factor <= bps,
            ERROR_INVALID_CLOSE_FACTOR
        );
        require!(liquidation_fee < bps, ERROR_INVALID_LIQUIDATION_FEE);
        require!(
            min_health_factor > BigUint::zero(),
            ERROR_INVALID_MIN_HEALTH_FACTOR
        );
        require!(
            liquidation_boundary <= bps,
            ERROR_INVALID_LIQUIDATION_BOUNDARY
        );

        self.update_protocol_params_event(
            &fee_recipient,
            &close_factor,
            &liquidation_fee,
            &min_health_factor,
            &liquidation_boundary,
            price_max_age,
        );

        self.protocol_params().set(&ProtocolParams {
            fee_recipient,
            close_factor: self.to_decimal_bps(close_factor),
            liquidation_fee: self.to_decimal_bps(liquidation_fee),
            min_health_factor: self.to_decimal_wad(min_health_factor),
            liquidation_boundary: self.to_decimal_bps(liquidation_boundary),
            price_max_age,
        });
    }
}
