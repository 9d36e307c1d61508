multiversx_sc::imports!();

use common_constants::WAD_PRECISION;
use common_errors::{
    ERROR_NO_LAST_PRICE_FOUND, ERROR_PRICE_SOURCE_NOT_SET, ERROR_PRICE_STALE,
    ERROR_UNAUTHORIZED_PRICE_SOURCE,
};

use crate::{storage, validation};

/// Price entries per pool. The engine never fetches prices itself: the
/// registered oracle account pushes them, and every risk-bearing read
/// enforces the staleness contract.
#[multiversx_sc::module]
pub trait OracleModule:
    storage::Storage
    + validation::ValidationModule
    + common_events::EventsModule
    + common_math::SharedMathModule
{
    /// Records a new price for the pool's asset. The raw value is scaled
    /// with the precision registered for this source and cached WAD
    /// normalized, per whole asset unit.
    #[endpoint(submitPrice)]
    fn submit_price(&self, pool_id: u64, price: BigUint) {
        self.require_pool_exists(pool_id);
        self.require_amount_greater_than_zero(&price);

        let mapper = self.price_entry(pool_id);
        require!(!mapper.is_empty(), ERROR_PRICE_SOURCE_NOT_SET);

        let mut entry = mapper.get();
        require!(
            self.blockchain().get_caller() == entry.oracle,
            ERROR_UNAUTHORIZED_PRICE_SOURCE
        );

        let submitted = self.to_decimal(price, entry.price_decimals);
        entry.price = self.rescale_half_up(&submitted, WAD_PRECISION);
        entry.updated_at = self.blockchain().get_block_timestamp();
        mapper.set(&entry);

        self.submit_price_event(pool_id, entry.price.into_raw_units(), entry.updated_at);
    }

    /// Current price of the pool's asset, WAD per whole unit. Rejects pools
    /// without a source, sources that never submitted, and entries older
    /// than the protocol's maximum price age.
    fn get_asset_price(&self, pool_id: u64) -> ManagedDecimal<Self::Api, NumDecimals> {
        let mapper = self.price_entry(pool_id);
        require!(!mapper.is_empty(), ERROR_PRICE_SOURCE_NOT_SET);

        let entry = mapper.get();
        require!(entry.updated_at > 0, ERROR_NO_LAST_PRICE_FOUND);

        let max_age = self.protocol_params().get().price_max_age;
        let now = self.blockchain().get_block_timestamp();
        require!(now - entry.updated_at <= max_age, ERROR_PRICE_STALE);

        entry.price
    }
}
