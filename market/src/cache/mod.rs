use common_structs::PoolConfig;

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// In-memory snapshot of one pool's mutable state.
///
/// Constructed at the top of every state-changing operation and committed
/// back to storage when dropped, so a pool's aggregates, index and rate are
/// always read and written as one unit.
pub struct Cache<'a, C>
where
    C: crate::storage::Storage,
{
    sc_ref: &'a C,
    pub pool_id: u64,
    pub config: PoolConfig<C::Api>,
    pub supplied: ManagedDecimal<C::Api, NumDecimals>,
    pub borrowed: ManagedDecimal<C::Api, NumDecimals>,
    pub revenue: ManagedDecimal<C::Api, NumDecimals>,
    pub share_supply: ManagedDecimal<C::Api, NumDecimals>,
    pub index: ManagedDecimal<C::Api, NumDecimals>,
    pub rate: ManagedDecimal<C::Api, NumDecimals>,
    pub last_accrual: u64,
    /// Current block timestamp, read once.
    pub timestamp: u64,
    /// Zero with this pool's asset decimals, for comparisons.
    pub zero: ManagedDecimal<C::Api, NumDecimals>,
}

impl<'a, C> Cache<'a, C>
where
    C: crate::storage::Storage + common_math::SharedMathModule,
{
    /// Reads the pool's full state. The pool id must be validated by the
    /// caller beforehand.
    pub fn new(sc_ref: &'a C, pool_id: u64) -> Self {
        let config = sc_ref.pool_config(pool_id).get();
        Cache {
            zero: sc_ref.to_decimal(BigUint::zero(), config.asset_decimals),
            supplied: sc_ref.supplied(pool_id).get(),
            borrowed: sc_ref.borrowed(pool_id).get(),
            revenue: sc_ref.revenue(pool_id).get(),
            share_supply: sc_ref.share_supply(pool_id).get(),
            index: sc_ref.cumulative_index(pool_id).get(),
            rate: sc_ref.current_rate(pool_id).get(),
            last_accrual: sc_ref.last_accrual(pool_id).get(),
            timestamp: sc_ref.blockchain().get_block_timestamp(),
            pool_id,
            config,
            sc_ref,
        }
    }
}

impl<C> Drop for Cache<'_, C>
where
    C: crate::storage::Storage,
{
    fn drop(&mut self) {
        // commit the mutable fields back to storage
        self.sc_ref.supplied(self.pool_id).set(&self.supplied);
        self.sc_ref.borrowed(self.pool_id).set(&self.borrowed);
        self.sc_ref.revenue(self.pool_id).set(&self.revenue);
        self.sc_ref
            .share_supply(self.pool_id)
            .set(&self.share_supply);
        self.sc_ref.cumulative_index(self.pool_id).set(&self.index);
        self.sc_ref.current_rate(self.pool_id).set(&self.rate);
        self.sc_ref.last_accrual(self.pool_id).set(self.last_accrual);
    }
}

impl<C> Cache<'_, C>
where
    C: crate::storage::Storage + common_math::SharedMathModule,
{
    pub fn get_decimal_value(
        &self,
        value: &BigUint<C::Api>,
    ) -> ManagedDecimal<C::Api, NumDecimals> {
        self.sc_ref
            .to_decimal(value.clone(), self.config.asset_decimals)
    }

    /// Units that can leave the pool without pushing utilization past 100%.
    pub fn available_liquidity(&self) -> ManagedDecimal<C::Api, NumDecimals> {
        if self.borrowed >= self.supplied {
            self.zero.clone()
        } else {
            self.supplied.clone() - self.borrowed.clone()
        }
    }

    pub fn has_liquidity(&self, amount: &ManagedDecimal<C::Api, NumDecimals>) -> bool {
        self.available_liquidity() >= *amount
    }

    pub fn is_same_asset(&self, asset: &EgldOrEsdtTokenIdentifier<C::Api>) -> bool {
        self.config.asset_id == *asset
    }
}
