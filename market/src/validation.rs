multiversx_sc::imports!();

use common_errors::{ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_POOL_NOT_FOUND};

use crate::storage;

#[multiversx_sc::module]
pub trait ValidationModule: storage::Storage {
    /// Fails with the validation error for reads and writes against an id
    /// that was never registered.
    fn require_pool_exists(&self, pool_id: u64) {
        require!(!self.pool_config(pool_id).is_empty(), ERROR_POOL_NOT_FOUND);
    }

    fn require_amount_greater_than_zero(&self, amount: &BigUint) {
        require!(
            amount > &BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
    }
}
