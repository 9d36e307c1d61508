#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Static configuration of a lending pool. Risk factors and the rate curve
/// are basis-point decimals, amounts elsewhere carry `asset_decimals`.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct PoolConfig<M: ManagedTypeApi> {
    pub asset_id: EgldOrEsdtTokenIdentifier<M>,
    pub asset_decimals: usize,
    pub name: ManagedBuffer<M>,
    pub active: bool,
    /// Fraction of this pool's collateral value that counts toward
    /// borrowing power (< 100%).
    pub collateral_factor: ManagedDecimal<M, NumDecimals>,
    /// Fraction of accrued interest kept by the protocol (<= 50%).
    pub reserve_factor: ManagedDecimal<M, NumDecimals>,
    /// Seizure pricing multiplier paid to liquidators (> 100%).
    pub liquidation_bonus: ManagedDecimal<M, NumDecimals>,
    pub base_rate: ManagedDecimal<M, NumDecimals>,
    pub rate_multiplier: ManagedDecimal<M, NumDecimals>,
    pub surge_multiplier: ManagedDecimal<M, NumDecimals>,
    pub target_utilization: ManagedDecimal<M, NumDecimals>,
}

/// Display metadata of a pool's share token. Circulating supply lives in its
/// own storage mapper next to the pool aggregates.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct ShareToken<M: ManagedTypeApi> {
    pub name: ManagedBuffer<M>,
    pub ticker: ManagedBuffer<M>,
}

/// A supplier's holding in one pool: share balance plus whether it backs
/// the account's borrows. Never deleted, a zero balance is a valid state.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct DepositPosition<M: ManagedTypeApi> {
    pub shares: ManagedDecimal<M, NumDecimals>,
    pub is_collateral: bool,
}

impl<M: ManagedTypeApi> DepositPosition<M> {
    pub fn new(shares: ManagedDecimal<M, NumDecimals>, is_collateral: bool) -> Self {
        DepositPosition {
            shares,
            is_collateral,
        }
    }

    /// The documented fallback for accounts that never deposited.
    pub fn zero(asset_decimals: usize) -> Self {
        DepositPosition {
            shares: ManagedDecimal::from_raw_units(BigUint::zero(), asset_decimals),
            is_collateral: false,
        }
    }
}

/// A borrower's debt in one pool. The live debt is always
/// `principal * cumulative_index / index_snapshot`, so interest accrues
/// proportionally without touching individual records.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct LoanPosition<M: ManagedTypeApi> {
    pub principal: ManagedDecimal<M, NumDecimals>,
    pub index_snapshot: ManagedDecimal<M, NumDecimals>,
}

impl<M: ManagedTypeApi> LoanPosition<M> {
    pub fn new(
        principal: ManagedDecimal<M, NumDecimals>,
        index_snapshot: ManagedDecimal<M, NumDecimals>,
    ) -> Self {
        LoanPosition {
            principal,
            index_snapshot,
        }
    }
}

/// Per-pool price entry, written by the registered oracle account and read
/// under the staleness contract. The cached price is normalized to 1e18 per
/// whole asset unit regardless of the submitted precision.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct PriceEntry<M: ManagedTypeApi> {
    pub oracle: ManagedAddress<M>,
    pub price_decimals: usize,
    pub price: ManagedDecimal<M, NumDecimals>,
    pub updated_at: u64,
}

/// Protocol-wide risk parameters.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct ProtocolParams<M: ManagedTypeApi> {
    pub fee_recipient: ManagedAddress<M>,
    /// Maximum fraction of a debt repayable in one liquidation call.
    pub close_factor: ManagedDecimal<M, NumDecimals>,
    /// Share of the seizure bonus routed to the fee recipient (0 disables).
    pub liquidation_fee: ManagedDecimal<M, NumDecimals>,
    pub min_health_factor: ManagedDecimal<M, NumDecimals>,
    /// Discount applied to collateral value before the health comparison.
    pub liquidation_boundary: ManagedDecimal<M, NumDecimals>,
    /// Seconds a submitted price stays usable.
    pub price_max_age: u64,
}

/// Result of one pure accrual step over a pool's aggregates.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct AccrualStep<M: ManagedTypeApi> {
    pub borrowed: ManagedDecimal<M, NumDecimals>,
    pub supplied: ManagedDecimal<M, NumDecimals>,
    pub fee: ManagedDecimal<M, NumDecimals>,
    pub index: ManagedDecimal<M, NumDecimals>,
    pub rate: ManagedDecimal<M, NumDecimals>,
}

/// Cross-pool account summary returned by the liquidity views.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct AccountLiquidity<M: ManagedTypeApi> {
    pub collateral_value: ManagedDecimal<M, NumDecimals>,
    pub debt_value: ManagedDecimal<M, NumDecimals>,
    pub health_factor: ManagedDecimal<M, NumDecimals>,
}
