#![no_std]

/// Basis points, the fixed-point scale for fractions, factors, utilization
/// ratios and periodic rates (10_000 == 100%).
pub const BPS: u64 = 10_000;
pub const BPS_PRECISION: usize = 4;

/// The fixed-point scale for the cumulative interest index, normalized
/// prices, values and health factors (1e18 == 1.0).
pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const WAD_PRECISION: usize = 18;

/// Maximum liquidation bonus on top of 100% (25%).
pub const MAX_LIQUIDATION_BONUS: u64 = 2_500;

/// The protocol may keep at most half of accrued interest (50%).
pub const MAX_RESERVE_FACTOR: u64 = 5_000;
