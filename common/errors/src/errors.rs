#![no_std]

// Validation

pub static ERROR_POOL_NOT_FOUND: &[u8] = b"No pool found for this id.";

pub static ERROR_ASSET_ALREADY_SUPPORTED: &[u8] = b"Asset already has a registered pool.";

pub static ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO: &[u8] = b"Amount must be greater than zero.";

pub static ERROR_EMPTY_POOL_NAME: &[u8] = b"Pool name cannot be empty.";

pub static ERROR_INVALID_COLLATERAL_FACTOR: &[u8] = b"Collateral factor must be below 100%.";

pub static ERROR_INVALID_RESERVE_FACTOR: &[u8] = b"Reserve factor cannot exceed 50%.";

pub static ERROR_INVALID_LIQUIDATION_BONUS: &[u8] =
    b"Liquidation bonus must be above 100% and within the allowed range.";

pub static ERROR_INVALID_TARGET_UTILIZATION: &[u8] = b"Target utilization cannot exceed 100%.";

pub static ERROR_INVALID_CLOSE_FACTOR: &[u8] = b"Close factor must be between 0 and 100%.";

pub static ERROR_INVALID_LIQUIDATION_BOUNDARY: &[u8] =
    b"Liquidation boundary cannot exceed 100%.";

pub static ERROR_INVALID_LIQUIDATION_FEE: &[u8] = b"Liquidation fee must be below 100%.";

pub static ERROR_INVALID_MIN_HEALTH_FACTOR: &[u8] =
    b"Minimum health factor must be greater than zero.";

pub static ERROR_INVALID_ASSET: &[u8] = b"Asset sent does not match the pool asset.";

// State

pub static ERROR_POOL_NOT_ACTIVE: &[u8] = b"Pool is not active.";

pub static ERROR_NO_DEPOSIT_POSITION: &[u8] = b"No deposit position for this account.";

pub static ERROR_NO_LOAN_POSITION: &[u8] = b"No loan position for this account.";

// Solvency

pub static ERROR_INSUFFICIENT_DEPOSIT: &[u8] = b"Not enough shares deposited for this account.";

pub static ERROR_INSUFFICIENT_LIQUIDITY: &[u8] = b"Insufficient liquidity.";

pub static ERROR_HEALTH_FACTOR: &[u8] = b"Health not low enough for liquidation.";

pub static ERROR_HEALTH_FACTOR_WITHDRAW: &[u8] =
    b"Health factor will be too low after withdrawal.";

pub static ERROR_HEALTH_FACTOR_BECOME_LOW: &[u8] = b"Health factor will be too low.";

pub static ERROR_SELF_LIQUIDATION: &[u8] = b"Cannot liquidate own account.";

pub static ERROR_NO_COLLATERAL_TOKEN: &[u8] = b"Debtor does not use this pool as collateral.";

pub static ERROR_INSUFFICIENT_LIQUIDATION: &[u8] =
    b"Insufficient collateral for this liquidation size.";

// Oracle

pub static ERROR_PRICE_SOURCE_NOT_SET: &[u8] = b"No price source set for this pool.";

pub static ERROR_NO_LAST_PRICE_FOUND: &[u8] = b"No last price found.";

pub static ERROR_PRICE_STALE: &[u8] = b"Price is too old for this action.";

pub static ERROR_UNAUTHORIZED_PRICE_SOURCE: &[u8] =
    b"Caller is not the registered price source.";
