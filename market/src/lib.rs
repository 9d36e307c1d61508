#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub mod borrow;
pub mod cache;
pub mod config;
pub mod liquidation;
pub mod oracle;
pub mod positions;
pub mod storage;
pub mod utils;
pub mod validation;
pub mod views;

pub use common_errors::*;
pub use common_structs::*;

/// Single-ledger accounting engine for a pooled lending market.
///
/// Every pool is an isolated market for one asset, identified by a pool id.
/// Depositors hold pool shares whose unit value grows as borrowers pay
/// interest; borrows are tracked against a cumulative index so interest
/// accrues proportionally without per-account iteration. Solvency is
/// enforced through a cross-pool health factor and restored through partial
/// liquidations with priced collateral seizure.
#[multiversx_sc::contract]
pub trait LendingMarket:
    storage::Storage
    + validation::ValidationModule
    + config::ConfigModule
    + oracle::OracleModule
    + utils::UtilsModule
    + positions::PositionsModule
    + borrow::BorrowModule
    + liquidation::LiquidationModule
    + views::ViewModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + multiversx_sc_modules::pause::PauseModule
{
    #[init]
    fn init(
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

    #[upgrade]
    fn upgrade(&self) {}
}
