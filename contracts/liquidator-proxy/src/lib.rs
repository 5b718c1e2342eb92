//! # Liquidator Proxy
//!
//! Liquidation settlement layer in front of a perpetual ledger. A liquidator
//! calls [`LiquidatorProxy::liquidate`] to absorb part of an
//! undercollateralized account's position; the proxy sizes the trade so the
//! liquidator never exceeds its own position cap, lets the ledger execute it,
//! measures what actually filled, and skims a fee on the liquidated debt
//! into the insurance fund.
//!
//! Balances, margining rules, trade execution and the oracle all live in the
//! ledger contract; see [`ledger`] for the interface consumed here.

#![no_std]

#[cfg(test)]
extern crate std;

mod admin;
mod error;
mod events;
mod ledger;
mod liquidate;
mod signed_math;

pub use admin::{DataKey, ProxyConfig};
pub use error::LiquidatorError;
pub use events::{InsuranceFundChanged, LiquidationExecuted, OwnershipTransferred};
pub use ledger::{Balance, LedgerClient, LedgerInterface, LiquidationTradeData, TradeArg};
pub use signed_math::{base_mul, signed_add, signed_sub, SignedInt, BASE};

use soroban_sdk::{contract, contractimpl, Address, Env};

#[cfg(test)]
mod tests;

#[contract]
pub struct LiquidatorProxy;

#[contractimpl]
impl LiquidatorProxy {
    /// Configure the proxy (one-shot)
    ///
    /// # Arguments
    /// * `owner` - Address allowed to change the insurance fund and transfer ownership
    /// * `ledger` - Perpetual ledger contract
    /// * `liquidator_module` - Trader module the ledger uses for liquidation trades
    /// * `insurance_fund` - Ledger account receiving liquidation fees
    /// * `fee_percentage` - Fee on liquidated debt, base 1e18 (1% = 10^16)
    ///
    /// # Errors
    /// - `AlreadyInitialized` - Called twice
    /// - `InvalidFeePercentage` - Fee above 100%
    pub fn initialize(
        env: Env,
        owner: Address,
        ledger: Address,
        liquidator_module: Address,
        insurance_fund: Address,
        fee_percentage: u128,
    ) -> Result<(), LiquidatorError> {
        admin::initialize(
            &env,
            owner,
            ledger,
            liquidator_module,
            insurance_fund,
            fee_percentage,
        )
    }

    /// Liquidate `liquidatee` into the caller's account
    ///
    /// The caller's position grows in the `is_buy` direction by at most the
    /// room left below `max_position`; the ledger may fill less. A fee of
    /// `fee_percentage` of the liquidated debt is moved from the caller to the
    /// insurance fund.
    ///
    /// # Arguments
    /// * `liquidator` - The caller (must authorize)
    /// * `liquidatee` - The account being liquidated
    /// * `is_buy` - `true` if the liquidator buys the liquidatee's long
    /// * `max_position` - Cap on the liquidator's resulting position magnitude
    ///
    /// # Returns
    /// The position amount actually liquidated
    ///
    /// # Events
    /// Emits `liquidation_executed`
    ///
    /// # Errors
    /// - `InsufficientLiquidationRoom` - Caller already at or past `max_position`
    /// - `LedgerRejected` - The ledger refused a deposit, withdraw or trade
    /// - `ArithmeticOverflow` / `ArithmeticUnderflow`
    /// - `LiquidationDirectionMismatch` - Ledger moved the position the wrong way
    pub fn liquidate(
        env: Env,
        liquidator: Address,
        liquidatee: Address,
        is_buy: bool,
        max_position: u128,
    ) -> Result<u128, LiquidatorError> {
        liquidate::liquidate(&env, liquidator, liquidatee, is_buy, max_position)
    }

    /// Replace the insurance fund (owner only)
    ///
    /// # Events
    /// Emits `insurance_fund_changed`
    pub fn set_insurance_fund(
        env: Env,
        caller: Address,
        insurance_fund: Address,
    ) -> Result<(), LiquidatorError> {
        admin::set_insurance_fund(&env, caller, insurance_fund)
    }

    /// Hand ownership to `new_owner` (owner only)
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), LiquidatorError> {
        admin::transfer_ownership(&env, caller, new_owner)
    }

    /// Approve the ledger to pull this contract's margin tokens without limit
    ///
    /// Required once before the first liquidation that charges a fee.
    pub fn set_allowance(env: Env) -> Result<(), LiquidatorError> {
        admin::set_allowance(&env)
    }

    /// Room `liquidator` has left toward `max_position`, without settling
    pub fn get_max_position_delta(
        env: Env,
        liquidator: Address,
        is_buy: bool,
        max_position: u128,
    ) -> Result<SignedInt, LiquidatorError> {
        liquidate::preview_max_position_delta(&env, liquidator, is_buy, max_position)
    }

    pub fn get_owner(env: Env) -> Result<Address, LiquidatorError> {
        admin::get_owner(&env)
    }

    pub fn get_config(env: Env) -> Result<ProxyConfig, LiquidatorError> {
        admin::get_config(&env)
    }

    pub fn get_insurance_fund(env: Env) -> Result<Address, LiquidatorError> {
        Ok(admin::get_config(&env)?.insurance_fund)
    }

    pub fn get_fee_percentage(env: Env) -> Result<u128, LiquidatorError> {
        Ok(admin::get_config(&env)?.fee_percentage)
    }

    pub fn get_ledger(env: Env) -> Result<Address, LiquidatorError> {
        Ok(admin::get_config(&env)?.ledger)
    }

    pub fn get_liquidator_module(env: Env) -> Result<Address, LiquidatorError> {
        Ok(admin::get_config(&env)?.liquidator_module)
    }
}
