//! Events published by the liquidator proxy.
//!
//! Each event is a `#[contractevent]` struct; the macro uses the snake_case
//! struct name as the leading topic and packs the fields into a map payload.

use soroban_sdk::{contractevent, Address, Env};

/// Emitted once per successful liquidation.
///
/// # Fields
/// * `liquidator` – Account that absorbed the position and paid the fee.
/// * `liquidatee` – Account whose position was liquidated.
/// * `is_buy` – `true` when the liquidator bought (absorbed a long).
/// * `liquidated_amount` – Realized position transfer, measured from balances.
/// * `fee_amount` – Margin sent to the insurance fund.
#[contractevent]
#[derive(Clone, Debug)]
pub struct LiquidationExecuted {
    pub liquidator: Address,
    pub liquidatee: Address,
    pub is_buy: bool,
    pub liquidated_amount: u128,
    pub fee_amount: u128,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct InsuranceFundChanged {
    pub insurance_fund: Address,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

pub fn emit_liquidation_executed(
    env: &Env,
    liquidator: Address,
    liquidatee: Address,
    is_buy: bool,
    liquidated_amount: u128,
    fee_amount: u128,
) {
    LiquidationExecuted {
        liquidator,
        liquidatee,
        is_buy,
        liquidated_amount,
        fee_amount,
    }
    .publish(env);
}

pub fn emit_insurance_fund_changed(env: &Env, insurance_fund: Address) {
    InsuranceFundChanged { insurance_fund }.publish(env);
}

pub fn emit_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    OwnershipTransferred {
        previous_owner,
        new_owner,
    }
    .publish(env);
}
