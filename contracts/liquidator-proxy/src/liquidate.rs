//! # Liquidation Engine
//!
//! Runs one liquidation against the perpetual ledger on behalf of a
//! liquidator:
//!
//! 1. Settle the liquidator and snapshot its balance.
//! 2. Derive how much position the liquidator may still absorb before
//!    reaching `max_position` in the requested direction.
//! 3. Submit a single liquidation trade (taker = liquidator,
//!    maker = liquidatee). The ledger decides how much of it fills.
//! 4. Snapshot the balance again and measure what actually moved.
//! 5. Charge a fee proportional to the liquidated debt and move it to the
//!    insurance fund.
//!
//! ## Invariants
//! - Nothing reaches the ledger's `trade` unless the liquidator has strictly
//!   positive room in the requested direction.
//! - The liquidated amount is always the before/after position diff, never
//!   the requested amount.
//! - The fee moves from the liquidator's ledger account to the insurance
//!   fund's ledger account through this contract's token custody.

use crate::admin::{get_config, ProxyConfig};
use crate::error::LiquidatorError;
use crate::events::emit_liquidation_executed;
use crate::ledger::{Balance, Ledger, LiquidationTradeData, TradeArg};
use crate::signed_math::{base_mul, signed_sub, SignedInt};
use soroban_sdk::{log, vec, Address, Env, Vec};

/// Liquidate `liquidatee` into `liquidator`'s account.
///
/// # Arguments
/// * `liquidator` - Caller; absorbs the position and pays the fee (must authorize)
/// * `liquidatee` - Undercollateralized account; eligibility is enforced by the ledger
/// * `is_buy` - `true` if the liquidator buys, i.e. takes over a long
/// * `max_position` - Cap on the liquidator's resulting position in the `is_buy` direction
///
/// # Returns
/// The position amount actually transferred.
///
/// # Errors
/// * `InsufficientLiquidationRoom` - Liquidator already at or past `max_position`
/// * `LedgerRejected` - Any ledger call failed (e.g. liquidatee not liquidatable)
/// * `ArithmeticOverflow` / `ArithmeticUnderflow` - Balance arithmetic failed
/// * `LiquidationDirectionMismatch` - The ledger moved the position against `is_buy`
pub fn liquidate(
    env: &Env,
    liquidator: Address,
    liquidatee: Address,
    is_buy: bool,
    max_position: u128,
) -> Result<u128, LiquidatorError> {
    liquidator.require_auth();

    let config = get_config(env)?;
    let ledger = Ledger::new(env, &config.ledger);

    // Settle pending funding before reading the balance
    ledger.deposit(&liquidator, &liquidator, 0)?;
    let initial_balance = ledger.get_account_balance(&liquidator)?;

    let max_position_delta = get_max_position_delta(&initial_balance, is_buy, max_position)?;

    do_liquidation(
        env,
        &ledger,
        &config,
        &liquidator,
        &liquidatee,
        max_position_delta,
    )?;

    let current_balance = ledger.get_account_balance(&liquidator)?;
    let (liquidated_amount, fee_amount) = get_liquidated_and_fee_amount(
        &ledger,
        &config,
        is_buy,
        &initial_balance,
        &current_balance,
    )?;

    if fee_amount > 0 {
        let custody = env.current_contract_address();
        ledger.withdraw(&liquidator, &custody, fee_amount)?;
        ledger.deposit(&custody, &config.insurance_fund, fee_amount)?;
    }

    log!(
        env,
        "liquidate liquidatee={} is_buy={} amount={} fee={}",
        liquidatee,
        is_buy,
        liquidated_amount,
        fee_amount
    );
    emit_liquidation_executed(
        env,
        liquidator,
        liquidatee,
        is_buy,
        liquidated_amount,
        fee_amount,
    );

    Ok(liquidated_amount)
}

/// Read-only preview of the room `liquidator` has left, against its current
/// (unsettled) balance.
pub fn preview_max_position_delta(
    env: &Env,
    liquidator: Address,
    is_buy: bool,
    max_position: u128,
) -> Result<SignedInt, LiquidatorError> {
    let config = get_config(env)?;
    let balance = Ledger::new(env, &config.ledger).get_account_balance(&liquidator)?;
    get_max_position_delta(&balance, is_buy, max_position)
}

/// `{is_buy, max_position} - initial.position`, required to be strictly
/// positive in the `is_buy` direction.
pub fn get_max_position_delta(
    initial_balance: &Balance,
    is_buy: bool,
    max_position: u128,
) -> Result<SignedInt, LiquidatorError> {
    let target = SignedInt::new(max_position, is_buy);
    let delta = signed_sub(target, initial_balance.position)?;

    if !delta.is_strictly_in(is_buy) {
        return Err(LiquidatorError::InsufficientLiquidationRoom);
    }
    Ok(delta)
}

/// Sort the two participants ascending and report where each landed.
///
/// Returns `(accounts, taker_index, maker_index)`.
pub fn order_accounts(env: &Env, taker: &Address, maker: &Address) -> (Vec<Address>, u32, u32) {
    if taker < maker {
        (vec![env, taker.clone(), maker.clone()], 0, 1)
    } else {
        (vec![env, maker.clone(), taker.clone()], 1, 0)
    }
}

fn do_liquidation(
    env: &Env,
    ledger: &Ledger,
    config: &ProxyConfig,
    liquidator: &Address,
    liquidatee: &Address,
    max_position_delta: SignedInt,
) -> Result<(), LiquidatorError> {
    let (accounts, taker_index, maker_index) = order_accounts(env, liquidator, liquidatee);

    let data = LiquidationTradeData {
        amount: max_position_delta.value,
        is_buy: max_position_delta.is_positive,
        all_or_nothing: false,
    };
    let trades = vec![
        env,
        TradeArg {
            taker_index,
            maker_index,
            trader: config.liquidator_module.clone(),
            data: data.encode(env),
        },
    ];

    ledger.trade(&accounts, &trades)
}

/// Measure the realized position transfer and derive the fee.
///
/// Returns `(liquidated_amount, fee_amount)`.
fn get_liquidated_and_fee_amount(
    ledger: &Ledger,
    config: &ProxyConfig,
    is_buy: bool,
    initial_balance: &Balance,
    current_balance: &Balance,
) -> Result<(u128, u128), LiquidatorError> {
    let position_delta = signed_sub(current_balance.position, initial_balance.position)?;
    if position_delta.value > 0 && position_delta.is_positive != is_buy {
        return Err(LiquidatorError::LiquidationDirectionMismatch);
    }
    let liquidated_amount = position_delta.value;

    let debt_amount_in_margin = if is_buy {
        // margin the liquidator actually paid
        signed_sub(current_balance.margin, initial_balance.margin)?.value
    } else {
        base_mul(liquidated_amount, ledger.get_oracle_price()?)?
    };

    let fee_amount = base_mul(debt_amount_in_margin, config.fee_percentage)?;
    Ok((liquidated_amount, fee_amount))
}
