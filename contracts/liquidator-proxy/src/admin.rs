//! # Configuration and Ownership
//!
//! The proxy is configured once by [`initialize`]. After that the only
//! mutable settings are the insurance fund address and the owner, both
//! gated on the current owner.

use crate::error::LiquidatorError;
use crate::events::{emit_insurance_fund_changed, emit_ownership_transferred};
use crate::ledger::Ledger;
use crate::signed_math::BASE;
use soroban_sdk::{contracttype, log, token, Address, Env};

/// Storage keys (instance storage).
#[contracttype]
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum DataKey {
    Owner,
    Config,
}

/// Proxy configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProxyConfig {
    /// Perpetual ledger contract
    pub ledger: Address,
    /// Trader module the ledger routes liquidation trades to
    pub liquidator_module: Address,
    /// Account credited with liquidation fees
    pub insurance_fund: Address,
    /// Fee as a fraction of the liquidated debt, base 1e18
    pub fee_percentage: u128,
}

pub fn initialize(
    env: &Env,
    owner: Address,
    ledger: Address,
    liquidator_module: Address,
    insurance_fund: Address,
    fee_percentage: u128,
) -> Result<(), LiquidatorError> {
    if env.storage().instance().has(&DataKey::Owner) {
        return Err(LiquidatorError::AlreadyInitialized);
    }
    if fee_percentage > BASE {
        return Err(LiquidatorError::InvalidFeePercentage);
    }

    let config = ProxyConfig {
        ledger,
        liquidator_module,
        insurance_fund,
        fee_percentage,
    };
    env.storage().instance().set(&DataKey::Owner, &owner);
    env.storage().instance().set(&DataKey::Config, &config);

    log!(env, "initialize owner={} fee={}", owner, fee_percentage);
    Ok(())
}

pub fn get_owner(env: &Env) -> Result<Address, LiquidatorError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(LiquidatorError::NotInitialized)
}

pub fn get_config(env: &Env) -> Result<ProxyConfig, LiquidatorError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(LiquidatorError::NotInitialized)
}

/// Require that `caller` authorized this call and is the owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), LiquidatorError> {
    caller.require_auth();
    if *caller != get_owner(env)? {
        return Err(LiquidatorError::Unauthorized);
    }
    Ok(())
}

pub fn set_insurance_fund(
    env: &Env,
    caller: Address,
    insurance_fund: Address,
) -> Result<(), LiquidatorError> {
    require_owner(env, &caller)?;

    let mut config = get_config(env)?;
    config.insurance_fund = insurance_fund.clone();
    env.storage().instance().set(&DataKey::Config, &config);

    log!(env, "set_insurance_fund {}", insurance_fund);
    emit_insurance_fund_changed(env, insurance_fund);
    Ok(())
}

pub fn transfer_ownership(
    env: &Env,
    caller: Address,
    new_owner: Address,
) -> Result<(), LiquidatorError> {
    require_owner(env, &caller)?;
    env.storage().instance().set(&DataKey::Owner, &new_owner);

    log!(env, "transfer_ownership new={}", new_owner);
    emit_ownership_transferred(env, caller, new_owner);
    Ok(())
}

/// Grant the ledger an unlimited allowance over this contract's margin
/// tokens so it can pull fee deposits. Anyone may call it; repeated calls
/// just refresh the allowance.
pub fn set_allowance(env: &Env) -> Result<(), LiquidatorError> {
    let config = get_config(env)?;
    let ledger = Ledger::new(env, &config.ledger);
    let token_address = ledger.get_token_contract()?;

    let expiration_ledger = env.ledger().max_live_until_ledger();
    token::Client::new(env, &token_address).approve(
        &env.current_contract_address(),
        ledger.address(),
        &i128::MAX,
        &expiration_ledger,
    );

    log!(env, "set_allowance token={} until={}", token_address, expiration_ledger);
    Ok(())
}
