//! # Ledger Interface
//!
//! The perpetual ledger is an external contract. It owns every account
//! balance, executes trades through pluggable trader modules and exposes the
//! oracle price. This module declares the slice of its interface the proxy
//! consumes and wraps each call so that any failure inside the ledger surfaces
//! as [`LiquidatorError::LedgerRejected`], with the ledger's own error logged.

use crate::error::LiquidatorError;
use crate::signed_math::SignedInt;
use soroban_sdk::{
    contractclient, contracttype, log, symbol_short, xdr::ToXdr, Address, Bytes, Env, Error,
    InvokeError, Symbol, Val, Vec,
};

/// Account state held by the ledger.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Balance {
    /// Quote-asset balance; negative = debt
    pub margin: SignedInt,
    /// Base-asset exposure; negative = short
    pub position: SignedInt,
}

/// One matched trade between two entries of the `accounts` array.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TradeArg {
    pub taker_index: u32,
    pub maker_index: u32,
    /// Trader module that interprets `data`
    pub trader: Address,
    pub data: Bytes,
}

/// Payload understood by the ledger's liquidation trader module.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LiquidationTradeData {
    /// Maximum position the taker wants to absorb
    pub amount: u128,
    /// Taker buys (absorbs a long) when `true`
    pub is_buy: bool,
    /// Reject instead of partially filling
    pub all_or_nothing: bool,
}

impl LiquidationTradeData {
    pub fn encode(self, env: &Env) -> Bytes {
        self.to_xdr(env)
    }
}

#[allow(dead_code)]
#[contractclient(name = "LedgerClient")]
pub trait LedgerInterface {
    /// Pull `amount` margin tokens from `depositor` and credit `account`.
    /// A zero amount only settles the account.
    fn deposit(env: Env, depositor: Address, account: Address, amount: u128);
    /// Debit `account` margin and send the tokens to `destination`.
    fn withdraw(env: Env, account: Address, destination: Address, amount: u128);
    /// `accounts` must be sorted ascending and unique.
    fn trade(env: Env, accounts: Vec<Address>, trades: Vec<TradeArg>);
    fn get_account_balance(env: Env, account: Address) -> Balance;
    fn get_oracle_price(env: Env) -> u128;
    fn get_token_contract(env: Env) -> Address;
}

/// Fallible view over a [`LedgerClient`].
pub struct Ledger<'a> {
    env: &'a Env,
    client: LedgerClient<'a>,
}

impl<'a> Ledger<'a> {
    pub fn new(env: &'a Env, address: &Address) -> Self {
        Self {
            env,
            client: LedgerClient::new(env, address),
        }
    }

    pub fn address(&self) -> &Address {
        &self.client.address
    }

    pub fn deposit(
        &self,
        depositor: &Address,
        account: &Address,
        amount: u128,
    ) -> Result<(), LiquidatorError> {
        let res = self.client.try_deposit(depositor, account, &amount);
        self.settle(symbol_short!("deposit"), res)
    }

    pub fn withdraw(
        &self,
        account: &Address,
        destination: &Address,
        amount: u128,
    ) -> Result<(), LiquidatorError> {
        let res = self.client.try_withdraw(account, destination, &amount);
        self.settle(symbol_short!("withdraw"), res)
    }

    pub fn trade(
        &self,
        accounts: &Vec<Address>,
        trades: &Vec<TradeArg>,
    ) -> Result<(), LiquidatorError> {
        let res = self.client.try_trade(accounts, trades);
        self.settle(symbol_short!("trade"), res)
    }

    pub fn get_account_balance(&self, account: &Address) -> Result<Balance, LiquidatorError> {
        let res = self.client.try_get_account_balance(account);
        self.settle(symbol_short!("balance"), res)
    }

    pub fn get_oracle_price(&self) -> Result<u128, LiquidatorError> {
        let res = self.client.try_get_oracle_price();
        self.settle(symbol_short!("price"), res)
    }

    pub fn get_token_contract(&self) -> Result<Address, LiquidatorError> {
        let res = self.client.try_get_token_contract();
        self.settle(symbol_short!("token"), res)
    }

    fn settle<T, C>(
        &self,
        op: Symbol,
        res: Result<Result<T, C>, Result<Error, InvokeError>>,
    ) -> Result<T, LiquidatorError> {
        match res {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => {
                log!(self.env, "ledger returned malformed {}", op);
                Err(LiquidatorError::LedgerRejected)
            }
            Err(Ok(err)) => self.reject(op, err),
            Err(Err(invoke)) => self.reject(op, Error::from(invoke)),
        }
    }

    fn reject<T>(&self, op: Symbol, err: Error) -> Result<T, LiquidatorError> {
        let reason: Val = err.into();
        log!(self.env, "ledger rejected {} reason={}", op, reason);
        Err(LiquidatorError::LedgerRejected)
    }
}
