//! In-memory perpetual ledger used as the proxy's collaborator in tests.
//!
//! Implements the ledger interface with a liquidation trader module that
//! fills up to the maker's position, optionally capped, at the oracle price.

use crate::{base_mul, signed_add, signed_sub, Balance, LiquidationTradeData, SignedInt, TradeArg};
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, token, xdr::FromXdr, Address, Env, Vec,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockLedgerError {
    AccountsNotSorted = 1,
    IndexOutOfRange = 2,
    UnknownTrader = 3,
    NotLiquidatable = 4,
    NothingToLiquidate = 5,
    AllOrNothingUnfilled = 6,
    BadTradeData = 7,
    Math = 8,
}

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Token,
    Module,
    Price,
    Balance(Address),
    Liquidatable(Address),
    FillCap,
    InvertFills,
    TradeCount,
    DepositCount,
}

#[contract]
pub struct MockLedger;

#[contractimpl]
impl MockLedger {
    pub fn setup(env: Env, token: Address, liquidator_module: Address, price: u128) {
        env.storage().instance().set(&MockKey::Token, &token);
        env.storage()
            .instance()
            .set(&MockKey::Module, &liquidator_module);
        env.storage().instance().set(&MockKey::Price, &price);
    }

    pub fn set_oracle_price(env: Env, price: u128) {
        env.storage().instance().set(&MockKey::Price, &price);
    }

    pub fn set_balance(env: Env, account: Address, balance: Balance) {
        env.storage()
            .persistent()
            .set(&MockKey::Balance(account), &balance);
    }

    pub fn set_liquidatable(env: Env, account: Address, liquidatable: bool) {
        env.storage()
            .persistent()
            .set(&MockKey::Liquidatable(account), &liquidatable);
    }

    /// Cap every fill at `cap` to simulate the ledger's own margin limits.
    pub fn set_fill_cap(env: Env, cap: u128) {
        env.storage().instance().set(&MockKey::FillCap, &cap);
    }

    /// Apply liquidation fills in the opposite direction of the request.
    pub fn set_invert_fills(env: Env, invert: bool) {
        env.storage().instance().set(&MockKey::InvertFills, &invert);
    }

    pub fn trade_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&MockKey::TradeCount)
            .unwrap_or(0)
    }

    pub fn deposit_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&MockKey::DepositCount)
            .unwrap_or(0)
    }

    // ── ledger interface ──────────────────────────────────────────────────

    pub fn deposit(
        env: Env,
        depositor: Address,
        account: Address,
        amount: u128,
    ) -> Result<(), MockLedgerError> {
        depositor.require_auth();

        if amount > 0 {
            let this = env.current_contract_address();
            token::Client::new(&env, &Self::get_token_contract(env.clone())).transfer_from(
                &this,
                &depositor,
                &this,
                &to_token_amount(amount)?,
            );
        }

        let mut balance = Self::get_account_balance(env.clone(), account.clone());
        balance.margin = signed_add(balance.margin, SignedInt::new(amount, true))
            .map_err(|_| MockLedgerError::Math)?;
        Self::set_balance(env.clone(), account, balance);

        let count = Self::deposit_count(env.clone()) + 1;
        env.storage().instance().set(&MockKey::DepositCount, &count);
        Ok(())
    }

    pub fn withdraw(
        env: Env,
        account: Address,
        destination: Address,
        amount: u128,
    ) -> Result<(), MockLedgerError> {
        account.require_auth();

        let mut balance = Self::get_account_balance(env.clone(), account.clone());
        balance.margin = signed_sub(balance.margin, SignedInt::new(amount, true))
            .map_err(|_| MockLedgerError::Math)?;
        Self::set_balance(env.clone(), account, balance);

        token::Client::new(&env, &Self::get_token_contract(env.clone())).transfer(
            &env.current_contract_address(),
            &destination,
            &to_token_amount(amount)?,
        );
        Ok(())
    }

    pub fn trade(
        env: Env,
        accounts: Vec<Address>,
        trades: Vec<TradeArg>,
    ) -> Result<(), MockLedgerError> {
        for i in 1..accounts.len() {
            if accounts.get_unchecked(i - 1) >= accounts.get_unchecked(i) {
                return Err(MockLedgerError::AccountsNotSorted);
            }
        }

        let module: Address = env
            .storage()
            .instance()
            .get(&MockKey::Module)
            .ok_or(MockLedgerError::UnknownTrader)?;

        for trade in trades.iter() {
            if trade.trader != module {
                return Err(MockLedgerError::UnknownTrader);
            }
            let taker = accounts
                .get(trade.taker_index)
                .ok_or(MockLedgerError::IndexOutOfRange)?;
            let maker = accounts
                .get(trade.maker_index)
                .ok_or(MockLedgerError::IndexOutOfRange)?;
            Self::apply_liquidation(&env, &taker, &maker, &trade)?;
        }

        let count = Self::trade_count(env.clone()) + 1;
        env.storage().instance().set(&MockKey::TradeCount, &count);
        Ok(())
    }

    pub fn get_account_balance(env: Env, account: Address) -> Balance {
        env.storage()
            .persistent()
            .get(&MockKey::Balance(account))
            .unwrap_or(Balance {
                margin: SignedInt::zero(),
                position: SignedInt::zero(),
            })
    }

    pub fn get_oracle_price(env: Env) -> u128 {
        env.storage().instance().get(&MockKey::Price).unwrap_or(0)
    }

    pub fn get_token_contract(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&MockKey::Token)
            .expect("token not set")
    }
}

impl MockLedger {
    fn apply_liquidation(
        env: &Env,
        taker: &Address,
        maker: &Address,
        trade: &TradeArg,
    ) -> Result<(), MockLedgerError> {
        let liquidatable = env
            .storage()
            .persistent()
            .get(&MockKey::Liquidatable(maker.clone()))
            .unwrap_or(false);
        if !liquidatable {
            return Err(MockLedgerError::NotLiquidatable);
        }

        let data = LiquidationTradeData::from_xdr(env, &trade.data)
            .map_err(|_| MockLedgerError::BadTradeData)?;

        let mut maker_balance = Self::get_account_balance(env.clone(), maker.clone());
        // the taker buys what the maker is long, and vice versa
        if !maker_balance.position.is_strictly_in(data.is_buy) {
            return Err(MockLedgerError::NothingToLiquidate);
        }

        let mut fill = data.amount.min(maker_balance.position.value);
        if let Some(cap) = env.storage().instance().get::<_, u128>(&MockKey::FillCap) {
            fill = fill.min(cap);
        }
        if data.all_or_nothing && fill < data.amount {
            return Err(MockLedgerError::AllOrNothingUnfilled);
        }

        let invert: bool = env
            .storage()
            .instance()
            .get(&MockKey::InvertFills)
            .unwrap_or(false);
        let direction = data.is_buy != invert;

        let price = Self::get_oracle_price(env.clone());
        let cost = base_mul(fill, price).map_err(|_| MockLedgerError::Math)?;
        let position_change = SignedInt::new(fill, direction);
        let margin_change = SignedInt::new(cost, !direction);

        let mut taker_balance = Self::get_account_balance(env.clone(), taker.clone());
        taker_balance.position = signed_add(taker_balance.position, position_change)
            .map_err(|_| MockLedgerError::Math)?;
        taker_balance.margin =
            signed_add(taker_balance.margin, margin_change).map_err(|_| MockLedgerError::Math)?;

        maker_balance.position = signed_sub(maker_balance.position, position_change)
            .map_err(|_| MockLedgerError::Math)?;
        maker_balance.margin =
            signed_sub(maker_balance.margin, margin_change).map_err(|_| MockLedgerError::Math)?;

        Self::set_balance(env.clone(), taker.clone(), taker_balance);
        Self::set_balance(env.clone(), maker.clone(), maker_balance);
        Ok(())
    }
}

fn to_token_amount(amount: u128) -> Result<i128, MockLedgerError> {
    i128::try_from(amount).map_err(|_| MockLedgerError::Math)
}
