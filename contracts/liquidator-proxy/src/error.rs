use soroban_sdk::contracterror;

/// Errors returned by the liquidator proxy.
///
/// Every variant aborts the whole invocation: the host rolls back all
/// storage writes and ledger sub-calls made before the failure.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LiquidatorError {
    /// `initialize` was called on an already configured proxy
    AlreadyInitialized = 1,
    /// The proxy has not been configured yet
    NotInitialized = 2,
    /// Caller is not the owner
    Unauthorized = 3,
    /// Magnitude addition or fixed-point multiplication overflowed
    ArithmeticOverflow = 4,
    /// Magnitude subtraction went below zero
    ArithmeticUnderflow = 5,
    /// The liquidator is already at or beyond `max_position` in the
    /// requested direction ("Cannot liquidate anymore")
    InsufficientLiquidationRoom = 6,
    /// A deposit, withdraw, trade or read against the ledger failed
    LedgerRejected = 7,
    /// Fee percentage above 100% of the debt
    InvalidFeePercentage = 8,
    /// The ledger moved the liquidator's position against `is_buy`
    LiquidationDirectionMismatch = 9,
}
