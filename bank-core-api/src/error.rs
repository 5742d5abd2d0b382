use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Decimal },

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Decimal, available: Decimal },

    #[error("Withdrawal limit reached ({limit} per period)")]
    WithdrawalLimitReached { limit: u32 },

    #[error("Amount {requested} exceeds available funds including overdraft ({available})")]
    OverdraftExceeded { requested: Decimal, available: Decimal },

    #[error("Initial deposit cannot be negative, got {amount}")]
    NegativeInitialDeposit { amount: Decimal },

    #[error("Interest rate cannot be negative, got {rate}")]
    NegativeRate { rate: Decimal },

    #[error("Invalid account number: {0}")]
    InvalidAccountNumber(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
