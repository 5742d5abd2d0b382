use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Kind of entry recorded in an account history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    InitialDeposit,
    Deposit,
    Withdrawal,
    Fee,
    Interest,
}

impl TransactionKind {
    /// Whether this kind of entry adds to the balance
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            TransactionKind::InitialDeposit | TransactionKind::Deposit | TransactionKind::Interest
        )
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::InitialDeposit => write!(f, "Initial Deposit"),
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdrawal => write!(f, "Withdrawal"),
            TransactionKind::Fee => write!(f, "Fee"),
            TransactionKind::Interest => write!(f, "Interest"),
        }
    }
}

/// # Documentation
/// Immutable history entry.
///
/// - `amount` is always the unsigned magnitude; the sign comes from `kind`.
/// - `balance_after` is the balance snapshot taken right after the entry was applied.
/// - Entries are created by the owning account only and appended in creation order.
/// - A deserialized entry must carry a positive amount; only `InitialDeposit` may be zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    id: Uuid,
    kind: TransactionKind,
    amount: Decimal,
    timestamp: DateTime<Utc>,
    balance_after: Decimal,
}

/// Unchecked wire shape of [`Transaction`]
#[derive(Deserialize)]
struct TransactionRecord {
    id: Uuid,
    kind: TransactionKind,
    amount: Decimal,
    timestamp: DateTime<Utc>,
    balance_after: Decimal,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ApiError;

    fn try_from(record: TransactionRecord) -> ApiResult<Self> {
        let allows_zero = record.kind == TransactionKind::InitialDeposit;
        if record.amount < Decimal::ZERO || (record.amount.is_zero() && !allows_zero) {
            return Err(ApiError::NonPositiveAmount {
                amount: record.amount,
            });
        }
        Ok(Self {
            id: record.id,
            kind: record.kind,
            amount: record.amount,
            timestamp: record.timestamp,
            balance_after: record.balance_after,
        })
    }
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Decimal, balance_after: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            timestamp: Utc::now(),
            balance_after,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }

    /// Amount with the sign it contributed to the balance
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ${:.2} on {} (Balance: ${:.2})",
            self.kind,
            self.amount.round_dp(2),
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.balance_after.round_dp(2)
        )
    }
}

/// Explicit discriminant of the account variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    Basic,
    Savings,
    Checking,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Basic => write!(f, "Basic"),
            AccountKind::Savings => write!(f, "Savings"),
            AccountKind::Checking => write!(f, "Checking"),
        }
    }
}

/// Capability set shared by every account variant.
///
/// Each variant supplies its own withdraw rule, fee floor and monthly fee.
/// Successful deposit/withdraw/fee operations return the new balance and append exactly
/// one [`Transaction`]; failed ones leave the account untouched.
pub trait Account {
    fn kind(&self) -> AccountKind;

    fn holder_name(&self) -> &str;

    /// Identifier with everything but the trailing 4 characters masked
    fn masked_id(&self) -> String;

    fn balance(&self) -> Decimal;

    /// Read-only view of the history in creation order
    fn history(&self) -> &[Transaction];

    fn deposit(&mut self, amount: Decimal) -> ApiResult<Decimal>;

    fn withdraw(&mut self, amount: Decimal) -> ApiResult<Decimal>;

    /// Debits a maintenance fee, recorded as [`TransactionKind::Fee`].
    fn charge_fee(&mut self, amount: Decimal) -> ApiResult<Decimal>;

    fn calculate_monthly_fee(&self) -> Decimal;

    fn summary(&self) -> String {
        format!(
            "Account: {} | Holder: {} | Balance: ${:.2}",
            self.masked_id(),
            self.holder_name(),
            self.balance().round_dp(2)
        )
    }

    /// Capability query for variants that accrue interest
    fn interest_bearing_mut(&mut self) -> Option<&mut dyn InterestBearing> {
        None
    }
}

/// Accounts that post periodic interest and track a per-period withdrawal counter
pub trait InterestBearing {
    /// Posts one month of interest and returns the amount credited
    fn apply_interest(&mut self) -> ApiResult<Decimal>;

    fn reset_period_counter(&mut self);
}
