use bank_core_api::{ApiError, ApiResult, Transaction, TransactionKind};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::info;

use super::account_number::AccountNumber;

/// # Documentation
/// Fields and bookkeeping shared by every account variant.
///
/// - `balance` always equals the signed sum of `history`; the initial deposit is the first entry.
/// - `history` is append-only and only grows through [`AccountCore::credit`],
///   [`AccountCore::withdraw_funded`] and [`AccountCore::debit_unchecked`].
/// - Variants compose this struct and layer their own withdraw rule on top.
#[derive(Debug, Clone)]
pub struct AccountCore {
    number: AccountNumber,
    holder: HeaplessString<100>,
    balance: Decimal,
    history: Vec<Transaction>,
}

impl AccountCore {
    pub fn open(holder: &str, number: &str, initial_deposit: Decimal) -> ApiResult<Self> {
        if initial_deposit < Decimal::ZERO {
            return Err(ApiError::NegativeInitialDeposit {
                amount: initial_deposit,
            });
        }
        let number = AccountNumber::new(number)?;
        let holder = parse_holder_name(holder)?;

        let mut account = Self {
            number,
            holder,
            balance: initial_deposit,
            history: Vec::new(),
        };
        account.record(TransactionKind::InitialDeposit, initial_deposit);
        info!(account = %account.masked_id(), amount = %initial_deposit, "Account opened");
        Ok(account)
    }

    pub fn holder_name(&self) -> &str {
        self.holder.as_str()
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn masked_id(&self) -> String {
        self.number.masked()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    /// Adds a positive amount and records it under `kind`.
    pub fn credit(&mut self, kind: TransactionKind, amount: Decimal) -> ApiResult<Decimal> {
        ensure_positive(amount)?;
        self.balance += amount;
        self.record(kind, amount);
        info!(account = %self.masked_id(), kind = %kind, amount = %amount, balance = %self.balance, "Credited");
        Ok(self.balance)
    }

    /// Base withdraw rule: the balance may not drop below zero.
    pub fn withdraw_funded(&mut self, kind: TransactionKind, amount: Decimal) -> ApiResult<Decimal> {
        ensure_positive(amount)?;
        if amount > self.balance {
            return Err(ApiError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        Ok(self.debit_unchecked(kind, amount))
    }

    /// Subtracts without any floor check.
    ///
    /// Callers must have validated `amount` (positive, within their own floor) beforehand.
    pub(crate) fn debit_unchecked(&mut self, kind: TransactionKind, amount: Decimal) -> Decimal {
        self.balance -= amount;
        self.record(kind, amount);
        info!(account = %self.masked_id(), kind = %kind, amount = %amount, balance = %self.balance, "Debited");
        self.balance
    }

    fn record(&mut self, kind: TransactionKind, amount: Decimal) {
        self.history.push(Transaction::new(kind, amount, self.balance));
    }
}

pub(crate) fn ensure_positive(amount: Decimal) -> ApiResult<()> {
    if amount <= Decimal::ZERO {
        return Err(ApiError::NonPositiveAmount { amount });
    }
    Ok(())
}

pub(crate) fn parse_holder_name(name: &str) -> ApiResult<HeaplessString<100>> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::ValidationError("Holder name cannot be empty".to_string()));
    }
    HeaplessString::from_str(name)
        .map_err(|_| ApiError::ValidationError("Holder name is too long (max 100 chars)".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_open_records_initial_deposit() {
        let account = AccountCore::open("Alice Johnson", "1234567890", dec!(1000)).unwrap();

        assert_eq!(account.balance(), dec!(1000));
        assert_eq!(account.history().len(), 1);
        assert_eq!(account.history()[0].kind(), TransactionKind::InitialDeposit);
        assert_eq!(account.history()[0].balance_after(), dec!(1000));
    }

    #[test]
    fn test_open_allows_zero_initial_deposit() {
        let account = AccountCore::open("Zero", "00000000", Decimal::ZERO).unwrap();
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.history().len(), 1);
    }

    #[test]
    fn test_open_rejects_negative_initial_deposit() {
        let err = AccountCore::open("Neg", "1234567890", dec!(-1)).unwrap_err();
        assert_eq!(err, ApiError::NegativeInitialDeposit { amount: dec!(-1) });
    }

    #[test]
    fn test_open_rejects_blank_holder() {
        assert!(matches!(
            AccountCore::open("  ", "1234567890", dec!(1)),
            Err(ApiError::ValidationError(_))
        ));
    }

    #[test]
    fn test_withdraw_funded_stops_at_zero() {
        let mut account = AccountCore::open("Bob", "1234567890", dec!(100)).unwrap();

        assert_eq!(account.withdraw_funded(TransactionKind::Withdrawal, dec!(100)).unwrap(), dec!(0));
        let err = account.withdraw_funded(TransactionKind::Withdrawal, dec!(0.01)).unwrap_err();

        assert_eq!(
            err,
            ApiError::InsufficientFunds {
                requested: dec!(0.01),
                available: dec!(0)
            }
        );
        assert_eq!(account.history().len(), 2);
    }

    #[test]
    fn test_credit_rejects_non_positive() {
        let mut account = AccountCore::open("Bob", "1234567890", dec!(100)).unwrap();

        assert!(account.credit(TransactionKind::Deposit, dec!(0)).is_err());
        assert!(account.credit(TransactionKind::Deposit, dec!(-5)).is_err());
        assert_eq!(account.balance(), dec!(100));
        assert_eq!(account.history().len(), 1);
    }
}
