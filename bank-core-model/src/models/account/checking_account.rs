use bank_core_api::{Account, AccountKind, ApiError, ApiResult, Transaction, TransactionKind};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::account_core::{ensure_positive, AccountCore};
use crate::config::{BankConfig, FeeSchedule};

/// Checking account allowed to go negative down to `-overdraft_limit`.
#[derive(Debug, Clone)]
pub struct CheckingAccount {
    core: AccountCore,
    fees: FeeSchedule,
    overdraft_limit: Decimal,
    has_debit_card: bool,
}

impl CheckingAccount {
    pub fn open(
        holder: &str,
        number: &str,
        initial_deposit: Decimal,
        overdraft_limit: Decimal,
    ) -> ApiResult<Self> {
        Self::open_with_config(
            holder,
            number,
            initial_deposit,
            overdraft_limit,
            &BankConfig::default(),
        )
    }

    pub fn open_with_config(
        holder: &str,
        number: &str,
        initial_deposit: Decimal,
        overdraft_limit: Decimal,
        config: &BankConfig,
    ) -> ApiResult<Self> {
        if overdraft_limit < Decimal::ZERO {
            return Err(ApiError::ValidationError(format!(
                "Overdraft limit cannot be negative, got {overdraft_limit}"
            )));
        }
        Ok(Self {
            core: AccountCore::open(holder, number, initial_deposit)?,
            fees: config.fees,
            overdraft_limit,
            has_debit_card: true,
        })
    }

    pub fn core(&self) -> &AccountCore {
        &self.core
    }

    pub fn overdraft_limit(&self) -> Decimal {
        self.overdraft_limit
    }

    pub fn has_debit_card(&self) -> bool {
        self.has_debit_card
    }

    /// Balance plus the unused part of the overdraft allowance
    pub fn available_funds(&self) -> Decimal {
        self.core.balance() + self.overdraft_limit
    }

    /// Issues a check to `payee`; behaves exactly like [`Account::withdraw`].
    pub fn write_check(&mut self, payee: &str, amount: Decimal) -> ApiResult<Decimal> {
        info!(account = %self.core.masked_id(), payee, amount = %amount, "Writing check");
        self.withdraw(amount)
    }

    fn debit_with_overdraft(&mut self, kind: TransactionKind, amount: Decimal) -> ApiResult<Decimal> {
        ensure_positive(amount)?;

        let available = self.available_funds();
        if amount > available {
            return Err(ApiError::OverdraftExceeded {
                requested: amount,
                available,
            });
        }

        let balance = self.core.balance();
        if amount > balance {
            let overdraft_used = amount - balance.max(Decimal::ZERO);
            info!(
                account = %self.core.masked_id(),
                overdraft_used = %overdraft_used.round_dp(2),
                "Using overdraft protection"
            );
        }

        Ok(self.core.debit_unchecked(kind, amount))
    }
}

impl Account for CheckingAccount {
    fn kind(&self) -> AccountKind {
        AccountKind::Checking
    }

    fn holder_name(&self) -> &str {
        self.core.holder_name()
    }

    fn masked_id(&self) -> String {
        self.core.masked_id()
    }

    fn balance(&self) -> Decimal {
        self.core.balance()
    }

    fn history(&self) -> &[Transaction] {
        self.core.history()
    }

    fn deposit(&mut self, amount: Decimal) -> ApiResult<Decimal> {
        self.core
            .credit(TransactionKind::Deposit, amount)
            .inspect_err(|e| warn!(account = %self.core.masked_id(), error = %e, "Deposit rejected"))
    }

    fn withdraw(&mut self, amount: Decimal) -> ApiResult<Decimal> {
        self.debit_with_overdraft(TransactionKind::Withdrawal, amount)
            .inspect_err(|e| warn!(account = %self.core.masked_id(), error = %e, "Withdrawal rejected"))
    }

    fn charge_fee(&mut self, amount: Decimal) -> ApiResult<Decimal> {
        self.debit_with_overdraft(TransactionKind::Fee, amount)
            .inspect_err(|e| warn!(account = %self.core.masked_id(), error = %e, "Fee rejected"))
    }

    fn calculate_monthly_fee(&self) -> Decimal {
        if self.core.balance() > self.fees.checking_waiver_threshold {
            Decimal::ZERO
        } else {
            self.fees.checking_fee
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn bob() -> CheckingAccount {
        CheckingAccount::open("Bob Smith", "0987654321", dec!(500), dec!(200)).unwrap()
    }

    /// In-memory log sink shared with the test subscriber
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` under a subscriber writing plain-text events into a buffer and
    /// returns what was logged
    fn capture_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_withdraw_into_overdraft() {
        let mut checking = bob();

        assert_eq!(checking.withdraw(dec!(600)).unwrap(), dec!(-100));
        assert_eq!(checking.available_funds(), dec!(100));
    }

    #[test]
    fn test_withdraw_beyond_overdraft_rejected() {
        let mut checking = bob();
        checking.withdraw(dec!(600)).unwrap();

        let err = checking.withdraw(dec!(101)).unwrap_err();

        assert_eq!(
            err,
            ApiError::OverdraftExceeded {
                requested: dec!(101),
                available: dec!(100)
            }
        );
        assert_eq!(checking.balance(), dec!(-100));
        assert_eq!(checking.history().len(), 2);
    }

    #[test]
    fn test_withdraw_exactly_to_limit() {
        let mut checking = bob();
        assert_eq!(checking.withdraw(dec!(700)).unwrap(), dec!(-200));
        assert!(checking.withdraw(dec!(0.01)).is_err());
    }

    #[test]
    fn test_one_unit_beyond_available_fails() {
        let mut checking = bob();
        let available = checking.available_funds();

        assert!(checking.withdraw(available + dec!(1)).is_err());
        assert_eq!(checking.balance(), dec!(500));
    }

    #[test]
    fn test_non_positive_withdraw_rejected() {
        let mut checking = bob();
        assert_eq!(
            checking.withdraw(dec!(-1)).unwrap_err(),
            ApiError::NonPositiveAmount { amount: dec!(-1) }
        );
    }

    #[test]
    fn test_write_check() {
        let mut checking = bob();

        assert_eq!(checking.write_check("Electric Company", dec!(150)).unwrap(), dec!(350));
        assert!(checking.write_check("Landlord", dec!(1000)).is_err());
        assert_eq!(checking.balance(), dec!(350));
    }

    #[test]
    fn test_overdraft_usage_is_logged() {
        let mut checking = bob();

        let logs = capture_logs(|| {
            checking.withdraw(dec!(600)).unwrap();
        });

        assert!(logs.contains("Using overdraft protection"));
        assert!(logs.contains("overdraft_used=100"));
        assert!(logs.contains("account=****4321"));
    }

    #[test]
    fn test_funded_withdrawal_logs_no_overdraft() {
        let mut checking = bob();

        let logs = capture_logs(|| {
            checking.withdraw(dec!(500)).unwrap();
        });

        assert!(!logs.contains("Using overdraft protection"));
    }

    #[test]
    fn test_overdraft_usage_counts_only_new_shortfall() {
        let mut checking = bob();
        checking.withdraw(dec!(600)).unwrap();

        let logs = capture_logs(|| {
            checking.withdraw(dec!(50)).unwrap();
        });

        assert_eq!(checking.balance(), dec!(-150));
        assert!(logs.contains("overdraft_used=50"));
    }

    #[test]
    fn test_write_check_logs_payee() {
        let mut checking = bob();

        let logs = capture_logs(|| {
            checking.write_check("Electric Company", dec!(150)).unwrap();
        });

        assert!(logs.contains("Writing check"));
        assert!(logs.contains("Electric Company"));
        assert!(logs.contains("amount=150"));
    }

    #[test]
    fn test_fee_may_use_overdraft() {
        let mut checking = CheckingAccount::open("Eve", "1111222233", dec!(4), dec!(50)).unwrap();

        assert_eq!(checking.charge_fee(dec!(10)).unwrap(), dec!(-6));
        assert_eq!(
            checking.history().last().map(|t| t.kind()),
            Some(TransactionKind::Fee)
        );
    }

    #[test]
    fn test_negative_overdraft_limit_rejected() {
        assert!(CheckingAccount::open("Eve", "1111222233", dec!(4), dec!(-1)).is_err());
    }

    #[test]
    fn test_has_no_interest_capability() {
        let mut checking = bob();
        assert!(checking.has_debit_card());
        assert!(checking.interest_bearing_mut().is_none());
    }

    #[rstest]
    #[case(dec!(1001), dec!(0))]
    #[case(dec!(1000), dec!(10.0))]
    #[case(dec!(0), dec!(10.0))]
    fn test_monthly_fee(#[case] balance: Decimal, #[case] expected: Decimal) {
        let checking = CheckingAccount::open("Fee", "0987654321", balance, dec!(200)).unwrap();
        assert_eq!(checking.calculate_monthly_fee(), expected);
    }
}
