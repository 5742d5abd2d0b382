use bank_core_api::{
    Account, AccountKind, ApiError, ApiResult, InterestBearing, Transaction, TransactionKind,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info, warn};

use super::account_core::AccountCore;
use crate::config::{BankConfig, FeeSchedule};

/// # Documentation
/// Interest-bearing account with a per-period withdrawal cap.
///
/// - `withdrawals_this_period` never exceeds `max_withdrawals_per_period`; only
///   [`InterestBearing::reset_period_counter`] sets it back to zero.
/// - Maintenance fees go through the same capped withdraw rule and count toward the cap.
/// - Interest is simple monthly: `balance * annual_rate_percent / 100 / 12`.
#[derive(Debug, Clone)]
pub struct SavingsAccount {
    core: AccountCore,
    fees: FeeSchedule,
    annual_rate_percent: Decimal,
    withdrawals_this_period: u32,
    max_withdrawals_per_period: u32,
}

impl SavingsAccount {
    pub fn open(
        holder: &str,
        number: &str,
        initial_deposit: Decimal,
        annual_rate_percent: Decimal,
    ) -> ApiResult<Self> {
        Self::open_with_config(
            holder,
            number,
            initial_deposit,
            annual_rate_percent,
            &BankConfig::default(),
        )
    }

    pub fn open_with_config(
        holder: &str,
        number: &str,
        initial_deposit: Decimal,
        annual_rate_percent: Decimal,
        config: &BankConfig,
    ) -> ApiResult<Self> {
        if annual_rate_percent < Decimal::ZERO {
            return Err(ApiError::NegativeRate {
                rate: annual_rate_percent,
            });
        }
        Ok(Self {
            core: AccountCore::open(holder, number, initial_deposit)?,
            fees: config.fees,
            annual_rate_percent,
            withdrawals_this_period: 0,
            max_withdrawals_per_period: config.savings.max_withdrawals_per_period,
        })
    }

    pub fn core(&self) -> &AccountCore {
        &self.core
    }

    pub fn interest_rate(&self) -> Decimal {
        self.annual_rate_percent
    }

    pub fn withdrawals_this_period(&self) -> u32 {
        self.withdrawals_this_period
    }

    pub fn max_withdrawals_per_period(&self) -> u32 {
        self.max_withdrawals_per_period
    }

    /// Withdraw rule shared by customer withdrawals and fees: the period cap is
    /// checked first, then the zero floor; only a successful debit is counted.
    fn capped_withdraw(&mut self, kind: TransactionKind, amount: Decimal) -> ApiResult<Decimal> {
        if self.withdrawals_this_period >= self.max_withdrawals_per_period {
            return Err(ApiError::WithdrawalLimitReached {
                limit: self.max_withdrawals_per_period,
            });
        }

        let balance = self.core.withdraw_funded(kind, amount)?;
        self.withdrawals_this_period += 1;
        Ok(balance)
    }

    /// One month of interest on the current balance
    pub fn monthly_interest(&self) -> Decimal {
        self.core.balance() * self.annual_rate_percent / dec!(100) / dec!(12)
    }
}

impl Account for SavingsAccount {
    fn kind(&self) -> AccountKind {
        AccountKind::Savings
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
        self.capped_withdraw(TransactionKind::Withdrawal, amount)
            .inspect_err(|e| warn!(account = %self.core.masked_id(), error = %e, "Withdrawal rejected"))
    }

    fn charge_fee(&mut self, amount: Decimal) -> ApiResult<Decimal> {
        self.capped_withdraw(TransactionKind::Fee, amount)
            .inspect_err(|e| warn!(account = %self.core.masked_id(), error = %e, "Fee rejected"))
    }

    fn calculate_monthly_fee(&self) -> Decimal {
        if self.core.balance() > self.fees.savings_waiver_threshold {
            Decimal::ZERO
        } else {
            self.fees.savings_fee
        }
    }

    fn interest_bearing_mut(&mut self) -> Option<&mut dyn InterestBearing> {
        Some(self)
    }
}

impl InterestBearing for SavingsAccount {
    fn apply_interest(&mut self) -> ApiResult<Decimal> {
        let interest = self.monthly_interest();
        if interest <= Decimal::ZERO {
            debug!(account = %self.core.masked_id(), "No interest to post");
            return Ok(Decimal::ZERO);
        }
        self.core.credit(TransactionKind::Interest, interest)?;
        info!(account = %self.core.masked_id(), interest = %interest.round_dp(2), "Interest applied");
        Ok(interest)
    }

    fn reset_period_counter(&mut self) {
        debug!(
            account = %self.core.masked_id(),
            withdrawals = self.withdrawals_this_period,
            "Resetting withdrawal counter"
        );
        self.withdrawals_this_period = 0;
    }
}
