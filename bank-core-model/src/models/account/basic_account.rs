use bank_core_api::{Account, AccountKind, ApiResult, Transaction, TransactionKind};
use rust_decimal::Decimal;
use tracing::warn;

use super::account_core::AccountCore;
use crate::config::{BankConfig, FeeSchedule};

/// Plain account carrying only the base rules: no overdraft, flat monthly fee.
#[derive(Debug, Clone)]
pub struct BasicAccount {
    core: AccountCore,
    fees: FeeSchedule,
}

impl BasicAccount {
    pub fn open(holder: &str, number: &str, initial_deposit: Decimal) -> ApiResult<Self> {
        Self::open_with_config(holder, number, initial_deposit, &BankConfig::default())
    }

    pub fn open_with_config(
        holder: &str,
        number: &str,
        initial_deposit: Decimal,
        config: &BankConfig,
    ) -> ApiResult<Self> {
        Ok(Self {
            core: AccountCore::open(holder, number, initial_deposit)?,
            fees: config.fees,
        })
    }

    pub fn core(&self) -> &AccountCore {
        &self.core
    }
}

impl Account for BasicAccount {
    fn kind(&self) -> AccountKind {
        AccountKind::Basic
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
        self.core
            .withdraw_funded(TransactionKind::Withdrawal, amount)
            .inspect_err(|e| warn!(account = %self.core.masked_id(), error = %e, "Withdrawal rejected"))
    }

    fn charge_fee(&mut self, amount: Decimal) -> ApiResult<Decimal> {
        self.core
            .withdraw_funded(TransactionKind::Fee, amount)
            .inspect_err(|e| warn!(account = %self.core.masked_id(), error = %e, "Fee rejected"))
    }

    fn calculate_monthly_fee(&self) -> Decimal {
        self.fees.base_fee
    }
}
