use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::Account;
use crate::error::{ApiError, ApiResult};

/// Result of charging the monthly fee
#[derive(Debug, Clone, PartialEq)]
pub enum FeeOutcome {
    Charged(Decimal),
    Waived,
    /// The fee was due but could not be debited; maintenance carried on regardless
    Failed(ApiError),
}

/// What a maintenance run did to one account
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceReport {
    pub holder: String,
    pub fee: FeeOutcome,
    /// Interest credited, `None` for variants without interest
    pub interest: Option<Decimal>,
    pub summary: String,
}

/// Stateless operations over any [`Account`] variant
pub struct BankManager;

impl BankManager {
    /// Charges the variant's monthly fee, then posts interest and resets the
    /// withdrawal counter on interest-bearing accounts.
    ///
    /// Individual failures are recorded in the report and never abort the run.
    pub fn process_monthly_maintenance(account: &mut dyn Account) -> MaintenanceReport {
        let holder = account.holder_name().to_string();
        info!(account = %account.masked_id(), kind = %account.kind(), "Processing monthly maintenance");

        let fee = account.calculate_monthly_fee();
        let fee = if fee > Decimal::ZERO {
            match account.charge_fee(fee) {
                Ok(_) => FeeOutcome::Charged(fee),
                Err(e) => {
                    warn!(account = %account.masked_id(), error = %e, "Monthly fee could not be charged");
                    FeeOutcome::Failed(e)
                }
            }
        } else {
            info!(account = %account.masked_id(), "Monthly fee waived");
            FeeOutcome::Waived
        };

        let interest = match account.interest_bearing_mut() {
            Some(savings) => {
                let interest = savings.apply_interest().unwrap_or_else(|e| {
                    warn!(error = %e, "Interest could not be applied");
                    Decimal::ZERO
                });
                savings.reset_period_counter();
                Some(interest)
            }
            None => None,
        };

        MaintenanceReport {
            holder,
            fee,
            interest,
            summary: account.summary(),
        }
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// The destination is only credited after the source's own withdraw rule accepted
    /// the debit, so a rejected withdrawal never produces a deposit.
    pub fn transfer(from: &mut dyn Account, to: &mut dyn Account, amount: Decimal) -> ApiResult<()> {
        info!(
            from = %from.masked_id(),
            to = %to.masked_id(),
            amount = %amount,
            "Transferring funds"
        );

        if let Err(e) = from.withdraw(amount) {
            warn!(from = %from.masked_id(), error = %e, "Transfer rejected by source account");
            return Err(e);
        }
        to.deposit(amount)?;
        Ok(())
    }
}
