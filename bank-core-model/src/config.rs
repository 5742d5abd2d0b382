use bank_core_api::{ApiError, ApiResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Monthly maintenance fees per account variant.
///
/// A variant's fee is waived when the balance is strictly above its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub base_fee: Decimal,
    pub savings_fee: Decimal,
    pub savings_waiver_threshold: Decimal,
    pub checking_fee: Decimal,
    pub checking_waiver_threshold: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            base_fee: dec!(5.00),
            savings_fee: dec!(3.00),
            savings_waiver_threshold: dec!(500.00),
            checking_fee: dec!(10.00),
            checking_waiver_threshold: dec!(1000.00),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsRules {
    pub max_withdrawals_per_period: u32,
}

impl Default for SavingsRules {
    fn default() -> Self {
        Self {
            max_withdrawals_per_period: 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    pub fees: FeeSchedule,
    pub savings: SavingsRules,
}

impl BankConfig {
    /// Parses a configuration from JSON; missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> ApiResult<Self> {
        let config: BankConfig = serde_json::from_str(json)
            .map_err(|e| ApiError::ValidationError(format!("Invalid bank configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ApiResult<()> {
        let fees = [
            ("base_fee", self.fees.base_fee),
            ("savings_fee", self.fees.savings_fee),
            ("checking_fee", self.fees.checking_fee),
        ];
        for (name, fee) in fees {
            if fee < Decimal::ZERO {
                return Err(ApiError::ValidationError(format!(
                    "{name} cannot be negative, got {fee}"
                )));
            }
        }
        Ok(())
    }
}
