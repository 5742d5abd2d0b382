use bank_core_api::{ApiError, ApiResult};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of trailing characters left visible by [`AccountNumber::masked`]
pub const VISIBLE_SUFFIX_LEN: usize = 4;

const MASK: &str = "****";

/// Opaque account identifier (up to 34 characters, the IBAN maximum)
///
/// Deserialization goes through [`AccountNumber::new`], so a stored value is
/// held to the same length rules as a freshly opened account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct AccountNumber(HeaplessString<34>);

impl AccountNumber {
    pub fn new(value: &str) -> ApiResult<Self> {
        let value = value.trim();
        if value.chars().count() < VISIBLE_SUFFIX_LEN {
            return Err(ApiError::InvalidAccountNumber(format!(
                "'{value}' is shorter than {VISIBLE_SUFFIX_LEN} characters"
            )));
        }
        HeaplessString::from_str(value)
            .map(Self)
            .map_err(|_| ApiError::InvalidAccountNumber(format!("'{value}' is too long (max 34 chars)")))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Fixed-length placeholder followed by the last 4 characters
    pub fn masked(&self) -> String {
        let len = self.0.chars().count();
        let suffix: String = self
            .0
            .chars()
            .skip(len.saturating_sub(VISIBLE_SUFFIX_LEN))
            .collect();
        format!("{MASK}{suffix}")
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = ApiError;

    fn try_from(value: String) -> ApiResult<Self> {
        Self::new(&value)
    }
}
