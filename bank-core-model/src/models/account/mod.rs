pub mod account_number;
pub mod account_core;
pub mod basic_account;
pub mod savings_account;
pub mod checking_account;

pub use account_number::*;
pub use account_core::AccountCore;
pub use basic_account::*;
pub use savings_account::*;
pub use checking_account::*;
