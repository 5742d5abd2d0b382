pub mod account;
pub mod user;

// Re-exports
pub use account::*;
pub use user::*;
