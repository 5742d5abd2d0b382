pub mod user;
pub mod admin_user;

pub use user::*;
pub use admin_user::*;
