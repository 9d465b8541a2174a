pub mod jwt;
pub mod password;
pub mod phone;
pub mod referral_code;
pub mod retry;

pub use jwt::*;
pub use password::*;
pub use phone::*;
pub use referral_code::{generate_referral_code, generate_unique_referral_code};
pub use retry::with_read_retry;
