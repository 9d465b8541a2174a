pub mod admin;
pub mod auth;
pub mod catalog;
pub mod contact;
pub mod paper;
pub mod profile;
pub mod question;
pub mod referral;
pub mod subscription;

pub use admin::admin_config;
pub use auth::auth_config;
pub use catalog::catalog_config;
pub use contact::contact_config;
pub use paper::paper_config;
pub use profile::profile_config;
pub use question::question_config;
pub use referral::referral_config;
pub use subscription::subscription_config;
