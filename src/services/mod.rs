pub mod auth_service;
pub mod catalog_service;
pub mod contact_service;
pub mod eligibility;
pub mod package_service;
pub mod paper_service;
pub mod profile_service;
pub mod question_service;
pub mod referral_service;
pub mod subscription_service;

pub use auth_service::*;
pub use catalog_service::*;
pub use contact_service::*;
pub use package_service::*;
pub use paper_service::*;
pub use profile_service::*;
pub use question_service::*;
pub use referral_service::ReferralService;
pub use subscription_service::SubscriptionService;
