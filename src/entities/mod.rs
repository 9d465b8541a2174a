pub mod chapters;
pub mod classes;
pub mod packages;
pub mod paper_questions;
pub mod papers;
pub mod profiles;
pub mod questions;
pub mod referrals;
pub mod subjects;
pub mod user_packages;

pub use chapters as chapter_entity;
pub use classes as class_entity;
pub use packages as package_entity;
pub use paper_questions as paper_question_entity;
pub use papers as paper_entity;
pub use profiles as profile_entity;
pub use questions as question_entity;
pub use referrals as referral_entity;
pub use subjects as subject_entity;
pub use user_packages as user_package_entity;

pub use packages::PackageType;
pub use papers::PaperKind;
pub use profiles::{SubscriptionStatus, UserRole};
pub use questions::{Difficulty, QuestionType};
