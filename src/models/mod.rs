pub mod catalog;
pub mod common;
pub mod contact;
pub mod package;
pub mod pagination;
pub mod paper;
pub mod profile;
pub mod question;
pub mod referral;
pub mod subscription;

pub use catalog::*;
pub use common::*;
pub use contact::*;
pub use package::*;
pub use pagination::*;
pub use paper::*;
pub use profile::*;
pub use question::*;
pub use referral::*;
pub use subscription::*;
