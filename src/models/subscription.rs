use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    pub package_id: i64,
}

/// Paper allowance: either a metered count or unlimited for the window.
/// Serializes as a number or the literal string "unlimited".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PapersAllowance {
    Unlimited,
    Count(i64),
}

impl Serialize for PapersAllowance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PapersAllowance::Unlimited => serializer.serialize_str("unlimited"),
            PapersAllowance::Count(n) => serializer.serialize_i64(*n),
        }
    }
}

impl PapersAllowance {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, PapersAllowance::Count(n) if *n <= 0)
    }
}

/// Output of the eligibility resolver; the only shape handlers are allowed
/// to derive subscription state from.
#[derive(Debug, Serialize, ToSchema)]
pub struct Entitlement {
    pub is_trial: bool,
    pub days_remaining: i64,
    pub has_active_subscription: bool,
    #[schema(value_type = Object)]
    pub papers_remaining: PapersAllowance,
    pub trial_eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
