use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct ReferralResponse {
    pub referred_user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub reward_given: bool,
    pub created_at: DateTime<Utc>,
}
