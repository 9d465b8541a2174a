use crate::entities::profile_entity as profiles;
use crate::entities::{SubscriptionStatus, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "Ali Raza")]
    pub full_name: String,
    #[schema(example = "ali@example.com")]
    pub email: String,
    #[schema(example = "Password123")]
    pub password: String,
    /// student | teacher | academy; admin roles cannot be self-assigned.
    pub role: Option<UserRole>,
    #[schema(example = "+923001234567")]
    pub cellno: Option<String>,
    #[schema(example = "A1B2C3D4")]
    pub referral_code: Option<String>,
    pub institution: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ali@example.com")]
    pub email: String,
    #[schema(example = "Password123")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub cellno: Option<String>,
    pub institution: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminUpdateProfileRequest {
    pub role: Option<UserRole>,
    pub subscription_status: Option<SubscriptionStatus>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProfileQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub role: Option<UserRole>,
    /// Substring match on full_name or email.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub cellno: Option<String>,
    pub role: UserRole,
    pub subscription_status: SubscriptionStatus,
    pub trial_given: bool,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub papers_generated: i64,
    pub referral_code: String,
    pub institution: Option<String>,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<profiles::Model> for ProfileResponse {
    fn from(p: profiles::Model) -> Self {
        Self {
            id: p.id,
            full_name: p.full_name,
            email: p.email,
            cellno: p.cellno,
            role: p.role,
            subscription_status: p.subscription_status,
            trial_given: p.trial_given,
            trial_ends_at: p.trial_ends_at,
            papers_generated: p.papers_generated,
            referral_code: p.referral_code,
            institution: p.institution,
            logo: p.logo,
            created_at: p.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: ProfileResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}
