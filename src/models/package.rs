use crate::entities::PackageType;
use crate::entities::package_entity as packages;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePackageRequest {
    #[schema(example = "Monthly Unlimited")]
    pub name: String,
    pub package_type: PackageType,
    pub price_cents: i64,
    pub duration_days: Option<i32>,
    pub paper_quantity: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub duration_days: Option<i32>,
    pub paper_quantity: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PackageResponse {
    pub id: i64,
    pub name: String,
    pub package_type: PackageType,
    pub price_cents: i64,
    pub duration_days: Option<i32>,
    pub paper_quantity: Option<i32>,
    pub is_active: bool,
}

impl From<packages::Model> for PackageResponse {
    fn from(p: packages::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            package_type: p.package_type,
            price_cents: p.price_cents,
            duration_days: p.duration_days,
            paper_quantity: p.paper_quantity,
            is_active: p.is_active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Active,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// A user_packages row joined with its user and package for the admin panel.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub package: PackageResponse,
    pub is_active: bool,
    pub is_trial: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub papers_remaining: Option<i32>,
    pub created_at: DateTime<Utc>,
}
