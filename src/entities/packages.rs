use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "package_type")]
#[serde(rename_all = "snake_case")]
pub enum PackageType {
    #[sea_orm(string_value = "trial")]
    Trial,
    #[sea_orm(string_value = "papers")]
    Papers,
    #[sea_orm(string_value = "paper_pack")]
    PaperPack,
    #[sea_orm(string_value = "subscription")]
    Subscription,
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageType::Trial => write!(f, "trial"),
            PackageType::Papers => write!(f, "papers"),
            PackageType::PaperPack => write!(f, "paper_pack"),
            PackageType::Subscription => write!(f, "subscription"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "packages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub package_type: PackageType,
    pub price_cents: i64,
    pub duration_days: Option<i32>,
    pub paper_quantity: Option<i32>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
