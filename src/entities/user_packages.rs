use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

// `is_active` doubles as the admin-approval flag: rows are inserted
// pending (false) and flipped on approval.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "user_packages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub package_id: i64,
    pub is_active: bool,
    pub is_trial: bool,
    pub expires_at: Option<DateTime<Utc>>,
    /// NULL means unlimited papers for the package window.
    pub papers_remaining: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
