use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "paper_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub paper_id: Uuid,
    pub question_id: i64,
    pub position: i32,
    pub marks: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
