pub use sea_orm_migration::prelude::*;

mod m20260310_000001_initial;
mod m20260310_000002_add_catalog;
mod m20260317_000001_add_questions_and_papers;
mod m20260324_000001_add_packages_and_referrals;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260310_000001_initial::Migration),
            Box::new(m20260310_000002_add_catalog::Migration),
            Box::new(m20260317_000001_add_questions_and_papers::Migration),
            Box::new(m20260324_000001_add_packages_and_referrals::Migration),
        ]
    }
}
