use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Packages {
    Table,
    Id,
    Name,
    PackageType,
    PriceCents,
    DurationDays,
    PaperQuantity,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserPackages {
    Table,
    Id,
    UserId,
    PackageId,
    IsActive,
    IsTrial,
    ExpiresAt,
    PapersRemaining,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Referrals {
    Table,
    Id,
    ReferrerId,
    ReferredUserId,
    RewardGiven,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("package_type"))
                    .values(vec![
                        Alias::new("trial"),
                        Alias::new("papers"),
                        Alias::new("paper_pack"),
                        Alias::new("subscription"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Packages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Packages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Packages::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Packages::PackageType)
                            .custom(Alias::new("package_type"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Packages::PriceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Packages::DurationDays).integer().null())
                    .col(ColumnDef::new(Packages::PaperQuantity).integer().null())
                    .col(
                        ColumnDef::new(Packages::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Packages::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserPackages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserPackages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UserPackages::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserPackages::PackageId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserPackages::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserPackages::IsTrial)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserPackages::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(UserPackages::PapersRemaining).integer().null())
                    .col(
                        ColumnDef::new(UserPackages::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserPackages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_packages_user")
                    .table(UserPackages::Table)
                    .col(UserPackages::UserId)
                    .to_owned(),
            )
            .await?;
        // At most one active non-trial package per user. Partial unique
        // indexes are not expressible through the builder.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_user_packages_active_user \
                 ON user_packages (user_id) WHERE is_active AND NOT is_trial",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Referrals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Referrals::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Referrals::ReferrerId).uuid().not_null())
                    .col(ColumnDef::new(Referrals::ReferredUserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Referrals::RewardGiven)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Referrals::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_referrals_referred_user")
                    .table(Referrals::Table)
                    .col(Referrals::ReferredUserId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_referrals_referrer")
                    .table(Referrals::Table)
                    .col(Referrals::ReferrerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Referrals::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(UserPackages::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Packages::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("package_type")).to_owned())
            .await?;
        Ok(())
    }
}
