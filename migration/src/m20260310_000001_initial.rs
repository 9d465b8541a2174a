use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    FullName,
    Email,
    Cellno,
    PasswordHash,
    Role,
    SubscriptionStatus,
    TrialGiven,
    TrialEndsAt,
    PapersGenerated,
    ReferralCode,
    ReferredBy,
    Institution,
    Logo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // enums
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("user_role"))
                    .values(vec![
                        Alias::new("student"),
                        Alias::new("teacher"),
                        Alias::new("academy"),
                        Alias::new("admin"),
                        Alias::new("super_admin"),
                    ])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("subscription_status"))
                    .values(vec![
                        Alias::new("inactive"),
                        Alias::new("active"),
                        Alias::new("trial"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profiles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Profiles::FullName).string_len(100).not_null())
                    .col(ColumnDef::new(Profiles::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Profiles::Cellno).string_len(20).null())
                    .col(ColumnDef::new(Profiles::PasswordHash).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Profiles::Role)
                            .custom(Alias::new("user_role"))
                            .not_null()
                            .default(Expr::cust("'student'::user_role")),
                    )
                    .col(
                        ColumnDef::new(Profiles::SubscriptionStatus)
                            .custom(Alias::new("subscription_status"))
                            .not_null()
                            .default(Expr::cust("'inactive'::subscription_status")),
                    )
                    .col(
                        ColumnDef::new(Profiles::TrialGiven)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Profiles::TrialEndsAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Profiles::PapersGenerated)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Profiles::ReferralCode).string_len(8).not_null())
                    .col(ColumnDef::new(Profiles::ReferredBy).uuid().null())
                    .col(ColumnDef::new(Profiles::Institution).string_len(255).null())
                    .col(ColumnDef::new(Profiles::Logo).string_len(512).null())
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Profiles::UpdatedAt)
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
                    .name("uq_profiles_email")
                    .table(Profiles::Table)
                    .col(Profiles::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_profiles_referral_code")
                    .table(Profiles::Table)
                    .col(Profiles::ReferralCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Profiles::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("subscription_status")).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("user_role")).to_owned())
            .await?;
        Ok(())
    }
}
