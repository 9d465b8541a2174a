use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
    Name,
    SortOrder,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
    ClassId,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Chapters {
    Table,
    Id,
    SubjectId,
    Name,
    ChapterNo,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Classes::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Classes::CreatedAt)
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
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Subjects::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Subjects::CreatedAt)
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
                    .name("idx_subjects_class")
                    .table(Subjects::Table)
                    .col(Subjects::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Chapters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Chapters::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Chapters::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Chapters::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Chapters::ChapterNo).integer().not_null())
                    .col(
                        ColumnDef::new(Chapters::CreatedAt)
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
                    .name("idx_chapters_subject")
                    .table(Chapters::Table)
                    .col(Chapters::SubjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Chapters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Classes::Table).to_owned())
            .await?;
        Ok(())
    }
}
