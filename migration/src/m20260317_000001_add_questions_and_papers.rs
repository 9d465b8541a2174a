use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Questions {
    Table,
    Id,
    ChapterId,
    QuestionType,
    Text,
    OptionA,
    OptionB,
    OptionC,
    OptionD,
    CorrectOption,
    Marks,
    Difficulty,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Papers {
    Table,
    Id,
    UserId,
    ClassId,
    SubjectId,
    Title,
    Kind,
    TotalMarks,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PaperQuestions {
    Table,
    Id,
    PaperId,
    QuestionId,
    Position,
    Marks,
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
                    .as_enum(Alias::new("question_type"))
                    .values(vec![
                        Alias::new("mcq"),
                        Alias::new("short"),
                        Alias::new("long"),
                    ])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("question_difficulty"))
                    .values(vec![
                        Alias::new("easy"),
                        Alias::new("medium"),
                        Alias::new("hard"),
                    ])
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("paper_kind"))
                    .values(vec![Alias::new("exam"), Alias::new("quiz")])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::ChapterId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Questions::QuestionType)
                            .custom(Alias::new("question_type"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(Questions::Text).text().not_null())
                    .col(ColumnDef::new(Questions::OptionA).text().null())
                    .col(ColumnDef::new(Questions::OptionB).text().null())
                    .col(ColumnDef::new(Questions::OptionC).text().null())
                    .col(ColumnDef::new(Questions::OptionD).text().null())
                    .col(ColumnDef::new(Questions::CorrectOption).string_len(1).null())
                    .col(ColumnDef::new(Questions::Marks).integer().not_null())
                    .col(
                        ColumnDef::new(Questions::Difficulty)
                            .custom(Alias::new("question_difficulty"))
                            .not_null()
                            .default(Expr::cust("'medium'::question_difficulty")),
                    )
                    .col(ColumnDef::new(Questions::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Questions::CreatedAt)
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
                    .name("idx_questions_chapter_type")
                    .table(Questions::Table)
                    .col(Questions::ChapterId)
                    .col(Questions::QuestionType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Papers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Papers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Papers::UserId).uuid().not_null())
                    .col(ColumnDef::new(Papers::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Papers::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Papers::Title).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Papers::Kind)
                            .custom(Alias::new("paper_kind"))
                            .not_null()
                            .default(Expr::cust("'exam'::paper_kind")),
                    )
                    .col(ColumnDef::new(Papers::TotalMarks).integer().not_null())
                    .col(
                        ColumnDef::new(Papers::CreatedAt)
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
                    .name("idx_papers_user")
                    .table(Papers::Table)
                    .col(Papers::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaperQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaperQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaperQuestions::PaperId).uuid().not_null())
                    .col(
                        ColumnDef::new(PaperQuestions::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaperQuestions::Position).integer().not_null())
                    .col(ColumnDef::new(PaperQuestions::Marks).integer().not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_paper_questions_paper")
                    .table(PaperQuestions::Table)
                    .col(PaperQuestions::PaperId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(PaperQuestions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Papers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("paper_kind")).to_owned())
            .await?;
        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("question_difficulty"))
                    .to_owned(),
            )
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("question_type")).to_owned())
            .await?;
        Ok(())
    }
}
