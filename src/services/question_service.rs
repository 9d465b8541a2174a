use crate::database::DbPool;
use crate::entities::QuestionType;
use crate::entities::{chapter_entity as chapters, question_entity as questions};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

const VALID_OPTIONS: [&str; 4] = ["a", "b", "c", "d"];

#[derive(Clone)]
pub struct QuestionService {
    pool: DbPool,
}

impl QuestionService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn validate_mcq_fields(
        question_type: &QuestionType,
        option_a: &Option<String>,
        option_b: &Option<String>,
        option_c: &Option<String>,
        option_d: &Option<String>,
        correct_option: &Option<String>,
    ) -> AppResult<()> {
        match question_type {
            QuestionType::Mcq => {
                if option_a.is_none() || option_b.is_none() || option_c.is_none() || option_d.is_none()
                {
                    return Err(AppError::ValidationError(
                        "MCQ questions require options a-d".to_string(),
                    ));
                }
                match correct_option.as_deref() {
                    Some(opt) if VALID_OPTIONS.contains(&opt) => Ok(()),
                    _ => Err(AppError::ValidationError(
                        "MCQ questions require correct_option in a-d".to_string(),
                    )),
                }
            }
            _ => {
                if correct_option.is_some() {
                    return Err(AppError::ValidationError(
                        "correct_option is only valid for MCQ questions".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    pub async fn create_question(
        &self,
        created_by: Uuid,
        request: CreateQuestionRequest,
    ) -> AppResult<QuestionResponse> {
        if request.text.trim().is_empty() {
            return Err(AppError::ValidationError("Question text is required".to_string()));
        }
        if request.marks <= 0 {
            return Err(AppError::ValidationError("Marks must be positive".to_string()));
        }
        Self::validate_mcq_fields(
            &request.question_type,
            &request.option_a,
            &request.option_b,
            &request.option_c,
            &request.option_d,
            &request.correct_option,
        )?;

        let chapter = chapters::Entity::find_by_id(request.chapter_id)
            .one(&self.pool)
            .await?;
        if chapter.is_none() {
            return Err(AppError::NotFound("Chapter not found".to_string()));
        }

        let model = questions::ActiveModel {
            chapter_id: Set(request.chapter_id),
            question_type: Set(request.question_type),
            text: Set(request.text.trim().to_string()),
            option_a: Set(request.option_a),
            option_b: Set(request.option_b),
            option_c: Set(request.option_c),
            option_d: Set(request.option_d),
            correct_option: Set(request.correct_option),
            marks: Set(request.marks),
            difficulty: Set(request.difficulty),
            created_by: Set(created_by),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(QuestionResponse::from(model))
    }

    pub async fn list_questions(
        &self,
        query: &QuestionQuery,
    ) -> AppResult<PaginatedResponse<QuestionResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let mut find = questions::Entity::find();
        if let Some(chapter_id) = query.chapter_id {
            find = find.filter(questions::Column::ChapterId.eq(chapter_id));
        }
        if let Some(question_type) = &query.question_type {
            find = find.filter(questions::Column::QuestionType.eq(question_type.clone()));
        }
        if let Some(difficulty) = &query.difficulty {
            find = find.filter(questions::Column::Difficulty.eq(difficulty.clone()));
        }

        let total = find.clone().count(&self.pool).await? as i64;
        let items = find
            .order_by_desc(questions::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(QuestionResponse::from).collect(),
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    pub async fn update_question(
        &self,
        question_id: i64,
        request: UpdateQuestionRequest,
    ) -> AppResult<QuestionResponse> {
        let existing = questions::Entity::find_by_id(question_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

        let option_a = request.option_a.clone().or(existing.option_a.clone());
        let option_b = request.option_b.clone().or(existing.option_b.clone());
        let option_c = request.option_c.clone().or(existing.option_c.clone());
        let option_d = request.option_d.clone().or(existing.option_d.clone());
        let correct_option = request
            .correct_option
            .clone()
            .or(existing.correct_option.clone());
        Self::validate_mcq_fields(
            &existing.question_type,
            &option_a,
            &option_b,
            &option_c,
            &option_d,
            &correct_option,
        )?;

        if let Some(marks) = request.marks {
            if marks <= 0 {
                return Err(AppError::ValidationError("Marks must be positive".to_string()));
            }
        }

        let mut model = existing.into_active_model();
        if let Some(text) = request.text {
            model.text = Set(text.trim().to_string());
        }
        model.option_a = Set(option_a);
        model.option_b = Set(option_b);
        model.option_c = Set(option_c);
        model.option_d = Set(option_d);
        model.correct_option = Set(correct_option);
        if let Some(marks) = request.marks {
            model.marks = Set(marks);
        }
        if let Some(difficulty) = request.difficulty {
            model.difficulty = Set(difficulty);
        }
        let updated = model.update(&self.pool).await?;

        Ok(QuestionResponse::from(updated))
    }

    pub async fn delete_question(&self, question_id: i64) -> AppResult<()> {
        let res = questions::Entity::delete_by_id(question_id)
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Question not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcq_requires_all_options_and_answer() {
        let some = |s: &str| Some(s.to_string());
        assert!(
            QuestionService::validate_mcq_fields(
                &QuestionType::Mcq,
                &some("1"),
                &some("2"),
                &some("3"),
                &some("4"),
                &some("b"),
            )
            .is_ok()
        );
        assert!(
            QuestionService::validate_mcq_fields(
                &QuestionType::Mcq,
                &some("1"),
                &some("2"),
                &some("3"),
                &None,
                &some("b"),
            )
            .is_err()
        );
        assert!(
            QuestionService::validate_mcq_fields(
                &QuestionType::Mcq,
                &some("1"),
                &some("2"),
                &some("3"),
                &some("4"),
                &some("e"),
            )
            .is_err()
        );
    }

    #[test]
    fn test_non_mcq_rejects_correct_option() {
        assert!(
            QuestionService::validate_mcq_fields(
                &QuestionType::Short,
                &None,
                &None,
                &None,
                &None,
                &Some("a".to_string()),
            )
            .is_err()
        );
        assert!(
            QuestionService::validate_mcq_fields(
                &QuestionType::Long,
                &None,
                &None,
                &None,
                &None,
                &None,
            )
            .is_ok()
        );
    }
}
