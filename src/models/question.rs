use crate::entities::question_entity as questions;
use crate::entities::{Difficulty, QuestionType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateQuestionRequest {
    pub chapter_id: i64,
    pub question_type: QuestionType,
    #[schema(example = "State Newton's second law of motion.")]
    pub text: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    /// "a" | "b" | "c" | "d"; MCQ only.
    pub correct_option: Option<String>,
    pub marks: i32,
    pub difficulty: Difficulty,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateQuestionRequest {
    pub text: Option<String>,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_option: Option<String>,
    pub marks: Option<i32>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct QuestionQuery {
    pub chapter_id: Option<i64>,
    pub question_type: Option<QuestionType>,
    pub difficulty: Option<Difficulty>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuestionResponse {
    pub id: i64,
    pub chapter_id: i64,
    pub question_type: QuestionType,
    pub text: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_option: Option<String>,
    pub marks: i32,
    pub difficulty: Difficulty,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<questions::Model> for QuestionResponse {
    fn from(q: questions::Model) -> Self {
        Self {
            id: q.id,
            chapter_id: q.chapter_id,
            question_type: q.question_type,
            text: q.text,
            option_a: q.option_a,
            option_b: q.option_b,
            option_c: q.option_c,
            option_d: q.option_d,
            correct_option: q.correct_option,
            marks: q.marks,
            difficulty: q.difficulty,
            created_by: q.created_by,
            created_at: q.created_at.unwrap_or_else(Utc::now),
        }
    }
}
