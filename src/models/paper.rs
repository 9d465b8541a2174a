use crate::entities::PaperKind;
use crate::entities::paper_entity as papers;
use crate::models::QuestionResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct QuestionCounts {
    #[serde(default)]
    pub mcq: u32,
    #[serde(default)]
    pub short: u32,
    #[serde(default)]
    pub long: u32,
}

impl QuestionCounts {
    pub fn total(&self) -> u32 {
        self.mcq + self.short + self.long
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GeneratePaperRequest {
    #[schema(example = "Physics - Chapter 3 Test")]
    pub title: String,
    pub class_id: i64,
    pub subject_id: i64,
    pub chapter_ids: Vec<i64>,
    /// quiz papers are composed of MCQs only.
    pub kind: PaperKind,
    pub counts: QuestionCounts,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaperQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub kind: Option<PaperKind>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaperResponse {
    pub id: Uuid,
    pub title: String,
    pub kind: PaperKind,
    pub class_id: i64,
    pub subject_id: i64,
    pub total_marks: i32,
    pub created_at: DateTime<Utc>,
}

impl From<papers::Model> for PaperResponse {
    fn from(p: papers::Model) -> Self {
        Self {
            id: p.id,
            title: p.title,
            kind: p.kind,
            class_id: p.class_id,
            subject_id: p.subject_id,
            total_marks: p.total_marks,
            created_at: p.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaperQuestionResponse {
    pub position: i32,
    pub marks: i32,
    pub question: QuestionResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaperDetailResponse {
    #[serde(flatten)]
    pub paper: PaperResponse,
    pub questions: Vec<PaperQuestionResponse>,
}
