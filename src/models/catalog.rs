use crate::entities::{chapter_entity as chapters, class_entity as classes, subject_entity as subjects};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateClassRequest {
    #[schema(example = "Class 9")]
    pub name: String,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassResponse {
    pub id: i64,
    pub name: String,
    pub sort_order: i32,
}

impl From<classes::Model> for ClassResponse {
    fn from(c: classes::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            sort_order: c.sort_order,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSubjectRequest {
    pub class_id: i64,
    #[schema(example = "Physics")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectResponse {
    pub id: i64,
    pub class_id: i64,
    pub name: String,
}

impl From<subjects::Model> for SubjectResponse {
    fn from(s: subjects::Model) -> Self {
        Self {
            id: s.id,
            class_id: s.class_id,
            name: s.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateChapterRequest {
    pub subject_id: i64,
    #[schema(example = "Kinematics")]
    pub name: String,
    pub chapter_no: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateChapterRequest {
    pub name: Option<String>,
    pub chapter_no: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChapterResponse {
    pub id: i64,
    pub subject_id: i64,
    pub name: String,
    pub chapter_no: i32,
}

impl From<chapters::Model> for ChapterResponse {
    fn from(c: chapters::Model) -> Self {
        Self {
            id: c.id,
            subject_id: c.subject_id,
            name: c.name,
            chapter_no: c.chapter_no,
        }
    }
}
