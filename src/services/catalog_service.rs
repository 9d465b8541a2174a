use crate::database::DbPool;
use crate::entities::{
    chapter_entity as chapters, class_entity as classes, subject_entity as subjects,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::with_read_retry;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct CatalogService {
    pool: DbPool,
}

impl CatalogService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn list_classes(&self) -> AppResult<Vec<ClassResponse>> {
        let items = with_read_retry(|| async {
            classes::Entity::find()
                .order_by_asc(classes::Column::SortOrder)
                .all(&self.pool)
                .await
                .map_err(AppError::from)
        })
        .await?;

        Ok(items.into_iter().map(ClassResponse::from).collect())
    }

    pub async fn create_class(&self, request: CreateClassRequest) -> AppResult<ClassResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Class name is required".to_string()));
        }

        let model = classes::ActiveModel {
            name: Set(request.name.trim().to_string()),
            sort_order: Set(request.sort_order.unwrap_or(0)),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(ClassResponse::from(model))
    }

    pub async fn update_class(
        &self,
        class_id: i64,
        request: UpdateClassRequest,
    ) -> AppResult<ClassResponse> {
        let mut model = classes::Entity::find_by_id(class_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?
            .into_active_model();

        if let Some(name) = request.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(sort_order) = request.sort_order {
            model.sort_order = Set(sort_order);
        }
        let updated = model.update(&self.pool).await?;

        Ok(ClassResponse::from(updated))
    }

    pub async fn delete_class(&self, class_id: i64) -> AppResult<()> {
        let res = classes::Entity::delete_by_id(class_id)
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Class not found".to_string()));
        }
        Ok(())
    }

    pub async fn list_subjects(&self, class_id: i64) -> AppResult<Vec<SubjectResponse>> {
        let items = with_read_retry(|| async {
            subjects::Entity::find()
                .filter(subjects::Column::ClassId.eq(class_id))
                .order_by_asc(subjects::Column::Name)
                .all(&self.pool)
                .await
                .map_err(AppError::from)
        })
        .await?;

        Ok(items.into_iter().map(SubjectResponse::from).collect())
    }

    pub async fn create_subject(&self, request: CreateSubjectRequest) -> AppResult<SubjectResponse> {
        let class = classes::Entity::find_by_id(request.class_id)
            .one(&self.pool)
            .await?;
        if class.is_none() {
            return Err(AppError::NotFound("Class not found".to_string()));
        }

        let model = subjects::ActiveModel {
            class_id: Set(request.class_id),
            name: Set(request.name.trim().to_string()),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(SubjectResponse::from(model))
    }

    pub async fn update_subject(
        &self,
        subject_id: i64,
        request: UpdateSubjectRequest,
    ) -> AppResult<SubjectResponse> {
        let mut model = subjects::Entity::find_by_id(subject_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Subject not found".to_string()))?
            .into_active_model();

        if let Some(name) = request.name {
            model.name = Set(name.trim().to_string());
        }
        let updated = model.update(&self.pool).await?;

        Ok(SubjectResponse::from(updated))
    }

    pub async fn delete_subject(&self, subject_id: i64) -> AppResult<()> {
        let res = subjects::Entity::delete_by_id(subject_id)
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Subject not found".to_string()));
        }
        Ok(())
    }

    pub async fn list_chapters(&self, subject_id: i64) -> AppResult<Vec<ChapterResponse>> {
        let items = with_read_retry(|| async {
            chapters::Entity::find()
                .filter(chapters::Column::SubjectId.eq(subject_id))
                .order_by_asc(chapters::Column::ChapterNo)
                .all(&self.pool)
                .await
                .map_err(AppError::from)
        })
        .await?;

        Ok(items.into_iter().map(ChapterResponse::from).collect())
    }

    pub async fn create_chapter(&self, request: CreateChapterRequest) -> AppResult<ChapterResponse> {
        let subject = subjects::Entity::find_by_id(request.subject_id)
            .one(&self.pool)
            .await?;
        if subject.is_none() {
            return Err(AppError::NotFound("Subject not found".to_string()));
        }

        let model = chapters::ActiveModel {
            subject_id: Set(request.subject_id),
            name: Set(request.name.trim().to_string()),
            chapter_no: Set(request.chapter_no),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(ChapterResponse::from(model))
    }

    pub async fn update_chapter(
        &self,
        chapter_id: i64,
        request: UpdateChapterRequest,
    ) -> AppResult<ChapterResponse> {
        let mut model = chapters::Entity::find_by_id(chapter_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Chapter not found".to_string()))?
            .into_active_model();

        if let Some(name) = request.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(chapter_no) = request.chapter_no {
            model.chapter_no = Set(chapter_no);
        }
        let updated = model.update(&self.pool).await?;

        Ok(ChapterResponse::from(updated))
    }

    pub async fn delete_chapter(&self, chapter_id: i64) -> AppResult<()> {
        let res = chapters::Entity::delete_by_id(chapter_id)
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Chapter not found".to_string()));
        }
        Ok(())
    }
}
