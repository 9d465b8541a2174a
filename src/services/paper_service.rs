use crate::database::DbPool;
use crate::entities::{
    PackageType, PaperKind, QuestionType, chapter_entity as chapters, paper_entity as papers,
    paper_question_entity as paper_questions, profile_entity as profiles,
    question_entity as questions, subject_entity as subjects,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::eligibility::{self, ActivePackage, ProfileSnapshot};
use crate::services::subscription_service::find_active_package;
use chrono::Utc;
use rand::seq::SliceRandom;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

const MAX_QUESTIONS_PER_PAPER: u32 = 100;

#[derive(Clone)]
pub struct PaperService {
    pool: DbPool,
}

impl PaperService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn generate_paper(
        &self,
        user_id: Uuid,
        request: GeneratePaperRequest,
    ) -> AppResult<PaperDetailResponse> {
        Self::validate_request(&request)?;

        let txn = self.pool.begin().await?;

        let profile = profiles::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        let active = find_active_package(&txn, user_id).await?;
        let active_snapshot = active.as_ref().map(|(row, package)| ActivePackage {
            package_type: package.package_type.clone(),
            expires_at: row.expires_at,
            papers_remaining: row.papers_remaining,
        });

        let now = Utc::now();
        let entitlement =
            eligibility::resolve(&ProfileSnapshot::from(&profile), active_snapshot.as_ref(), now);
        if entitlement.papers_remaining.is_exhausted() {
            let message = entitlement
                .message
                .unwrap_or_else(|| "Paper limit reached for your package".to_string());
            return Err(AppError::SubscriptionRequired(message));
        }

        Self::validate_scope(&txn, &request).await?;

        let selected = Self::select_questions(&txn, &request).await?;
        let total_marks: i32 = selected.iter().map(|q| q.marks).sum();

        let paper = papers::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            class_id: Set(request.class_id),
            subject_id: Set(request.subject_id),
            title: Set(request.title.trim().to_string()),
            kind: Set(request.kind.clone()),
            total_marks: Set(total_marks),
            created_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        let mut detail_questions = Vec::with_capacity(selected.len());
        for (i, question) in selected.into_iter().enumerate() {
            let position = (i + 1) as i32;
            paper_questions::ActiveModel {
                paper_id: Set(paper.id),
                question_id: Set(question.id),
                position: Set(position),
                marks: Set(question.marks),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            detail_questions.push(PaperQuestionResponse {
                position,
                marks: question.marks,
                question: QuestionResponse::from(question),
            });
        }

        // Usage bookkeeping: bump the profile counter and, for a metered
        // paper pack, burn one paper.
        let papers_generated = profile.papers_generated;
        let mut profile_model = profile.into_active_model();
        profile_model.papers_generated = Set(papers_generated + 1);
        profile_model.updated_at = Set(Some(now));
        profile_model.update(&txn).await?;

        if let Some((row, package)) = active {
            // An expired pack the sweep has not caught yet grants nothing,
            // so it must not be debited either.
            let live = row.expires_at.is_none_or(|ends| ends > now);
            if live && package.package_type == PackageType::PaperPack {
                let remaining = row.papers_remaining.unwrap_or(0);
                let mut row_model = row.into_active_model();
                row_model.papers_remaining = Set(Some((remaining - 1).max(0)));
                row_model.updated_at = Set(Some(now));
                row_model.update(&txn).await?;
            }
        }

        txn.commit().await?;

        log::info!(
            "Paper generated: user {user_id} paper {} ({} questions, {total_marks} marks)",
            paper.id,
            detail_questions.len()
        );

        Ok(PaperDetailResponse {
            paper: PaperResponse::from(paper),
            questions: detail_questions,
        })
    }

    fn validate_request(request: &GeneratePaperRequest) -> AppResult<()> {
        if request.title.trim().is_empty() {
            return Err(AppError::ValidationError("Paper title is required".to_string()));
        }
        if request.chapter_ids.is_empty() {
            return Err(AppError::ValidationError(
                "At least one chapter must be selected".to_string(),
            ));
        }
        let total = request.counts.total();
        if total == 0 {
            return Err(AppError::ValidationError(
                "At least one question must be requested".to_string(),
            ));
        }
        if total > MAX_QUESTIONS_PER_PAPER {
            return Err(AppError::ValidationError(format!(
                "A paper is limited to {MAX_QUESTIONS_PER_PAPER} questions"
            )));
        }
        if request.kind == PaperKind::Quiz && (request.counts.short > 0 || request.counts.long > 0)
        {
            return Err(AppError::ValidationError(
                "Quizzes are composed of MCQs only".to_string(),
            ));
        }
        Ok(())
    }

    /// The selected chapters must belong to the subject, and the subject to
    /// the class.
    async fn validate_scope<C: ConnectionTrait>(
        conn: &C,
        request: &GeneratePaperRequest,
    ) -> AppResult<()> {
        let subject = subjects::Entity::find_by_id(request.subject_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Subject not found".to_string()))?;
        if subject.class_id != request.class_id {
            return Err(AppError::ValidationError(
                "Subject does not belong to the selected class".to_string(),
            ));
        }

        let found = chapters::Entity::find()
            .filter(chapters::Column::Id.is_in(request.chapter_ids.clone()))
            .filter(chapters::Column::SubjectId.eq(request.subject_id))
            .all(conn)
            .await?;
        if found.len() != request.chapter_ids.len() {
            return Err(AppError::ValidationError(
                "One or more chapters do not belong to the selected subject".to_string(),
            ));
        }

        Ok(())
    }

    /// Randomly sample the requested number of questions per type from the
    /// selected chapters.
    async fn select_questions<C: ConnectionTrait>(
        conn: &C,
        request: &GeneratePaperRequest,
    ) -> AppResult<Vec<questions::Model>> {
        let wanted = [
            (QuestionType::Mcq, request.counts.mcq),
            (QuestionType::Short, request.counts.short),
            (QuestionType::Long, request.counts.long),
        ];

        let mut selected = Vec::new();
        for (question_type, count) in wanted {
            if count == 0 {
                continue;
            }
            let mut candidates = questions::Entity::find()
                .filter(questions::Column::ChapterId.is_in(request.chapter_ids.clone()))
                .filter(questions::Column::QuestionType.eq(question_type.clone()))
                .all(conn)
                .await?;
            if (candidates.len() as u32) < count {
                return Err(AppError::ValidationError(format!(
                    "Not enough {question_type} questions in the selected chapters (requested {count}, found {})",
                    candidates.len()
                )));
            }
            {
                let mut rng = rand::thread_rng();
                candidates.shuffle(&mut rng);
            }
            selected.extend(candidates.into_iter().take(count as usize));
        }

        Ok(selected)
    }

    pub async fn list_papers(
        &self,
        user_id: Uuid,
        query: &PaperQuery,
    ) -> AppResult<PaginatedResponse<PaperResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let mut find = papers::Entity::find().filter(papers::Column::UserId.eq(user_id));
        if let Some(kind) = &query.kind {
            find = find.filter(papers::Column::Kind.eq(kind.clone()));
        }

        let total = find.clone().count(&self.pool).await? as i64;
        let items = find
            .order_by_desc(papers::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(PaperResponse::from).collect(),
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    pub async fn get_paper(&self, user_id: Uuid, paper_id: Uuid) -> AppResult<PaperDetailResponse> {
        let paper = papers::Entity::find_by_id(paper_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Paper not found".to_string()))?;
        if paper.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        let rows = paper_questions::Entity::find()
            .filter(paper_questions::Column::PaperId.eq(paper_id))
            .order_by_asc(paper_questions::Column::Position)
            .all(&self.pool)
            .await?;

        let question_ids: Vec<i64> = rows.iter().map(|r| r.question_id).collect();
        let question_models = questions::Entity::find()
            .filter(questions::Column::Id.is_in(question_ids))
            .all(&self.pool)
            .await?;

        let mut detail_questions = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(q) = question_models.iter().find(|q| q.id == row.question_id) else {
                continue;
            };
            detail_questions.push(PaperQuestionResponse {
                position: row.position,
                marks: row.marks,
                question: QuestionResponse::from(q.clone()),
            });
        }

        Ok(PaperDetailResponse {
            paper: PaperResponse::from(paper),
            questions: detail_questions,
        })
    }

    pub async fn delete_paper(&self, user_id: Uuid, paper_id: Uuid) -> AppResult<()> {
        let paper = papers::Entity::find_by_id(paper_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Paper not found".to_string()))?;
        if paper.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        let txn = self.pool.begin().await?;
        paper_questions::Entity::delete_many()
            .filter(paper_questions::Column::PaperId.eq(paper_id))
            .exec(&txn)
            .await?;
        papers::Entity::delete_by_id(paper_id).exec(&txn).await?;
        txn.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: PaperKind, mcq: u32, short: u32, long: u32) -> GeneratePaperRequest {
        GeneratePaperRequest {
            title: "Test paper".to_string(),
            class_id: 1,
            subject_id: 1,
            chapter_ids: vec![1],
            kind,
            counts: QuestionCounts { mcq, short, long },
        }
    }

    #[test]
    fn test_quiz_must_be_mcq_only() {
        assert!(PaperService::validate_request(&request(PaperKind::Quiz, 10, 0, 0)).is_ok());
        assert!(PaperService::validate_request(&request(PaperKind::Quiz, 10, 2, 0)).is_err());
        assert!(PaperService::validate_request(&request(PaperKind::Exam, 10, 2, 3)).is_ok());
    }

    #[test]
    fn test_empty_and_oversized_requests_rejected() {
        assert!(PaperService::validate_request(&request(PaperKind::Exam, 0, 0, 0)).is_err());
        assert!(PaperService::validate_request(&request(PaperKind::Exam, 90, 20, 0)).is_err());
        let mut r = request(PaperKind::Exam, 5, 0, 0);
        r.chapter_ids.clear();
        assert!(PaperService::validate_request(&r).is_err());
    }
}
