use crate::database::DbPool;
use crate::entities::profile_entity as profiles;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{normalize_cellno, validate_cellno, with_read_retry};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProfileService {
    pool: DbPool,
}

impl ProfileService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<profiles::Model> {
        let profile = with_read_retry(|| async {
            profiles::Entity::find_by_id(user_id)
                .one(&self.pool)
                .await
                .map_err(AppError::from)
        })
        .await?;

        profile.ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> AppResult<ProfileResponse> {
        if request.full_name.is_none()
            && request.cellno.is_none()
            && request.institution.is_none()
            && request.logo.is_none()
        {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }

        if let Some(full_name) = &request.full_name {
            if full_name.trim().len() < 2 || full_name.len() > 100 {
                return Err(AppError::ValidationError(
                    "Full name must be between 2 and 100 characters".to_string(),
                ));
            }
        }

        let cellno = match &request.cellno {
            Some(c) if !c.trim().is_empty() => {
                let normalized = normalize_cellno(c);
                validate_cellno(&normalized)?;
                Some(normalized)
            }
            _ => None,
        };

        let mut model = self.get_profile(user_id).await?.into_active_model();
        if let Some(full_name) = request.full_name {
            model.full_name = Set(full_name.trim().to_string());
        }
        if let Some(c) = cellno {
            model.cellno = Set(Some(c));
        }
        if let Some(institution) = request.institution {
            model.institution = Set(Some(institution));
        }
        if let Some(logo) = request.logo {
            model.logo = Set(Some(logo));
        }
        model.updated_at = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;

        Ok(ProfileResponse::from(updated))
    }

    /// Admin listing with optional role filter and name/email search.
    pub async fn list_profiles(
        &self,
        query: &ProfileQuery,
    ) -> AppResult<PaginatedResponse<ProfileResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let mut find = profiles::Entity::find();
        if let Some(role) = &query.role {
            find = find.filter(profiles::Column::Role.eq(role.clone()));
        }
        if let Some(search) = &query.search {
            let pattern = format!("%{}%", search.trim());
            find = find.filter(
                Condition::any()
                    .add(profiles::Column::FullName.like(&pattern))
                    .add(profiles::Column::Email.like(&pattern)),
            );
        }

        let total = find.clone().count(&self.pool).await? as i64;
        let items = find
            .order_by_desc(profiles::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(ProfileResponse::from).collect(),
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    pub async fn admin_update_profile(
        &self,
        user_id: Uuid,
        request: AdminUpdateProfileRequest,
    ) -> AppResult<ProfileResponse> {
        if request.role.is_none() && request.subscription_status.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }

        let mut model = self.get_profile(user_id).await?.into_active_model();
        if let Some(role) = request.role {
            model.role = Set(role);
        }
        if let Some(status) = request.subscription_status {
            model.subscription_status = Set(status);
        }
        model.updated_at = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;

        Ok(ProfileResponse::from(updated))
    }

    pub async fn delete_profile(&self, user_id: Uuid) -> AppResult<()> {
        let res = profiles::Entity::delete_by_id(user_id)
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Profile not found".to_string()));
        }
        Ok(())
    }
}
