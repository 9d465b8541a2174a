use crate::database::DbPool;
use crate::entities::{PackageType, package_entity as packages};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct PackageService {
    pool: DbPool,
}

impl PackageService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Active packages for the public pricing page.
    pub async fn list_public(&self) -> AppResult<Vec<PackageResponse>> {
        let items = packages::Entity::find()
            .filter(packages::Column::IsActive.eq(true))
            .order_by_asc(packages::Column::PriceCents)
            .all(&self.pool)
            .await?;

        Ok(items.into_iter().map(PackageResponse::from).collect())
    }

    /// All packages, including retired ones, for the admin panel.
    pub async fn list_all(&self) -> AppResult<Vec<PackageResponse>> {
        let items = packages::Entity::find()
            .order_by_asc(packages::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(items.into_iter().map(PackageResponse::from).collect())
    }

    pub async fn create_package(&self, request: CreatePackageRequest) -> AppResult<PackageResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Package name is required".to_string()));
        }
        if request.price_cents < 0 {
            return Err(AppError::ValidationError("Price cannot be negative".to_string()));
        }
        if request.package_type == PackageType::PaperPack
            && request.paper_quantity.is_none_or(|q| q <= 0)
        {
            return Err(AppError::ValidationError(
                "Paper packs require a positive paper_quantity".to_string(),
            ));
        }

        let model = packages::ActiveModel {
            name: Set(request.name.trim().to_string()),
            package_type: Set(request.package_type),
            price_cents: Set(request.price_cents),
            duration_days: Set(request.duration_days),
            paper_quantity: Set(request.paper_quantity),
            is_active: Set(true),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(PackageResponse::from(model))
    }

    pub async fn update_package(
        &self,
        package_id: i64,
        request: UpdatePackageRequest,
    ) -> AppResult<PackageResponse> {
        let mut model = packages::Entity::find_by_id(package_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?
            .into_active_model();

        if let Some(name) = request.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(price_cents) = request.price_cents {
            if price_cents < 0 {
                return Err(AppError::ValidationError("Price cannot be negative".to_string()));
            }
            model.price_cents = Set(price_cents);
        }
        if let Some(duration_days) = request.duration_days {
            model.duration_days = Set(Some(duration_days));
        }
        if let Some(paper_quantity) = request.paper_quantity {
            model.paper_quantity = Set(Some(paper_quantity));
        }
        if let Some(is_active) = request.is_active {
            model.is_active = Set(is_active);
        }
        let updated = model.update(&self.pool).await?;

        Ok(PackageResponse::from(updated))
    }

    /// Retire a package. Rows are kept because user_packages reference them;
    /// the package just stops being offered.
    pub async fn delete_package(&self, package_id: i64) -> AppResult<()> {
        let mut model = packages::Entity::find_by_id(package_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?
            .into_active_model();

        model.is_active = Set(false);
        model.update(&self.pool).await?;

        Ok(())
    }
}
