use crate::database::DbPool;
use crate::entities::{
    PackageType, SubscriptionStatus, package_entity as packages, profile_entity as profiles,
    user_package_entity as user_packages,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::eligibility::{self, ActivePackage, ProfileSnapshot};
use crate::services::referral_service;
use crate::utils::with_read_retry;
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

const DEFAULT_TRIAL_DAYS: i64 = 7;

/// The single active, non-trial package row (with its package) for a user.
pub async fn find_active_package<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> AppResult<Option<(user_packages::Model, packages::Model)>> {
    let row = user_packages::Entity::find()
        .filter(user_packages::Column::UserId.eq(user_id))
        .filter(user_packages::Column::IsActive.eq(true))
        .filter(user_packages::Column::IsTrial.eq(false))
        .order_by_desc(user_packages::Column::CreatedAt)
        .one(conn)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let package = packages::Entity::find_by_id(row.package_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

    Ok(Some((row, package)))
}

#[derive(Clone)]
pub struct SubscriptionService {
    pool: DbPool,
}

impl SubscriptionService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Entitlement for a user, via the eligibility resolver.
    pub async fn status(&self, user_id: Uuid) -> AppResult<Entitlement> {
        let profile = with_read_retry(|| async {
            profiles::Entity::find_by_id(user_id)
                .one(&self.pool)
                .await
                .map_err(AppError::from)
        })
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        let active = find_active_package(&self.pool, user_id).await?;
        let active_snapshot = active.map(|(row, package)| ActivePackage {
            package_type: package.package_type,
            expires_at: row.expires_at,
            papers_remaining: row.papers_remaining,
        });

        Ok(eligibility::resolve(
            &ProfileSnapshot::from(&profile),
            active_snapshot.as_ref(),
            Utc::now(),
        ))
    }

    /// Request a package. Creates a pending (unapproved) ledger row; an
    /// admin later approves or rejects it.
    pub async fn subscribe(&self, user_id: Uuid, request: SubscribeRequest) -> AppResult<OrderResponse> {
        let txn = self.pool.begin().await?;

        let profile = profiles::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        let package = packages::Entity::find_by_id(request.package_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

        if !package.is_active {
            return Err(AppError::ValidationError(
                "Package is not available".to_string(),
            ));
        }
        if package.package_type == PackageType::Trial {
            return Err(AppError::ValidationError(
                "Trial packages cannot be purchased; use the trial endpoint".to_string(),
            ));
        }

        // No second request while one is pending or active. Pending rows are
        // recognizable by expires_at IS NULL: approval always stamps expiry
        // (or deletes the row on rejection). The partial unique index on
        // (user_id) WHERE is_active is the backstop against the
        // check-then-insert race.
        let now = Utc::now();
        let blocking = user_packages::Entity::find()
            .filter(user_packages::Column::UserId.eq(user_id))
            .filter(user_packages::Column::IsTrial.eq(false))
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(user_packages::Column::IsActive.eq(false))
                            .add(user_packages::Column::ExpiresAt.is_null()),
                    )
                    .add(
                        Condition::all()
                            .add(user_packages::Column::IsActive.eq(true))
                            .add(
                                Condition::any()
                                    .add(user_packages::Column::ExpiresAt.is_null())
                                    .add(user_packages::Column::ExpiresAt.gt(now)),
                            ),
                    ),
            )
            .one(&txn)
            .await?;

        if blocking.is_some() {
            return Err(AppError::Conflict(
                "A pending or active subscription already exists".to_string(),
            ));
        }

        let row = user_packages::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            package_id: Set(package.id),
            is_active: Set(false),
            is_trial: Set(false),
            expires_at: Set(None),
            papers_remaining: Set(None),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "Subscription requested: user {} package {} ({})",
            user_id,
            package.id,
            package.name
        );

        Ok(order_response(row, &profile, package))
    }

    /// Start the free trial. Requires a cell number on the profile and a
    /// user the resolver deems trial-eligible.
    pub async fn start_trial(&self, user_id: Uuid) -> AppResult<Entitlement> {
        let txn = self.pool.begin().await?;

        let profile = profiles::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        let active = find_active_package(&txn, user_id).await?;
        let active_snapshot = active.map(|(row, package)| ActivePackage {
            package_type: package.package_type,
            expires_at: row.expires_at,
            papers_remaining: row.papers_remaining,
        });

        let now = Utc::now();
        let entitlement =
            eligibility::resolve(&ProfileSnapshot::from(&profile), active_snapshot.as_ref(), now);
        if !entitlement.trial_eligible {
            return Err(AppError::Conflict(
                entitlement
                    .message
                    .unwrap_or_else(|| "Not eligible for a trial".to_string()),
            ));
        }

        // Trial length comes from the trial package definition when one
        // exists, falling back to the default window.
        let trial_package = packages::Entity::find()
            .filter(packages::Column::PackageType.eq(PackageType::Trial))
            .filter(packages::Column::IsActive.eq(true))
            .one(&txn)
            .await?;
        let trial_days = trial_package
            .as_ref()
            .and_then(|p| p.duration_days)
            .map(|d| d as i64)
            .unwrap_or(DEFAULT_TRIAL_DAYS);
        let trial_ends_at = now + Duration::days(trial_days);

        let mut model = profile.into_active_model();
        model.trial_given = Set(true);
        model.trial_ends_at = Set(Some(trial_ends_at));
        model.subscription_status = Set(SubscriptionStatus::Trial);
        model.updated_at = Set(Some(now));
        let profile = model.update(&txn).await?;

        // Ledger record of the grant, when a trial package is defined.
        if let Some(trial_package) = &trial_package {
            user_packages::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                package_id: Set(trial_package.id),
                is_active: Set(true),
                is_trial: Set(true),
                expires_at: Set(Some(trial_ends_at)),
                papers_remaining: Set(None),
                created_at: Set(Some(now)),
                updated_at: Set(Some(now)),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        log::info!("Trial started: user {user_id}, {trial_days} days");

        Ok(eligibility::resolve(
            &ProfileSnapshot::from(&profile),
            None,
            now,
        ))
    }

    /// Admin listing of subscription orders (non-trial ledger rows).
    pub async fn list_orders(&self, query: &OrderQuery) -> AppResult<PaginatedResponse<OrderResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let mut find = user_packages::Entity::find()
            .filter(user_packages::Column::IsTrial.eq(false));
        match query.status {
            Some(OrderStatus::Pending) => {
                find = find
                    .filter(user_packages::Column::IsActive.eq(false))
                    .filter(user_packages::Column::ExpiresAt.is_null());
            }
            Some(OrderStatus::Active) => {
                find = find.filter(user_packages::Column::IsActive.eq(true));
            }
            None => {}
        }

        let total = find.clone().count(&self.pool).await? as i64;
        let rows = find
            .order_by_desc(user_packages::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let user_ids: Vec<Uuid> = rows.iter().map(|r| r.user_id).collect();
        let package_ids: Vec<i64> = rows.iter().map(|r| r.package_id).collect();

        let users = profiles::Entity::find()
            .filter(profiles::Column::Id.is_in(user_ids))
            .all(&self.pool)
            .await?;
        let pkgs = packages::Entity::find()
            .filter(packages::Column::Id.is_in(package_ids))
            .all(&self.pool)
            .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(user) = users.iter().find(|u| u.id == row.user_id) else {
                continue;
            };
            let Some(pkg) = pkgs.iter().find(|p| p.id == row.package_id) else {
                continue;
            };
            orders.push(order_response(row, user, pkg.clone()));
        }

        Ok(PaginatedResponse::new(
            orders,
            params.get_page(),
            params.get_page_size(),
            total,
        ))
    }

    /// Approve a pending order: stamp expiry and paper allowance, activate it,
    /// and settle any referral reward for the buyer's referrer.
    pub async fn approve_order(&self, order_id: Uuid) -> AppResult<OrderResponse> {
        let txn = self.pool.begin().await?;

        let row = user_packages::Entity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        if row.is_active {
            return Err(AppError::Conflict("Order is already approved".to_string()));
        }

        let package = packages::Entity::find_by_id(row.package_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

        let now = Utc::now();
        let expires_at = eligibility::approved_expiry(&package.package_type, package.duration_days, now);
        let papers_remaining =
            eligibility::approved_papers_remaining(&package.package_type, package.paper_quantity);

        let user_id = row.user_id;
        let mut model = row.into_active_model();
        model.is_active = Set(true);
        model.expires_at = Set(expires_at);
        model.papers_remaining = Set(papers_remaining);
        model.updated_at = Set(Some(now));
        let row = model.update(&txn).await?;

        let profile = profiles::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
        let mut profile_model = profile.clone().into_active_model();
        profile_model.subscription_status = Set(SubscriptionStatus::Active);
        profile_model.updated_at = Set(Some(now));
        let profile = profile_model.update(&txn).await?;

        if referral_service::settle_reward_for_first_purchase(&txn, user_id).await? {
            log::info!("Referral reward settled for referrer of user {user_id}");
        }

        txn.commit().await?;

        log::info!("Order {order_id} approved (package {})", package.id);

        Ok(order_response(row, &profile, package))
    }

    /// Flip profiles whose trial window has passed back to inactive.
    /// Trial state itself is derived from trial_ends_at, so this only keeps
    /// the denormalized subscription_status column honest.
    pub async fn expire_trials(&self) -> AppResult<u64> {
        let now = Utc::now();
        let expired = profiles::Entity::find()
            .filter(profiles::Column::SubscriptionStatus.eq(SubscriptionStatus::Trial))
            .filter(profiles::Column::TrialEndsAt.lt(now))
            .all(&self.pool)
            .await?;

        let mut count = 0u64;
        for profile in expired {
            let mut model = profile.into_active_model();
            model.subscription_status = Set(SubscriptionStatus::Inactive);
            model.updated_at = Set(Some(now));
            model.update(&self.pool).await?;
            count += 1;
        }
        Ok(count)
    }

    /// Deactivate ledger rows whose expiry has passed and downgrade the
    /// owner's subscription_status when nothing else is active.
    pub async fn expire_user_packages(&self) -> AppResult<u64> {
        let now = Utc::now();
        let expired = user_packages::Entity::find()
            .filter(user_packages::Column::IsActive.eq(true))
            .filter(user_packages::Column::ExpiresAt.is_not_null())
            .filter(user_packages::Column::ExpiresAt.lt(now))
            .all(&self.pool)
            .await?;

        let mut count = 0u64;
        for row in expired {
            let user_id = row.user_id;
            let mut model = row.into_active_model();
            model.is_active = Set(false);
            model.updated_at = Set(Some(now));
            model.update(&self.pool).await?;
            count += 1;

            let still_active = find_active_package(&self.pool, user_id).await?;
            if still_active.is_none() {
                if let Some(profile) = profiles::Entity::find_by_id(user_id)
                    .one(&self.pool)
                    .await?
                {
                    let on_trial = profile.trial_given
                        && profile.trial_ends_at.is_some_and(|ends| ends > now);
                    let mut profile_model = profile.into_active_model();
                    profile_model.subscription_status = Set(if on_trial {
                        SubscriptionStatus::Trial
                    } else {
                        SubscriptionStatus::Inactive
                    });
                    profile_model.updated_at = Set(Some(now));
                    profile_model.update(&self.pool).await?;
                }
            }
        }
        Ok(count)
    }

    /// Reject a pending order. The row is deleted outright; a later fetch
    /// for the order id returns not-found.
    pub async fn reject_order(&self, order_id: Uuid) -> AppResult<()> {
        let row = user_packages::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        if row.is_active {
            return Err(AppError::Conflict(
                "Only pending orders can be rejected".to_string(),
            ));
        }

        user_packages::Entity::delete_by_id(order_id)
            .exec(&self.pool)
            .await?;

        log::info!("Order {order_id} rejected and removed");

        Ok(())
    }
}

fn order_response(
    row: user_packages::Model,
    user: &profiles::Model,
    package: packages::Model,
) -> OrderResponse {
    OrderResponse {
        id: row.id,
        user_id: row.user_id,
        user_name: user.full_name.clone(),
        user_email: user.email.clone(),
        package: PackageResponse::from(package),
        is_active: row.is_active,
        is_trial: row.is_trial,
        expires_at: row.expires_at,
        papers_remaining: row.papers_remaining,
        created_at: row.created_at.unwrap_or_else(Utc::now),
    }
}
