use crate::database::DbPool;
use crate::entities::{
    profile_entity as profiles, referral_entity as referrals,
    user_package_entity as user_packages,
};
use crate::error::{AppError, AppResult};
use crate::models::ReferralResponse;
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

const REFERRAL_BONUS_PAPERS: i32 = 10;
const REFERRAL_TRIAL_EXTENSION_DAYS: i64 = 7;

/// Settle the referral reward when a referred user's first package is
/// approved. Returns true when a reward was marked given.
///
/// The referrer's bonus depends on what they currently hold: a metered
/// pack gains papers, a live trial gains days, and otherwise only the
/// ledger flag flips (the reward has nothing to attach to).
pub async fn settle_reward_for_first_purchase<C: ConnectionTrait>(
    conn: &C,
    referred_user_id: Uuid,
) -> AppResult<bool> {
    let referral = referrals::Entity::find()
        .filter(referrals::Column::ReferredUserId.eq(referred_user_id))
        .filter(referrals::Column::RewardGiven.eq(false))
        .one(conn)
        .await?;

    let Some(referral) = referral else {
        return Ok(false);
    };

    let referrer_id = referral.referrer_id;

    let metered_pack = user_packages::Entity::find()
        .filter(user_packages::Column::UserId.eq(referrer_id))
        .filter(user_packages::Column::IsActive.eq(true))
        .filter(user_packages::Column::IsTrial.eq(false))
        .filter(user_packages::Column::PapersRemaining.is_not_null())
        .order_by_desc(user_packages::Column::CreatedAt)
        .one(conn)
        .await?;

    let now = Utc::now();
    if let Some(pack) = metered_pack {
        let remaining = pack.papers_remaining.unwrap_or(0);
        let mut model = pack.into_active_model();
        model.papers_remaining = Set(Some(remaining + REFERRAL_BONUS_PAPERS));
        model.updated_at = Set(Some(now));
        model.update(conn).await?;
    } else if let Some(referrer) = profiles::Entity::find_by_id(referrer_id).one(conn).await? {
        if referrer.trial_given && referrer.trial_ends_at.is_some_and(|ends| ends > now) {
            let extended = referrer.trial_ends_at.unwrap() + Duration::days(REFERRAL_TRIAL_EXTENSION_DAYS);
            let mut model = referrer.into_active_model();
            model.trial_ends_at = Set(Some(extended));
            model.updated_at = Set(Some(now));
            model.update(conn).await?;
        }
    }

    let mut referral_model = referral.into_active_model();
    referral_model.reward_given = Set(true);
    referral_model.update(conn).await?;

    Ok(true)
}

#[derive(Clone)]
pub struct ReferralService {
    pool: DbPool,
}

impl ReferralService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Users referred by `user_id`, newest first.
    pub async fn list_referrals(&self, user_id: Uuid) -> AppResult<Vec<ReferralResponse>> {
        let rows = referrals::Entity::find()
            .filter(referrals::Column::ReferrerId.eq(user_id))
            .order_by_desc(referrals::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        let referred_ids: Vec<Uuid> = rows.iter().map(|r| r.referred_user_id).collect();
        let referred = profiles::Entity::find()
            .filter(profiles::Column::Id.is_in(referred_ids))
            .all(&self.pool)
            .await
            .map_err(AppError::from)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(user) = referred.iter().find(|p| p.id == row.referred_user_id) else {
                continue;
            };
            out.push(ReferralResponse {
                referred_user_id: row.referred_user_id,
                full_name: user.full_name.clone(),
                email: user.email.clone(),
                reward_given: row.reward_given,
                created_at: row.created_at.unwrap_or_else(Utc::now),
            });
        }

        Ok(out)
    }
}
