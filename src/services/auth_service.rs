use crate::database::DbPool;
use crate::entities::profile_entity as profiles;
use crate::entities::referral_entity as referrals;
use crate::entities::{SubscriptionStatus, UserRole};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{
    JwtService, generate_unique_referral_code, hash_password, normalize_cellno, validate_cellno,
    validate_password, verify_password,
};
use chrono::Utc;
use regex::Regex;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DbPool, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    fn validate_email(email: &str) -> AppResult<()> {
        let email_regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
        if !email_regex.is_match(email) {
            return Err(AppError::ValidationError("Invalid email address".to_string()));
        }
        Ok(())
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();
        Self::validate_email(&email)?;
        validate_password(&request.password)?;

        let role = request.role.unwrap_or(UserRole::Student);
        if role.is_admin() {
            return Err(AppError::ValidationError(
                "Admin roles cannot be self-assigned".to_string(),
            ));
        }

        let cellno = match &request.cellno {
            Some(c) if !c.trim().is_empty() => {
                let normalized = normalize_cellno(c);
                validate_cellno(&normalized)?;
                Some(normalized)
            }
            _ => None,
        };

        let existing = profiles::Entity::find()
            .filter(profiles::Column::Email.eq(email.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        // Resolve the referrer before opening the transaction.
        let referrer = match &request.referral_code {
            Some(code) if !code.trim().is_empty() => {
                let code = code.trim().to_uppercase();
                let referrer = profiles::Entity::find()
                    .filter(profiles::Column::ReferralCode.eq(code))
                    .one(&self.pool)
                    .await?;
                match referrer {
                    Some(r) => Some(r),
                    None => {
                        return Err(AppError::ValidationError(
                            "Unknown referral code".to_string(),
                        ));
                    }
                }
            }
            _ => None,
        };

        let referral_code = generate_unique_referral_code(&self.pool).await?;
        let password_hash = hash_password(&request.password)?;

        let txn = self.pool.begin().await?;

        let profile = Self::provision_profile(
            &txn,
            NewProfile {
                full_name: request.full_name.trim().to_string(),
                email,
                password_hash,
                role: role.clone(),
                cellno,
                referral_code,
                referred_by: referrer.as_ref().map(|r| r.id),
                institution: request.institution,
            },
        )
        .await?;

        if let Some(referrer) = &referrer {
            referrals::ActiveModel {
                referrer_id: Set(referrer.id),
                referred_user_id: Set(profile.id),
                reward_given: Set(false),
                created_at: Set(Some(Utc::now())),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        self.auth_response(profile)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        let profile = profiles::Entity::find()
            .filter(profiles::Column::Email.eq(email))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &profile.password_hash)? {
            return Err(AppError::AuthError("Invalid email or password".to_string()));
        }

        self.auth_response(profile)
    }

    pub async fn refresh_token(&self, token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(token)?;
        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))?;

        let profile = profiles::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("User no longer exists".to_string()))?;

        self.auth_response(profile)
    }

    /// The one and only code path that creates a profile row. Signup and any
    /// future provisioning endpoint must go through here so field defaults
    /// cannot drift between call sites.
    pub async fn provision_profile(
        conn: &impl sea_orm::ConnectionTrait,
        new: NewProfile,
    ) -> AppResult<profiles::Model> {
        let profile = profiles::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(new.full_name),
            email: Set(new.email),
            cellno: Set(new.cellno),
            password_hash: Set(new.password_hash),
            role: Set(new.role),
            subscription_status: Set(SubscriptionStatus::Inactive),
            trial_given: Set(false),
            trial_ends_at: Set(None),
            papers_generated: Set(0),
            referral_code: Set(new.referral_code),
            referred_by: Set(new.referred_by),
            institution: Set(new.institution),
            logo: Set(None),
            created_at: Set(Some(Utc::now())),
            updated_at: Set(Some(Utc::now())),
        }
        .insert(conn)
        .await?;

        Ok(profile)
    }

    fn auth_response(&self, profile: profiles::Model) -> AppResult<AuthResponse> {
        let access_token = self
            .jwt_service
            .generate_access_token(profile.id, &profile.role)?;
        let refresh_token = self
            .jwt_service
            .generate_refresh_token(profile.id, &profile.role)?;
        let expires_in = self.jwt_service.get_access_token_expires_in();

        Ok(AuthResponse {
            user: ProfileResponse::from(profile),
            access_token,
            refresh_token,
            expires_in,
        })
    }
}

/// Input to [`AuthService::provision_profile`].
#[derive(Debug)]
pub struct NewProfile {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub cellno: Option<String>,
    pub referral_code: String,
    pub referred_by: Option<Uuid>,
    pub institution: Option<String>,
}
