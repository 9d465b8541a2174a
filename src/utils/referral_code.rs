use crate::database::DbPool;
use crate::entities::profile_entity as profiles;
use crate::error::AppResult;
use rand::Rng;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

const CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LEN: usize = 8;

/// Generate an 8-char alphanumeric referral code without reserving it.
pub fn generate_referral_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CODE_CHARS[rng.gen_range(0..CODE_CHARS.len())] as char)
        .collect()
}

/// Generate a referral code that does not collide with an existing profile.
pub async fn generate_unique_referral_code(pool: &DbPool) -> AppResult<String> {
    loop {
        let code = generate_referral_code();

        let exists = profiles::Entity::find()
            .filter(profiles::Column::ReferralCode.eq(code.clone()))
            .one(pool)
            .await?;

        if exists.is_none() {
            return Ok(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_referral_code_shape() {
        let code = generate_referral_code();
        assert_eq!(code.len(), 8);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }
}
