//! Trial/subscription eligibility resolution.
//!
//! Single source of truth for "can this user generate a paper". Every
//! handler that needs subscription state goes through [`resolve`] instead
//! of re-deriving it from raw rows.

use crate::entities::PackageType;
use crate::entities::profile_entity as profiles;
use crate::models::{Entitlement, PapersAllowance};
use chrono::{DateTime, Duration, Utc};

const SECS_PER_DAY: i64 = 86_400;

/// The profile fields the resolver reads.
#[derive(Debug, Clone)]
pub struct ProfileSnapshot {
    pub cellno: Option<String>,
    pub trial_given: bool,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub papers_generated: i64,
}

impl From<&profiles::Model> for ProfileSnapshot {
    fn from(p: &profiles::Model) -> Self {
        Self {
            cellno: p.cellno.clone(),
            trial_given: p.trial_given,
            trial_ends_at: p.trial_ends_at,
            papers_generated: p.papers_generated,
        }
    }
}

/// The single active user_packages row joined with its package.
#[derive(Debug, Clone)]
pub struct ActivePackage {
    pub package_type: PackageType,
    pub expires_at: Option<DateTime<Utc>>,
    pub papers_remaining: Option<i32>,
}

/// Days left in the trial window: ceil((end - now) / 1 day), clamped >= 0.
pub fn trial_days_remaining(trial_ends_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = (trial_ends_at - now).num_seconds();
    if secs <= 0 {
        return 0;
    }
    (secs + SECS_PER_DAY - 1) / SECS_PER_DAY
}

/// Expiry assigned on admin approval.
///
/// `papers`-type packages always expire 30 days after approval, overriding
/// any `duration_days` on the package row. Every other type uses
/// `duration_days` when present and never expires otherwise.
pub fn approved_expiry(
    package_type: &PackageType,
    duration_days: Option<i32>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match package_type {
        PackageType::Papers => Some(now + Duration::days(30)),
        _ => duration_days.map(|d| now + Duration::days(d as i64)),
    }
}

/// Paper allowance seeded on admin approval: metered for paper packs,
/// unlimited (NULL) for everything else.
pub fn approved_papers_remaining(
    package_type: &PackageType,
    paper_quantity: Option<i32>,
) -> Option<i32> {
    match package_type {
        PackageType::PaperPack => Some(paper_quantity.unwrap_or(0)),
        _ => None,
    }
}

fn package_is_live(pkg: &ActivePackage, now: DateTime<Utc>) -> bool {
    match pkg.expires_at {
        Some(expires_at) => expires_at > now,
        None => true,
    }
}

/// Resolve the entitlement for a profile and its (optional) active package.
pub fn resolve(
    profile: &ProfileSnapshot,
    active_package: Option<&ActivePackage>,
    now: DateTime<Utc>,
) -> Entitlement {
    let has_cellno = profile
        .cellno
        .as_deref()
        .is_some_and(|c| !c.trim().is_empty());

    let is_trial = has_cellno
        && profile.trial_given
        && profile.trial_ends_at.is_some_and(|ends| ends > now);

    let days_remaining = if is_trial {
        trial_days_remaining(profile.trial_ends_at.unwrap(), now)
    } else {
        0
    };

    let live_package = active_package.filter(|pkg| package_is_live(pkg, now));

    if let Some(pkg) = live_package {
        let papers_remaining = match pkg.package_type {
            PackageType::PaperPack => {
                PapersAllowance::Count(pkg.papers_remaining.unwrap_or(0).max(0) as i64)
            }
            _ => PapersAllowance::Unlimited,
        };
        return Entitlement {
            is_trial,
            days_remaining,
            has_active_subscription: true,
            papers_remaining,
            trial_eligible: false,
            message: None,
        };
    }

    if is_trial {
        return Entitlement {
            is_trial: true,
            days_remaining,
            has_active_subscription: false,
            papers_remaining: PapersAllowance::Unlimited,
            trial_eligible: false,
            message: None,
        };
    }

    // A concluded trial does not re-qualify: trial_given is consulted here.
    let trial_eligible = has_cellno && !profile.trial_given;

    let message = if !has_cellno {
        "Add a phone number to your profile to unlock the free trial.".to_string()
    } else if trial_eligible {
        "Start your free trial or subscribe to a package to generate papers.".to_string()
    } else {
        "Subscribe to a package to continue generating papers.".to_string()
    };

    Entitlement {
        is_trial: false,
        days_remaining: 0,
        has_active_subscription: false,
        papers_remaining: PapersAllowance::Count(0),
        trial_eligible,
        message: Some(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-03-01T12:00:00Z".parse().unwrap()
    }

    fn profile(cellno: Option<&str>) -> ProfileSnapshot {
        ProfileSnapshot {
            cellno: cellno.map(String::from),
            trial_given: false,
            trial_ends_at: None,
            papers_generated: 0,
        }
    }

    fn trial_profile(ends_in_hours: i64) -> ProfileSnapshot {
        ProfileSnapshot {
            cellno: Some("+923001234567".to_string()),
            trial_given: true,
            trial_ends_at: Some(now() + Duration::hours(ends_in_hours)),
            papers_generated: 3,
        }
    }

    #[test]
    fn test_no_cellno_never_trial_eligible() {
        for p in [profile(None), profile(Some("")), profile(Some("  "))] {
            let e = resolve(&p, None, now());
            assert!(!e.trial_eligible);
            assert!(!e.is_trial);
            assert_eq!(e.papers_remaining, PapersAllowance::Count(0));
            assert!(e.message.as_deref().unwrap().contains("phone number"));
        }
    }

    #[test]
    fn test_active_trial() {
        let e = resolve(&trial_profile(36), None, now());
        assert!(e.is_trial);
        assert_eq!(e.days_remaining, 2); // 36h rounds up to 2 days
        assert!(!e.has_active_subscription);
        assert_eq!(e.papers_remaining, PapersAllowance::Unlimited);
        assert!(!e.trial_eligible);
        assert!(e.message.is_none());
    }

    #[test]
    fn test_expired_trial_does_not_requalify() {
        let e = resolve(&trial_profile(-1), None, now());
        assert!(!e.is_trial);
        assert_eq!(e.days_remaining, 0);
        assert_eq!(e.papers_remaining, PapersAllowance::Count(0));
        // trial_given is consulted: a concluded trial stays concluded.
        assert!(!e.trial_eligible);
        assert!(e.message.as_deref().unwrap().contains("Subscribe"));
    }

    #[test]
    fn test_fresh_profile_with_cellno_is_trial_eligible() {
        let e = resolve(&profile(Some("+923001234567")), None, now());
        assert!(e.trial_eligible);
        assert_eq!(e.papers_remaining, PapersAllowance::Count(0));
    }

    #[test]
    fn test_subscription_package_is_unlimited_regardless_of_usage() {
        let mut p = profile(Some("+923001234567"));
        p.papers_generated = 10_000;
        let pkg = ActivePackage {
            package_type: PackageType::Subscription,
            expires_at: Some(now() + Duration::days(20)),
            papers_remaining: None,
        };
        let e = resolve(&p, Some(&pkg), now());
        assert!(e.has_active_subscription);
        assert_eq!(e.papers_remaining, PapersAllowance::Unlimited);
        assert!(!e.trial_eligible);
    }

    #[test]
    fn test_papers_package_is_unlimited_until_expiry() {
        let pkg = ActivePackage {
            package_type: PackageType::Papers,
            expires_at: Some(now() + Duration::days(1)),
            papers_remaining: None,
        };
        let e = resolve(&profile(Some("+923001234567")), Some(&pkg), now());
        assert!(e.has_active_subscription);
        assert_eq!(e.papers_remaining, PapersAllowance::Unlimited);
    }

    #[test]
    fn test_paper_pack_is_metered() {
        let pkg = ActivePackage {
            package_type: PackageType::PaperPack,
            expires_at: None,
            papers_remaining: Some(7),
        };
        let e = resolve(&profile(Some("+923001234567")), Some(&pkg), now());
        assert_eq!(e.papers_remaining, PapersAllowance::Count(7));

        let exhausted = ActivePackage {
            papers_remaining: Some(0),
            ..pkg
        };
        let e = resolve(&profile(Some("+923001234567")), Some(&exhausted), now());
        assert!(e.has_active_subscription);
        assert!(e.papers_remaining.is_exhausted());
    }

    #[test]
    fn test_expired_package_is_ignored() {
        let pkg = ActivePackage {
            package_type: PackageType::Subscription,
            expires_at: Some(now() - Duration::seconds(1)),
            papers_remaining: None,
        };
        let e = resolve(&profile(Some("+923001234567")), Some(&pkg), now());
        assert!(!e.has_active_subscription);
        assert_eq!(e.papers_remaining, PapersAllowance::Count(0));
        assert!(e.trial_eligible);
    }

    #[test]
    fn test_trial_days_remaining_ceil_and_clamp() {
        assert_eq!(trial_days_remaining(now() + Duration::seconds(1), now()), 1);
        assert_eq!(trial_days_remaining(now() + Duration::days(3), now()), 3);
        assert_eq!(
            trial_days_remaining(now() + Duration::days(3) + Duration::seconds(1), now()),
            4
        );
        assert_eq!(trial_days_remaining(now() - Duration::days(2), now()), 0);
        assert_eq!(trial_days_remaining(now(), now()), 0);
    }

    #[test]
    fn test_approved_expiry_papers_always_thirty_days() {
        // duration_days on the package row is overridden.
        let expiry = approved_expiry(&PackageType::Papers, Some(90), now());
        assert_eq!(expiry, Some(now() + Duration::days(30)));
        let expiry = approved_expiry(&PackageType::Papers, None, now());
        assert_eq!(expiry, Some(now() + Duration::days(30)));
    }

    #[test]
    fn test_approved_expiry_other_types_use_duration_days() {
        let expiry = approved_expiry(&PackageType::Subscription, Some(365), now());
        assert_eq!(expiry, Some(now() + Duration::days(365)));
        // No duration: never expires.
        assert_eq!(approved_expiry(&PackageType::Subscription, None, now()), None);
        assert_eq!(approved_expiry(&PackageType::PaperPack, None, now()), None);
    }

    #[test]
    fn test_approved_papers_remaining() {
        assert_eq!(
            approved_papers_remaining(&PackageType::PaperPack, Some(50)),
            Some(50)
        );
        assert_eq!(
            approved_papers_remaining(&PackageType::PaperPack, None),
            Some(0)
        );
        assert_eq!(
            approved_papers_remaining(&PackageType::Subscription, Some(50)),
            None
        );
        assert_eq!(approved_papers_remaining(&PackageType::Papers, None), None);
    }
}
