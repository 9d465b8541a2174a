//! Background scheduled tasks for the application.
//!
//! This module centralizes the recurring maintenance jobs (trial expiry and
//! user-package expiry sweeps). Call `spawn_all` once during startup to
//! launch them.

use crate::services::SubscriptionService;

/// Spawn all background tasks.
///
/// Notes
/// - Each sweep is idempotent as implemented in its service and runs on its
///   own schedule.
/// - This function detaches tasks via `tokio::spawn`; it does not block.
pub fn spawn_all(subscription_service: SubscriptionService) {
    // Trial expiry sweep (hourly)
    {
        let svc = subscription_service.clone();
        tokio::spawn(async move {
            loop {
                match svc.expire_trials().await {
                    Ok(n) if n > 0 => log::info!("Expired trials processed: {n}"),
                    Ok(_) => {}
                    Err(e) => log::error!("Failed to expire trials: {e:?}"),
                }
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
            }
        });
    }

    // User-package expiry sweep (every 6 hours)
    {
        let svc = subscription_service;
        tokio::spawn(async move {
            loop {
                match svc.expire_user_packages().await {
                    Ok(n) if n > 0 => log::info!("Expired user packages processed: {n}"),
                    Ok(_) => {}
                    Err(e) => log::error!("Failed to expire user packages: {e:?}"),
                }
                tokio::time::sleep(std::time::Duration::from_secs(6 * 3600)).await;
            }
        });
    }
}
