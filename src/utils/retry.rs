use crate::error::AppResult;
use std::future::Future;
use std::time::Duration;

const READ_ATTEMPTS: u32 = 3;
const BACKOFF_STEP_MS: u64 = 200;

/// Fixed 3-attempt retry with linear backoff. Read paths only; writes are
/// never retried because they are not guaranteed idempotent.
pub async fn with_read_retry<T, F, Fut>(op: F) -> AppResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) if attempt < READ_ATTEMPTS => {
                log::warn!("Read attempt {attempt}/{READ_ATTEMPTS} failed, retrying: {e}");
                tokio::time::sleep(Duration::from_millis(BACKOFF_STEP_MS * attempt as u64)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result: AppResult<i32> = with_read_retry(|| async {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(AppError::InternalError("transient".into()))
            } else {
                Ok(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_three_attempts() {
        let calls = AtomicU32::new(0);
        let result: AppResult<i32> = with_read_retry(|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::InternalError("down".into()))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
