use crate::config::ContactConfig;
use crate::error::{AppError, AppResult};
use crate::models::{ContactRequest, ContactResponse};
use chrono::Utc;
use serde_json::json;
use std::path::PathBuf;
use uuid::Uuid;

/// Contact form submissions are persisted as one JSON file each under a
/// configurable directory; there is no database table for them.
#[derive(Clone)]
pub struct ContactService {
    submissions_dir: PathBuf,
}

impl ContactService {
    pub fn new(config: ContactConfig) -> Self {
        Self {
            submissions_dir: PathBuf::from(config.submissions_dir),
        }
    }

    pub async fn submit(&self, request: ContactRequest) -> AppResult<ContactResponse> {
        if request.name.trim().is_empty() || request.message.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Name and message are required".to_string(),
            ));
        }
        if !request.email.contains('@') {
            return Err(AppError::ValidationError("Invalid email address".to_string()));
        }

        let id = Uuid::new_v4();
        let submitted_at = Utc::now();
        let record = json!({
            "id": id,
            "name": request.name.trim(),
            "email": request.email.trim(),
            "cellno": request.cellno,
            "message": request.message.trim(),
            "submitted_at": submitted_at.to_rfc3339(),
        });

        tokio::fs::create_dir_all(&self.submissions_dir).await?;
        let filename = format!("{}_{}.json", submitted_at.format("%Y%m%dT%H%M%S"), id);
        let path = self.submissions_dir.join(filename);
        tokio::fs::write(&path, serde_json::to_vec_pretty(&record)?).await?;

        log::info!("Contact submission stored at {}", path.display());

        Ok(ContactResponse { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(dir: &std::path::Path) -> ContactService {
        ContactService::new(ContactConfig {
            submissions_dir: dir.to_string_lossy().into_owned(),
        })
    }

    #[tokio::test]
    async fn test_submit_writes_one_file() {
        let dir = std::env::temp_dir().join(format!("contact_test_{}", Uuid::new_v4()));
        let svc = service(&dir);
        let resp = svc
            .submit(ContactRequest {
                name: "Ali".to_string(),
                email: "ali@example.com".to_string(),
                cellno: None,
                message: "Hello".to_string(),
            })
            .await
            .unwrap();

        let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let content = std::fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
        assert!(content.contains(&resp.id.to_string()));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_message() {
        let dir = std::env::temp_dir().join(format!("contact_test_{}", Uuid::new_v4()));
        let svc = service(&dir);
        let result = svc
            .submit(ContactRequest {
                name: "Ali".to_string(),
                email: "ali@example.com".to_string(),
                cellno: None,
                message: "   ".to_string(),
            })
            .await;
        assert!(result.is_err());
        assert!(!dir.exists());
    }
}
