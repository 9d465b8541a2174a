use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactRequest {
    #[schema(example = "Ali Raza")]
    pub name: String,
    #[schema(example = "ali@example.com")]
    pub email: String,
    pub cellno: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub id: Uuid,
}
