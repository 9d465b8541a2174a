use crate::models::*;
use crate::services::ContactService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Submission stored", body = ContactResponse),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn submit_contact(
    contact_service: web::Data<ContactService>,
    request: web::Json<ContactRequest>,
) -> Result<HttpResponse> {
    match contact_service.submit(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Thanks for reaching out, we will get back to you"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn contact_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/contact").route("", web::post().to(submit_contact)));
}
