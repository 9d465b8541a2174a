use crate::error::AppError;
use crate::middlewares::AuthContext;
use crate::services::ReferralService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn auth_context(req: &HttpRequest) -> Option<AuthContext> {
    req.extensions().get::<AuthContext>().cloned()
}

#[utoipa::path(
    get,
    path = "/referrals",
    tag = "referral",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Referred users and reward state"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_referrals(
    referral_service: web::Data<ReferralService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(ctx) = auth_context(&req) else {
        return Ok(AppError::AuthError("Missing authentication context".to_string()).error_response());
    };
    match referral_service.list_referrals(ctx.user_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn referral_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/referrals").route("", web::get().to(list_referrals)));
}
