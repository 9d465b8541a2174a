use crate::error::AppError;
use crate::middlewares::AuthContext;
use crate::models::*;
use crate::services::{ProfileService, SubscriptionService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn auth_context(req: &HttpRequest) -> Option<AuthContext> {
    req.extensions().get::<AuthContext>().cloned()
}

#[utoipa::path(
    get,
    path = "/profile",
    tag = "profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile with entitlement", body = ProfileResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_profile(
    profile_service: web::Data<ProfileService>,
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(ctx) = auth_context(&req) else {
        return Ok(AppError::AuthError("Missing authentication context".to_string()).error_response());
    };

    let profile = match profile_service.get_profile(ctx.user_id).await {
        Ok(p) => p,
        Err(e) => return Ok(e.error_response()),
    };
    match subscription_service.status(ctx.user_id).await {
        Ok(entitlement) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "profile": ProfileResponse::from(profile),
                "entitlement": entitlement
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/profile",
    tag = "profile",
    request_body = UpdateProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_profile(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    let Some(ctx) = auth_context(&req) else {
        return Ok(AppError::AuthError("Missing authentication context".to_string()).error_response());
    };

    match profile_service
        .update_profile(ctx.user_id, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn profile_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .route("", web::get().to(get_profile))
            .route("", web::put().to(update_profile)),
    );
}
