use crate::error::AppError;
use crate::middlewares::AuthContext;
use crate::models::*;
use crate::services::{PackageService, SubscriptionService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn auth_context(req: &HttpRequest) -> Option<AuthContext> {
    req.extensions().get::<AuthContext>().cloned()
}

#[utoipa::path(
    get,
    path = "/subscription/status",
    tag = "subscription",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current entitlement", body = Entitlement),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn status(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(ctx) = auth_context(&req) else {
        return Ok(AppError::AuthError("Missing authentication context".to_string()).error_response());
    };
    match subscription_service.status(ctx.user_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/subscription/subscribe",
    tag = "subscription",
    request_body = SubscribeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Subscription requested, pending approval", body = OrderResponse),
        (status = 409, description = "A pending or active subscription exists"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn subscribe(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
    request: web::Json<SubscribeRequest>,
) -> Result<HttpResponse> {
    let Some(ctx) = auth_context(&req) else {
        return Ok(AppError::AuthError("Missing authentication context".to_string()).error_response());
    };
    match subscription_service
        .subscribe(ctx.user_id, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Subscription request submitted for approval"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/subscription/trial",
    tag = "subscription",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Trial started", body = Entitlement),
        (status = 409, description = "Not eligible for a trial"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn start_trial(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(ctx) = auth_context(&req) else {
        return Ok(AppError::AuthError("Missing authentication context".to_string()).error_response());
    };
    match subscription_service.start_trial(ctx.user_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Trial started"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/packages",
    tag = "subscription",
    responses(
        (status = 200, description = "Active package list")
    )
)]
pub async fn list_packages(package_service: web::Data<PackageService>) -> Result<HttpResponse> {
    match package_service.list_public().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn subscription_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subscription")
            .route("/status", web::get().to(status))
            .route("/subscribe", web::post().to(subscribe))
            .route("/trial", web::post().to(start_trial)),
    )
    .service(web::scope("/packages").route("", web::get().to(list_packages)));
}
