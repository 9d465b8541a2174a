use crate::error::AppError;
use crate::middlewares::AuthContext;
use crate::models::*;
use crate::services::{PackageService, ProfileService, SubscriptionService};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

fn require_admin(req: &HttpRequest) -> Result<AuthContext, AppError> {
    let ctx = req
        .extensions()
        .get::<AuthContext>()
        .cloned()
        .ok_or_else(|| AppError::AuthError("Missing authentication context".to_string()))?;
    if !ctx.role.is_admin() {
        return Err(AppError::PermissionDenied);
    }
    Ok(ctx)
}

#[utoipa::path(
    get,
    path = "/admin/profiles",
    tag = "admin",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Page size"),
        ("role" = Option<String>, Query, description = "Filter by role"),
        ("search" = Option<String>, Query, description = "Match on name or email")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile list"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_profiles(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
    query: web::Query<ProfileQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match profile_service.list_profiles(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/profiles/{id}",
    tag = "admin",
    request_body = AdminUpdateProfileRequest,
    params(("id" = Uuid, Path, description = "Profile id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_profile(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<AdminUpdateProfileRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match profile_service
        .admin_update_profile(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/profiles/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Profile id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_profile(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match profile_service.delete_profile(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Profile deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/orders",
    tag = "admin",
    params(
        ("status" = Option<String>, Query, description = "pending | active"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Page size")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order list"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_orders(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match subscription_service.list_orders(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/orders/{id}/approve",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Order id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order approved", body = OrderResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Already approved")
    )
)]
pub async fn approve_order(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match subscription_service.approve_order(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response,
            "message": "Order approved"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/orders/{id}/reject",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Order id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order rejected and removed"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn reject_order(
    subscription_service: web::Data<SubscriptionService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match subscription_service.reject_order(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Order rejected"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/packages",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All packages"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_packages(
    package_service: web::Data<PackageService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match package_service.list_all().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/packages",
    tag = "admin",
    request_body = CreatePackageRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Package created", body = PackageResponse),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_package(
    package_service: web::Data<PackageService>,
    req: HttpRequest,
    request: web::Json<CreatePackageRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match package_service.create_package(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/packages/{id}",
    tag = "admin",
    request_body = UpdatePackageRequest,
    params(("id" = i64, Path, description = "Package id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Package updated", body = PackageResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_package(
    package_service: web::Data<PackageService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdatePackageRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match package_service
        .update_package(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/packages/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "Package id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Package retired"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_package(
    package_service: web::Data<PackageService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match package_service.delete_package(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Package retired"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/profiles", web::get().to(list_profiles))
            .route("/profiles/{id}", web::put().to(update_profile))
            .route("/profiles/{id}", web::delete().to(delete_profile))
            .route("/orders", web::get().to(list_orders))
            .route("/orders/{id}/approve", web::post().to(approve_order))
            .route("/orders/{id}/reject", web::post().to(reject_order))
            .route("/packages", web::get().to(list_packages))
            .route("/packages", web::post().to(create_package))
            .route("/packages/{id}", web::put().to(update_package))
            .route("/packages/{id}", web::delete().to(delete_package)),
    );
}
