use crate::error::AppError;
use crate::middlewares::AuthContext;
use crate::models::*;
use crate::services::CatalogService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn auth_context(req: &HttpRequest) -> Option<AuthContext> {
    req.extensions().get::<AuthContext>().cloned()
}

fn require_admin(req: &HttpRequest) -> Result<AuthContext, AppError> {
    let ctx = auth_context(req)
        .ok_or_else(|| AppError::AuthError("Missing authentication context".to_string()))?;
    if !ctx.role.is_admin() {
        return Err(AppError::PermissionDenied);
    }
    Ok(ctx)
}

#[utoipa::path(
    get,
    path = "/classes",
    tag = "catalog",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Class list"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_classes(catalog_service: web::Data<CatalogService>) -> Result<HttpResponse> {
    match catalog_service.list_classes().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/classes",
    tag = "catalog",
    request_body = CreateClassRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Class created", body = ClassResponse),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_class(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    request: web::Json<CreateClassRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service.create_class(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/classes/{id}",
    tag = "catalog",
    request_body = UpdateClassRequest,
    params(("id" = i64, Path, description = "Class id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Class updated", body = ClassResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_class(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateClassRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service
        .update_class(path.into_inner(), request.into_inner())
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
    path = "/classes/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Class id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_class(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service.delete_class(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Class deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/classes/{id}/subjects",
    tag = "catalog",
    params(("id" = i64, Path, description = "Class id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Subject list"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_subjects(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match catalog_service.list_subjects(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/subjects",
    tag = "catalog",
    request_body = CreateSubjectRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Subject created", body = SubjectResponse),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_subject(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    request: web::Json<CreateSubjectRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service.create_subject(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/subjects/{id}",
    tag = "catalog",
    request_body = UpdateSubjectRequest,
    params(("id" = i64, Path, description = "Subject id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Subject updated", body = SubjectResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_subject(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateSubjectRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service
        .update_subject(path.into_inner(), request.into_inner())
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
    path = "/subjects/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Subject id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Subject deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_subject(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service.delete_subject(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Subject deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subjects/{id}/chapters",
    tag = "catalog",
    params(("id" = i64, Path, description = "Subject id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Chapter list"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_chapters(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match catalog_service.list_chapters(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/chapters",
    tag = "catalog",
    request_body = CreateChapterRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Chapter created", body = ChapterResponse),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_chapter(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    request: web::Json<CreateChapterRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service.create_chapter(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/chapters/{id}",
    tag = "catalog",
    request_body = UpdateChapterRequest,
    params(("id" = i64, Path, description = "Chapter id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Chapter updated", body = ChapterResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_chapter(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateChapterRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service
        .update_chapter(path.into_inner(), request.into_inner())
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
    path = "/chapters/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Chapter id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Chapter deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_chapter(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }
    match catalog_service.delete_chapter(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Chapter deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn catalog_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/classes")
            .route("", web::get().to(list_classes))
            .route("", web::post().to(create_class))
            .route("/{id}", web::put().to(update_class))
            .route("/{id}", web::delete().to(delete_class))
            .route("/{id}/subjects", web::get().to(list_subjects)),
    )
    .service(
        web::scope("/subjects")
            .route("", web::post().to(create_subject))
            .route("/{id}", web::put().to(update_subject))
            .route("/{id}", web::delete().to(delete_subject))
            .route("/{id}/chapters", web::get().to(list_chapters)),
    )
    .service(
        web::scope("/chapters")
            .route("", web::post().to(create_chapter))
            .route("/{id}", web::put().to(update_chapter))
            .route("/{id}", web::delete().to(delete_chapter)),
    );
}
