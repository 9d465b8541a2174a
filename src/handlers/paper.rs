use crate::error::AppError;
use crate::middlewares::AuthContext;
use crate::models::*;
use crate::services::PaperService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

fn auth_context(req: &HttpRequest) -> Option<AuthContext> {
    req.extensions().get::<AuthContext>().cloned()
}

#[utoipa::path(
    post,
    path = "/papers/generate",
    tag = "paper",
    request_body = GeneratePaperRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paper generated", body = PaperDetailResponse),
        (status = 400, description = "Invalid request"),
        (status = 402, description = "Subscription required"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn generate_paper(
    paper_service: web::Data<PaperService>,
    req: HttpRequest,
    request: web::Json<GeneratePaperRequest>,
) -> Result<HttpResponse> {
    let Some(ctx) = auth_context(&req) else {
        return Ok(AppError::AuthError("Missing authentication context".to_string()).error_response());
    };
    match paper_service
        .generate_paper(ctx.user_id, request.into_inner())
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
    get,
    path = "/papers",
    tag = "paper",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Page size"),
        ("kind" = Option<String>, Query, description = "exam | quiz")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paper list"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_papers(
    paper_service: web::Data<PaperService>,
    req: HttpRequest,
    query: web::Query<PaperQuery>,
) -> Result<HttpResponse> {
    let Some(ctx) = auth_context(&req) else {
        return Ok(AppError::AuthError("Missing authentication context".to_string()).error_response());
    };
    match paper_service.list_papers(ctx.user_id, &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/papers/{id}",
    tag = "paper",
    params(("id" = Uuid, Path, description = "Paper id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paper with questions", body = PaperDetailResponse),
        (status = 404, description = "Not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_paper(
    paper_service: web::Data<PaperService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let Some(ctx) = auth_context(&req) else {
        return Ok(AppError::AuthError("Missing authentication context".to_string()).error_response());
    };
    match paper_service.get_paper(ctx.user_id, path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/papers/{id}",
    tag = "paper",
    params(("id" = Uuid, Path, description = "Paper id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paper deleted"),
        (status = 404, description = "Not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_paper(
    paper_service: web::Data<PaperService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let Some(ctx) = auth_context(&req) else {
        return Ok(AppError::AuthError("Missing authentication context".to_string()).error_response());
    };
    match paper_service
        .delete_paper(ctx.user_id, path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Paper deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn paper_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/papers")
            .route("/generate", web::post().to(generate_paper))
            .route("", web::get().to(list_papers))
            .route("/{id}", web::get().to(get_paper))
            .route("/{id}", web::delete().to(delete_paper)),
    );
}
