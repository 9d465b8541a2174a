use crate::error::AppError;
use crate::middlewares::AuthContext;
use crate::models::*;
use crate::services::QuestionService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

fn auth_context(req: &HttpRequest) -> Option<AuthContext> {
    req.extensions().get::<AuthContext>().cloned()
}

fn require_author(req: &HttpRequest) -> Result<AuthContext, AppError> {
    let ctx = auth_context(req)
        .ok_or_else(|| AppError::AuthError("Missing authentication context".to_string()))?;
    if !ctx.role.can_author_questions() {
        return Err(AppError::PermissionDenied);
    }
    Ok(ctx)
}

#[utoipa::path(
    post,
    path = "/questions",
    tag = "question",
    request_body = CreateQuestionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Question created", body = QuestionResponse),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Authoring roles only")
    )
)]
pub async fn create_question(
    question_service: web::Data<QuestionService>,
    req: HttpRequest,
    request: web::Json<CreateQuestionRequest>,
) -> Result<HttpResponse> {
    let ctx = match require_author(&req) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(e.error_response()),
    };
    match question_service
        .create_question(ctx.user_id, request.into_inner())
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
    path = "/questions",
    tag = "question",
    params(
        ("chapter_id" = Option<i64>, Query, description = "Filter by chapter"),
        ("question_type" = Option<String>, Query, description = "mcq | short | long"),
        ("difficulty" = Option<String>, Query, description = "easy | medium | hard"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Page size")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Question list"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_questions(
    question_service: web::Data<QuestionService>,
    query: web::Query<QuestionQuery>,
) -> Result<HttpResponse> {
    match question_service.list_questions(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/questions/{id}",
    tag = "question",
    request_body = UpdateQuestionRequest,
    params(("id" = i64, Path, description = "Question id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Question updated", body = QuestionResponse),
        (status = 403, description = "Authoring roles only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_question(
    question_service: web::Data<QuestionService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateQuestionRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_author(&req) {
        return Ok(e.error_response());
    }
    match question_service
        .update_question(path.into_inner(), request.into_inner())
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
    path = "/questions/{id}",
    tag = "question",
    params(("id" = i64, Path, description = "Question id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Question deleted"),
        (status = 403, description = "Authoring roles only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_question(
    question_service: web::Data<QuestionService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_author(&req) {
        return Ok(e.error_response());
    }
    match question_service.delete_question(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Question deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn question_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/questions")
            .route("", web::post().to(create_question))
            .route("", web::get().to(list_questions))
            .route("/{id}", web::put().to(update_question))
            .route("/{id}", web::delete().to(delete_question)),
    );
}
