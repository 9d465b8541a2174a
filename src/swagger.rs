use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{
    Difficulty, PackageType, PaperKind, QuestionType, SubscriptionStatus, UserRole,
};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::profile::get_profile,
        handlers::profile::update_profile,
        handlers::catalog::list_classes,
        handlers::catalog::create_class,
        handlers::catalog::update_class,
        handlers::catalog::delete_class,
        handlers::catalog::list_subjects,
        handlers::catalog::create_subject,
        handlers::catalog::update_subject,
        handlers::catalog::delete_subject,
        handlers::catalog::list_chapters,
        handlers::catalog::create_chapter,
        handlers::catalog::update_chapter,
        handlers::catalog::delete_chapter,
        handlers::question::create_question,
        handlers::question::list_questions,
        handlers::question::update_question,
        handlers::question::delete_question,
        handlers::paper::generate_paper,
        handlers::paper::list_papers,
        handlers::paper::get_paper,
        handlers::paper::delete_paper,
        handlers::subscription::status,
        handlers::subscription::subscribe,
        handlers::subscription::start_trial,
        handlers::subscription::list_packages,
        handlers::referral::list_referrals,
        handlers::contact::submit_contact,
        handlers::admin::list_profiles,
        handlers::admin::update_profile,
        handlers::admin::delete_profile,
        handlers::admin::list_orders,
        handlers::admin::approve_order,
        handlers::admin::reject_order,
        handlers::admin::list_packages,
        handlers::admin::create_package,
        handlers::admin::update_package,
        handlers::admin::delete_package,
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            AuthResponse,
            ProfileResponse,
            UpdateProfileRequest,
            AdminUpdateProfileRequest,
            UserRole,
            SubscriptionStatus,
            CreateClassRequest,
            UpdateClassRequest,
            ClassResponse,
            CreateSubjectRequest,
            UpdateSubjectRequest,
            SubjectResponse,
            CreateChapterRequest,
            UpdateChapterRequest,
            ChapterResponse,
            CreateQuestionRequest,
            UpdateQuestionRequest,
            QuestionResponse,
            QuestionType,
            Difficulty,
            GeneratePaperRequest,
            QuestionCounts,
            PaperResponse,
            PaperQuestionResponse,
            PaperDetailResponse,
            PaperKind,
            CreatePackageRequest,
            UpdatePackageRequest,
            PackageResponse,
            PackageType,
            OrderStatus,
            OrderResponse,
            SubscribeRequest,
            Entitlement,
            ReferralResponse,
            ContactRequest,
            ContactResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "profile", description = "Profile management API"),
        (name = "catalog", description = "Class/subject/chapter catalog API"),
        (name = "question", description = "Question bank API"),
        (name = "paper", description = "Paper generation API"),
        (name = "subscription", description = "Trial and subscription API"),
        (name = "referral", description = "Referral API"),
        (name = "contact", description = "Contact form API"),
        (name = "admin", description = "Admin API"),
    ),
    info(
        title = "Papergen Backend API",
        version = "1.0.0",
        description = "Exam paper generator REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
