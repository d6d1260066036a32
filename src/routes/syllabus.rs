use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::syllabus::requests::{
    CreateSubtopicRequest, CreateTopicRequest, SyllabusQuery, UpdateSubtopicRequest,
    UpdateTopicRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::SyllabusService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SyllabusService 实例
static SYLLABUS_SERVICE: Lazy<SyllabusService> = Lazy::new(SyllabusService::new_lazy);

pub async fn list_topics(
    req: HttpRequest,
    query: web::Query<SyllabusQuery>,
) -> ActixResult<HttpResponse> {
    SYLLABUS_SERVICE
        .list_topics(&req, query.into_inner())
        .await
}

pub async fn create_topic(
    req: HttpRequest,
    body: web::Json<CreateTopicRequest>,
) -> ActixResult<HttpResponse> {
    SYLLABUS_SERVICE
        .create_topic(&req, body.into_inner())
        .await
}

pub async fn update_topic(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateTopicRequest>,
) -> ActixResult<HttpResponse> {
    SYLLABUS_SERVICE
        .update_topic(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_topic(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SYLLABUS_SERVICE.delete_topic(&req, path.0).await
}

pub async fn create_subtopic(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CreateSubtopicRequest>,
) -> ActixResult<HttpResponse> {
    SYLLABUS_SERVICE
        .create_subtopic(&req, path.0, body.into_inner())
        .await
}

pub async fn update_subtopic(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateSubtopicRequest>,
) -> ActixResult<HttpResponse> {
    SYLLABUS_SERVICE
        .update_subtopic(&req, path.0, body.into_inner())
        .await
}

pub async fn toggle_subtopic(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SYLLABUS_SERVICE.toggle_subtopic(&req, path.0).await
}

pub async fn delete_subtopic(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SYLLABUS_SERVICE.delete_subtopic(&req, path.0).await
}

pub async fn get_progress(
    req: HttpRequest,
    query: web::Query<SyllabusQuery>,
) -> ActixResult<HttpResponse> {
    SYLLABUS_SERVICE
        .get_progress(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_syllabus_routes(cfg: &mut web::ServiceConfig) {
    let teacher_only = || middlewares::RequireRole::new_any(UserRole::teacher_roles());

    cfg.service(
        web::scope("/api/syllabus")
            .wrap(middlewares::RequireJWT)
            .route("/progress", web::get().to(get_progress))
            .service(
                web::resource("/topics")
                    .route(web::get().to(list_topics))
                    .route(web::post().to(create_topic).wrap(teacher_only())),
            )
            .service(
                web::resource("/topics/{id}")
                    .route(web::put().to(update_topic).wrap(teacher_only()))
                    .route(web::delete().to(delete_topic).wrap(teacher_only())),
            )
            .service(
                web::resource("/topics/{id}/subtopics")
                    .route(web::post().to(create_subtopic).wrap(teacher_only())),
            )
            .service(
                web::resource("/subtopics/{id}")
                    .route(web::put().to(update_subtopic).wrap(teacher_only()))
                    .route(web::delete().to(delete_subtopic).wrap(teacher_only())),
            )
            .service(
                web::resource("/subtopics/{id}/toggle")
                    .route(web::put().to(toggle_subtopic).wrap(teacher_only())),
            ),
    );
}
