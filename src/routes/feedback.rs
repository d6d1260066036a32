use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::feedback::requests::{
    CreateFeedbackRequest, FeedbackListParams, RespondFeedbackRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::FeedbackService;
use crate::utils::SafeIDI64;

// 懒加载的全局 FeedbackService 实例
static FEEDBACK_SERVICE: Lazy<FeedbackService> = Lazy::new(FeedbackService::new_lazy);

pub async fn list_feedback(
    req: HttpRequest,
    query: web::Query<FeedbackListParams>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .list_feedback(&req, query.into_inner())
        .await
}

pub async fn submit_feedback(
    req: HttpRequest,
    body: web::Json<CreateFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .submit_feedback(&req, body.into_inner())
        .await
}

pub async fn respond_feedback(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<RespondFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .respond_feedback(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_feedback(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.delete_feedback(&req, path.0).await
}

// 配置路由
pub fn configure_feedback_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/feedback")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列表 - 按角色限定范围
                    .route(web::get().to(list_feedback))
                    .route(
                        web::post()
                            .to(submit_feedback)
                            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                    ),
            )
            .service(
                // 被反馈的教师或管理员（业务层检查）
                web::resource("/{id}/respond").route(
                    web::put()
                        .to(respond_feedback)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{id}").route(
                    web::delete()
                        .to(delete_feedback)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            ),
    );
}
