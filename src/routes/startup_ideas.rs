use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::startup_ideas::requests::{
    CreateStartupIdeaRequest, ReviewStartupIdeaRequest, StartupIdeaListParams,
    UpdateStartupIdeaRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::StartupIdeaService;
use crate::utils::SafeIDI64;

// 懒加载的全局 StartupIdeaService 实例
static STARTUP_IDEA_SERVICE: Lazy<StartupIdeaService> = Lazy::new(StartupIdeaService::new_lazy);

pub async fn list_ideas(
    req: HttpRequest,
    query: web::Query<StartupIdeaListParams>,
) -> ActixResult<HttpResponse> {
    STARTUP_IDEA_SERVICE
        .list_ideas(&req, query.into_inner())
        .await
}

pub async fn create_idea(
    req: HttpRequest,
    body: web::Json<CreateStartupIdeaRequest>,
) -> ActixResult<HttpResponse> {
    STARTUP_IDEA_SERVICE
        .create_idea(&req, body.into_inner())
        .await
}

pub async fn get_idea(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    STARTUP_IDEA_SERVICE.get_idea(&req, path.0).await
}

pub async fn update_idea(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateStartupIdeaRequest>,
) -> ActixResult<HttpResponse> {
    STARTUP_IDEA_SERVICE
        .update_idea(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_idea(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    STARTUP_IDEA_SERVICE.delete_idea(&req, path.0).await
}

pub async fn review_idea(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<ReviewStartupIdeaRequest>,
) -> ActixResult<HttpResponse> {
    STARTUP_IDEA_SERVICE
        .review_idea(&req, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_startup_idea_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/startup-ideas")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列表 - 学生只看到自己的想法
                    .route(web::get().to(list_ideas))
                    .route(
                        web::post()
                            .to(create_idea)
                            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_idea))
                    // 修改 - 提交者本人且仍待审核
                    .route(
                        web::put()
                            .to(update_idea)
                            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                    )
                    .route(web::delete().to(delete_idea)),
            )
            .service(
                web::resource("/{id}/review").route(
                    web::put()
                        .to(review_idea)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            ),
    );
}
