use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::quizzes::requests::{
    AddQuestionsRequest, CreateQuizRequest, QuizListParams, SubmitAttemptRequest,
    UpdateQuizRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::QuizService;
use crate::utils::SafeIDI64;

// 懒加载的全局 QuizService 实例
static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

pub async fn list_quizzes(
    req: HttpRequest,
    query: web::Query<QuizListParams>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_quizzes(&req, query.into_inner()).await
}

pub async fn create_quiz(
    req: HttpRequest,
    body: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.create_quiz(&req, body.into_inner()).await
}

pub async fn get_quiz(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(&req, path.0).await
}

pub async fn update_quiz(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .update_quiz(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_quiz(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_quiz(&req, path.0).await
}

pub async fn list_questions(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_questions(&req, path.0).await
}

pub async fn add_questions(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<AddQuestionsRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .add_questions(&req, path.0, body.into_inner())
        .await
}

pub async fn submit_attempt(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SubmitAttemptRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .submit_attempt(&req, path.0, body.into_inner())
        .await
}

pub async fn list_attempts(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_attempts(&req, path.0).await
}

pub async fn get_my_attempt(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_my_attempt(&req, path.0).await
}

// 配置路由
pub fn configure_quiz_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/quizzes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列表 - 学生只看到已发布的本学期测验
                    .route(web::get().to(list_quizzes))
                    .route(
                        web::post()
                            .to(create_quiz)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // 详情 - 学生视图不含正确答案
                    .route(web::get().to(get_quiz))
                    .route(
                        web::put()
                            .to(update_quiz)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_quiz)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/questions")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::get().to(list_questions))
                    .route(web::post().to(add_questions)),
            )
            .service(
                web::resource("/{id}/attempt").route(
                    web::post()
                        .to(submit_attempt)
                        .wrap(middlewares::RateLimit::quiz_attempt())
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            .service(
                web::resource("/{id}/attempts").route(
                    web::get()
                        .to(list_attempts)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{id}/my-attempt").route(
                    web::get()
                        .to(get_my_attempt)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            ),
    );
}
