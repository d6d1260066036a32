use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::models::ApiResponse;
use crate::models::quizzes::requests::{QuizListParams, QuizListQuery};
use crate::services::{current_user, storage_error};

pub async fn list_quizzes(
    service: &QuizService,
    request: &HttpRequest,
    query: QuizListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let mut list_query = QuizListQuery::from(query);
    if user.is_student() {
        list_query.published_only = true;
        list_query.visible_semester = user.semester;
    }

    match storage.list_quizzes_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "获取测验列表成功",
        ))),
        Err(e) => Ok(storage_error("获取测验列表失败", e)),
    }
}
