use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuizService, visible_to_student};
use crate::models::quizzes::responses::QuizDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, not_found, storage_error};

pub async fn get_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let quiz = match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => return Ok(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => return Ok(storage_error("查询测验失败", e)),
    };

    // 未发布或其他学期的测验对学生不可见
    if user.is_student() && !visible_to_student(&quiz, &user) {
        return Ok(not_found(ErrorCode::QuizNotFound, "测验不存在"));
    }

    let questions = match storage.list_quiz_questions(quiz_id).await {
        Ok(questions) => questions,
        Err(e) => return Ok(storage_error("查询测验题目失败", e)),
    };

    let response = if user.is_student() {
        let attempted = match storage.get_quiz_attempt(quiz_id, user.id).await {
            Ok(attempt) => attempt.is_some(),
            Err(e) => return Ok(storage_error("查询作答记录失败", e)),
        };
        QuizDetailResponse {
            quiz,
            questions: questions.into_iter().map(|q| q.redacted()).collect(),
            attempted: Some(attempted),
        }
    } else {
        QuizDetailResponse {
            quiz,
            questions,
            attempted: None,
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "获取测验成功",
    )))
}
