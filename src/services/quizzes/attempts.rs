use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::grading::grade;
use super::{QuizService, visible_to_student};
use crate::errors::LmsError;
use crate::models::quizzes::requests::SubmitAttemptRequest;
use crate::models::quizzes::responses::{AttemptListResponse, AttemptResultResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};

fn already_attempted() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::QuizAlreadyAttempted,
        "你已作答过该测验",
    ))
}

pub async fn submit_attempt(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    body: SubmitAttemptRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if !user.is_student() {
        return Ok(forbidden("只有学生可以作答测验"));
    }
    let storage = service.get_storage(request);

    let quiz = match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => return Ok(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => return Ok(storage_error("查询测验失败", e)),
    };
    if !quiz.is_published {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::QuizNotPublished,
            "测验尚未发布",
        )));
    }
    if !visible_to_student(&quiz, &user) {
        return Ok(not_found(ErrorCode::QuizNotFound, "测验不存在"));
    }

    match storage.get_quiz_attempt(quiz_id, user.id).await {
        Ok(Some(_)) => return Ok(already_attempted()),
        Ok(None) => {}
        Err(e) => return Ok(storage_error("查询作答记录失败", e)),
    }

    let questions = match storage.list_quiz_questions(quiz_id).await {
        Ok(questions) if questions.is_empty() => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::QuizHasNoQuestions,
                "测验没有题目",
            )));
        }
        Ok(questions) => questions,
        Err(e) => return Ok(storage_error("查询测验题目失败", e)),
    };

    let outcome = grade(&questions, &body.answers);
    let raw_answers = match serde_json::to_value(&body.answers) {
        Ok(value) => value,
        Err(e) => return Ok(validation_failed(format!("作答格式错误: {e}"))),
    };

    // 唯一索引兜底并发重复提交
    let attempt = match storage
        .create_quiz_attempt(quiz_id, user.id, outcome.score, quiz.total_marks, &raw_answers)
        .await
    {
        Ok(attempt) => attempt,
        Err(LmsError::Conflict(_)) => return Ok(already_attempted()),
        Err(e) => return Ok(storage_error("保存作答失败", e)),
    };

    info!(
        "Student {} scored {}/{} on quiz {}",
        user.id, outcome.score, quiz.total_marks, quiz_id
    );

    let response = AttemptResultResponse {
        attempt,
        score: outcome.score,
        total_marks: quiz.total_marks,
        correct_count: outcome.correct_count as i32,
        question_count: questions.len() as i32,
    };
    Ok(HttpResponse::Created().json(ApiResponse::success(
        response,
        "测验提交成功",
    )))
}

pub async fn list_attempts(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) if !user.owns_or_admin(quiz.teacher_id) => {
            return Ok(forbidden("只能查看自己测验的作答记录"));
        }
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => return Ok(storage_error("查询测验失败", e)),
    }

    match storage.list_quiz_attempts(quiz_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttemptListResponse { items },
            "获取作答记录成功",
        ))),
        Err(e) => Ok(storage_error("获取作答记录失败", e)),
    }
}

pub async fn get_my_attempt(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_quiz_attempt(quiz_id, user.id).await {
        Ok(Some(attempt)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            attempt,
            "获取作答记录成功",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::NotFound, "作答记录不存在")),
        Err(e) => Ok(storage_error("查询作答记录失败", e)),
    }
}
