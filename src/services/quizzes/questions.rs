use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuizService;
use crate::models::quizzes::requests::{AddQuestionsRequest, NewQuestion};
use crate::models::quizzes::responses::QuestionListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};
use crate::utils::validate::validate_required_text;

pub async fn list_questions(
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
    if !user.owns_or_admin(quiz.teacher_id) {
        return Ok(forbidden("只能查看自己测验的题目"));
    }

    match storage.list_quiz_questions(quiz_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuestionListResponse {
                items,
                total_marks: quiz.total_marks,
            },
            "获取题目列表成功",
        ))),
        Err(e) => Ok(storage_error("获取题目列表失败", e)),
    }
}

pub async fn add_questions(
    service: &QuizService,
    request: &HttpRequest,
    quiz_id: i64,
    body: AddQuestionsRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) if !user.owns_or_admin(quiz.teacher_id) => {
            return Ok(forbidden("只能向自己的测验添加题目"));
        }
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::QuizNotFound, "测验不存在")),
        Err(e) => return Ok(storage_error("查询测验失败", e)),
    }

    if body.questions.is_empty() {
        return Ok(validation_failed("至少需要一道题目"));
    }
    if let Err(msg) = validate_questions(&body.questions) {
        return Ok(validation_failed(msg));
    }

    let added = body.questions.len();
    // 插入题目与更新总分在同一事务内
    match storage.add_quiz_questions(quiz_id, body.questions).await {
        Ok((items, total_marks)) => {
            info!(
                "Added {} questions to quiz {}, total marks now {}",
                added, quiz_id, total_marks
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                QuestionListResponse { items, total_marks },
                "题目添加成功",
            )))
        }
        Err(e) => Ok(storage_error("添加题目失败", e)),
    }
}

/// 单题分值上限
pub(crate) const MAX_QUESTION_MARKS: i32 = 1000;
/// 单次请求最多提交的题目数
pub(crate) const MAX_QUESTIONS_PER_REQUEST: usize = 200;

/// 校验题目：题干非空，至少两个选项，正确答案下标在选项范围内，分值在 0..=1000
pub(crate) fn validate_questions(questions: &[NewQuestion]) -> Result<(), String> {
    if questions.len() > MAX_QUESTIONS_PER_REQUEST {
        return Err(format!(
            "单次最多提交 {MAX_QUESTIONS_PER_REQUEST} 道题目"
        ));
    }
    for (index, question) in questions.iter().enumerate() {
        let number = index + 1;
        validate_required_text(&question.question_text, "题干", 2000)
            .map_err(|e| format!("第 {number} 题: {e}"))?;
        if question.options.len() < 2 {
            return Err(format!("第 {number} 题: 至少需要两个选项"));
        }
        if question.options.iter().any(|option| option.trim().is_empty()) {
            return Err(format!("第 {number} 题: 选项不能为空"));
        }
        let in_range = usize::try_from(question.correct_answer)
            .is_ok_and(|answer| answer < question.options.len());
        if !in_range {
            return Err(format!(
                "第 {number} 题: 正确答案必须是 0 到 {} 之间的选项下标",
                question.options.len() - 1
            ));
        }
        if !(0..=MAX_QUESTION_MARKS).contains(&question.marks) {
            return Err(format!(
                "第 {number} 题: 分值必须在 0 到 {MAX_QUESTION_MARKS} 之间"
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct_answer: i32, marks: i32) -> NewQuestion {
        NewQuestion {
            question_text: "Capital of France?".to_string(),
            options: vec!["Berlin".into(), "Paris".into(), "Rome".into()],
            correct_answer,
            marks,
        }
    }

    #[test]
    fn test_accepts_valid_questions() {
        assert!(validate_questions(&[question(0, 1), question(2, 5)]).is_ok());
    }

    #[test]
    fn test_rejects_answer_out_of_range() {
        assert!(validate_questions(&[question(3, 1)]).is_err());
        assert!(validate_questions(&[question(-1, 1)]).is_err());
    }

    #[test]
    fn test_rejects_bad_shape() {
        let mut single_option = question(0, 1);
        single_option.options.truncate(1);
        assert!(validate_questions(&[single_option]).is_err());

        let err = validate_questions(&[question(0, 1), question(0, -2)]).unwrap_err();
        assert!(err.starts_with("第 2 题"));
    }

    #[test]
    fn test_rejects_oversized_marks() {
        assert!(validate_questions(&[question(0, MAX_QUESTION_MARKS)]).is_ok());
        assert!(validate_questions(&[question(0, MAX_QUESTION_MARKS + 1)]).is_err());
        assert!(validate_questions(&[question(0, i32::MAX), question(1, i32::MAX)]).is_err());
    }

    #[test]
    fn test_rejects_too_many_questions() {
        let questions = vec![question(0, 1); MAX_QUESTIONS_PER_REQUEST + 1];
        assert!(validate_questions(&questions).is_err());
    }
}
