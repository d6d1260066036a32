use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::QuizService;
use super::questions::validate_questions;
use crate::models::ApiResponse;
use crate::models::quizzes::requests::CreateQuizRequest;
use crate::services::{current_user, forbidden, storage_error, validation_failed};
use crate::utils::validate::{validate_required_text, validate_semester};

pub async fn create_quiz(
    service: &QuizService,
    request: &HttpRequest,
    quiz_data: CreateQuizRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    // 测验归属于教师账号
    if !user.is_teacher() {
        return Ok(forbidden("只有教师可以创建测验"));
    }

    if let Err(msg) = validate_quiz_fields(&quiz_data) {
        return Ok(validation_failed(msg));
    }

    let storage = service.get_storage(request);
    match storage.create_quiz(user.id, quiz_data).await {
        Ok(quiz) => {
            info!(
                "Quiz {} created by teacher {} with total marks {}",
                quiz.id, user.id, quiz.total_marks
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(quiz, "测验创建成功")))
        }
        Err(e) => Ok(storage_error("创建测验失败", e)),
    }
}

fn validate_quiz_fields(quiz_data: &CreateQuizRequest) -> Result<(), String> {
    validate_required_text(&quiz_data.title, "标题", 255)?;
    validate_required_text(&quiz_data.subject, "科目", 100)?;
    if let Some(semester) = quiz_data.semester {
        validate_semester(semester)?;
    }
    if let Some(minutes) = quiz_data.duration_minutes
        && minutes <= 0
    {
        return Err("时长必须为正整数（分钟）".to_string());
    }
    if let Some(questions) = &quiz_data.questions {
        validate_questions(questions)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::requests::NewQuestion;

    fn request() -> CreateQuizRequest {
        CreateQuizRequest {
            title: "Algebra".to_string(),
            description: None,
            subject: "Math".to_string(),
            semester: Some(2),
            duration_minutes: Some(30),
            is_published: None,
            questions: None,
        }
    }

    #[test]
    fn test_validate_quiz_fields() {
        assert!(validate_quiz_fields(&request()).is_ok());

        let mut blank = request();
        blank.title = "  ".to_string();
        assert!(validate_quiz_fields(&blank).is_err());

        let mut bad_semester = request();
        bad_semester.semester = Some(9);
        assert!(validate_quiz_fields(&bad_semester).is_err());

        let mut bad_question = request();
        bad_question.questions = Some(vec![NewQuestion {
            question_text: "1 + 1".to_string(),
            options: vec!["1".into(), "2".into()],
            correct_answer: 2,
            marks: 1,
        }]);
        assert!(validate_quiz_fields(&bad_question).is_err());
    }
}
