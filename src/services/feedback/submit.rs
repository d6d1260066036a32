use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FeedbackService;
use crate::models::feedback::requests::CreateFeedbackRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};
use crate::utils::validate::{validate_rating, validate_required_text};

fn validate_feedback(req: &CreateFeedbackRequest) -> Result<(), String> {
    validate_required_text(&req.subject, "科目", 255)?;
    validate_required_text(&req.message, "内容", 5_000)?;
    if let Some(rating) = req.rating {
        validate_rating(rating)?;
    }
    Ok(())
}

pub async fn submit_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    mut feedback_data: CreateFeedbackRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if !user.is_student() {
        return Ok(forbidden("只有学生可以提交反馈"));
    }
    if let Err(msg) = validate_feedback(&feedback_data) {
        return Ok(validation_failed(msg));
    }
    feedback_data.subject = feedback_data.subject.trim().to_string();
    feedback_data.message = feedback_data.message.trim().to_string();

    let storage = service.get_storage(request);

    // 指定教师时必须存在
    if let Some(teacher_id) = feedback_data.teacher_id {
        match storage.get_teacher_by_id(teacher_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(not_found(ErrorCode::TeacherNotFound, "教师不存在")),
            Err(e) => return Ok(storage_error("查询教师失败", e)),
        }
    }

    match storage.create_feedback(user.id, feedback_data).await {
        Ok(feedback) => {
            info!(
                "Feedback {} submitted by student {}{}",
                feedback.id,
                user.id,
                if feedback.is_anonymous { " (anonymous)" } else { "" }
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                feedback,
                "反馈提交成功",
            )))
        }
        Err(e) => Ok(storage_error("提交反馈失败", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(rating: Option<i32>) -> CreateFeedbackRequest {
        CreateFeedbackRequest {
            teacher_id: None,
            subject: "Lab sessions".to_string(),
            message: "More practice problems please".to_string(),
            rating,
            is_anonymous: true,
        }
    }

    #[test]
    fn test_rating_is_optional_but_bounded() {
        assert!(validate_feedback(&request(None)).is_ok());
        assert!(validate_feedback(&request(Some(5))).is_ok());
        assert!(validate_feedback(&request(Some(0))).is_err());
    }

    #[test]
    fn test_blank_message_rejected() {
        let mut req = request(None);
        req.message = "   ".to_string();
        assert!(validate_feedback(&req).is_err());
    }
}
