pub mod list;
pub mod respond;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::lazy_storage_service;
use crate::models::feedback::entities::Feedback;
use crate::models::feedback::requests::{
    CreateFeedbackRequest, FeedbackListParams, RespondFeedbackRequest,
};
use crate::models::users::entities::AuthUser;

lazy_storage_service!(FeedbackService);

impl FeedbackService {
    pub async fn list_feedback(
        &self,
        request: &HttpRequest,
        query: FeedbackListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_feedback(self, request, query).await
    }

    pub async fn submit_feedback(
        &self,
        request: &HttpRequest,
        feedback_data: CreateFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_feedback(self, request, feedback_data).await
    }

    pub async fn respond_feedback(
        &self,
        request: &HttpRequest,
        feedback_id: i64,
        response_data: RespondFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        respond::respond_feedback(self, request, feedback_id, response_data).await
    }

    pub async fn delete_feedback(
        &self,
        request: &HttpRequest,
        feedback_id: i64,
    ) -> ActixResult<HttpResponse> {
        respond::delete_feedback(self, request, feedback_id).await
    }
}

/// 按查看者身份处理匿名反馈：仅管理员和提交者本人可见学生信息
pub(crate) fn present_for(feedback: Feedback, user: &AuthUser) -> Feedback {
    if user.is_admin() || (user.is_student() && feedback.student_id == Some(user.id)) {
        feedback
    } else {
        feedback.anonymized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{AccountStatus, UserRole};

    fn feedback(is_anonymous: bool) -> Feedback {
        Feedback {
            id: 1,
            student_id: Some(5),
            student_name: Some("Asha".to_string()),
            teacher_id: Some(2),
            teacher_name: Some("Dr. Rao".to_string()),
            subject: "Lectures".to_string(),
            message: "Slides were helpful".to_string(),
            rating: Some(4),
            is_anonymous,
            response: None,
            responded_at: None,
            created_at: chrono::Utc::now(),
        }
    }

    fn user(role: UserRole, id: i64) -> AuthUser {
        AuthUser {
            id,
            role,
            name: "Viewer".to_string(),
            email: "viewer@example.com".to_string(),
            semester: None,
            status: AccountStatus::Active,
        }
    }

    #[test]
    fn test_anonymous_feedback_hidden_from_teacher() {
        let shown = present_for(feedback(true), &user(UserRole::Teacher, 2));
        assert_eq!(shown.student_id, None);
        assert_eq!(shown.student_name, None);

        let shown = present_for(feedback(false), &user(UserRole::Teacher, 2));
        assert_eq!(shown.student_id, Some(5));
    }

    #[test]
    fn test_anonymous_feedback_visible_to_admin_and_author() {
        assert_eq!(
            present_for(feedback(true), &user(UserRole::Admin, 1)).student_id,
            Some(5)
        );
        assert_eq!(
            present_for(feedback(true), &user(UserRole::Student, 5)).student_name,
            Some("Asha".to_string())
        );
    }
}
