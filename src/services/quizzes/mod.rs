pub mod attempts;
pub mod create;
pub mod delete;
pub mod get;
pub mod grading;
pub mod list;
pub mod questions;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::lazy_storage_service;
use crate::models::quizzes::entities::Quiz;
use crate::models::quizzes::requests::{
    AddQuestionsRequest, CreateQuizRequest, QuizListParams, SubmitAttemptRequest,
    UpdateQuizRequest,
};
use crate::models::users::entities::AuthUser;

lazy_storage_service!(QuizService);

impl QuizService {
    // 测验列表，学生只能看到本学期已发布的测验
    pub async fn list_quizzes(
        &self,
        request: &HttpRequest,
        query: QuizListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_quizzes(self, request, query).await
    }

    pub async fn create_quiz(
        &self,
        request: &HttpRequest,
        quiz_data: CreateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_quiz(self, request, quiz_data).await
    }

    // 测验详情（含题目）
    pub async fn get_quiz(&self, request: &HttpRequest, quiz_id: i64) -> ActixResult<HttpResponse> {
        get::get_quiz(self, request, quiz_id).await
    }

    pub async fn update_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        update_data: UpdateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_quiz(self, request, quiz_id, update_data).await
    }

    pub async fn delete_quiz(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_quiz(self, request, quiz_id).await
    }

    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        questions::list_questions(self, request, quiz_id).await
    }

    // 批量添加题目
    pub async fn add_questions(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        body: AddQuestionsRequest,
    ) -> ActixResult<HttpResponse> {
        questions::add_questions(self, request, quiz_id, body).await
    }

    // 学生提交作答并判分
    pub async fn submit_attempt(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
        body: SubmitAttemptRequest,
    ) -> ActixResult<HttpResponse> {
        attempts::submit_attempt(self, request, quiz_id, body).await
    }

    pub async fn list_attempts(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        attempts::list_attempts(self, request, quiz_id).await
    }

    pub async fn get_my_attempt(
        &self,
        request: &HttpRequest,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        attempts::get_my_attempt(self, request, quiz_id).await
    }
}

/// 学生可见：已发布，且未限定学期或学期与学生一致
pub(crate) fn visible_to_student(quiz: &Quiz, user: &AuthUser) -> bool {
    quiz.is_published && (quiz.semester.is_none() || quiz.semester == user.semester)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{AccountStatus, UserRole};

    fn quiz(semester: Option<i32>, is_published: bool) -> Quiz {
        Quiz {
            id: 1,
            teacher_id: 1,
            title: "Quiz".to_string(),
            description: None,
            subject: "Math".to_string(),
            semester,
            duration_minutes: None,
            total_marks: 0,
            is_published,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn student(semester: i32) -> AuthUser {
        AuthUser {
            id: 5,
            role: UserRole::Student,
            name: "Student".to_string(),
            email: "s@example.com".to_string(),
            semester: Some(semester),
            status: AccountStatus::Active,
        }
    }

    #[test]
    fn test_student_visibility() {
        assert!(visible_to_student(&quiz(Some(3), true), &student(3)));
        assert!(visible_to_student(&quiz(None, true), &student(3)));
        assert!(!visible_to_student(&quiz(Some(4), true), &student(3)));
        assert!(!visible_to_student(&quiz(Some(3), false), &student(3)));
    }
}
