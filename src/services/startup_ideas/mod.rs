pub mod crud;
pub mod review;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::lazy_storage_service;
use crate::models::startup_ideas::entities::StartupIdea;
use crate::models::startup_ideas::requests::{
    CreateStartupIdeaRequest, ReviewStartupIdeaRequest, StartupIdeaListParams,
    UpdateStartupIdeaRequest,
};
use crate::models::users::entities::AuthUser;

lazy_storage_service!(StartupIdeaService);

impl StartupIdeaService {
    pub async fn list_ideas(
        &self,
        request: &HttpRequest,
        query: StartupIdeaListParams,
    ) -> ActixResult<HttpResponse> {
        crud::list_ideas(self, request, query).await
    }

    pub async fn create_idea(
        &self,
        request: &HttpRequest,
        idea_data: CreateStartupIdeaRequest,
    ) -> ActixResult<HttpResponse> {
        crud::create_idea(self, request, idea_data).await
    }

    pub async fn get_idea(&self, request: &HttpRequest, idea_id: i64) -> ActixResult<HttpResponse> {
        crud::get_idea(self, request, idea_id).await
    }

    pub async fn update_idea(
        &self,
        request: &HttpRequest,
        idea_id: i64,
        update_data: UpdateStartupIdeaRequest,
    ) -> ActixResult<HttpResponse> {
        crud::update_idea(self, request, idea_id, update_data).await
    }

    pub async fn delete_idea(
        &self,
        request: &HttpRequest,
        idea_id: i64,
    ) -> ActixResult<HttpResponse> {
        crud::delete_idea(self, request, idea_id).await
    }

    pub async fn review_idea(
        &self,
        request: &HttpRequest,
        idea_id: i64,
        review_data: ReviewStartupIdeaRequest,
    ) -> ActixResult<HttpResponse> {
        review::review_idea(self, request, idea_id, review_data).await
    }
}

/// 学生只能看到自己的想法，教师和管理员可查看全部
pub(crate) fn visible_to(idea: &StartupIdea, user: &AuthUser) -> bool {
    !user.is_student() || idea.student_id == user.id
}
