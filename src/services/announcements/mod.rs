pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::lazy_storage_service;
use crate::models::announcements::entities::Announcement;
use crate::models::announcements::requests::{
    AnnouncementListParams, CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::models::users::entities::AuthUser;

lazy_storage_service!(AnnouncementService);

impl AnnouncementService {
    pub async fn list_announcements(
        &self,
        request: &HttpRequest,
        query: AnnouncementListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_announcements(self, request, query).await
    }

    // 发布公告并通知受众
    pub async fn create_announcement(
        &self,
        request: &HttpRequest,
        announcement_data: CreateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_announcement(self, request, announcement_data).await
    }

    pub async fn get_announcement(
        &self,
        request: &HttpRequest,
        announcement_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_announcement(self, request, announcement_id).await
    }

    pub async fn update_announcement(
        &self,
        request: &HttpRequest,
        announcement_id: i64,
        update_data: UpdateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_announcement(self, request, announcement_id, update_data).await
    }

    pub async fn delete_announcement(
        &self,
        request: &HttpRequest,
        announcement_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_announcement(self, request, announcement_id).await
    }
}

pub(crate) fn is_author_or_admin(announcement: &Announcement, user: &AuthUser) -> bool {
    user.is_admin()
        || (announcement.author_id == user.id && announcement.author_role == user.role)
}
