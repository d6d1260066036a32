use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AnnouncementService, is_author_or_admin};
use crate::models::announcements::requests::UpdateAnnouncementRequest;
use crate::models::schedules::audience::Audience;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};
use crate::utils::validate::validate_required_text;

pub async fn update_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    announcement_id: i64,
    mut update_data: UpdateAnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_announcement_by_id(announcement_id).await {
        Ok(Some(announcement)) if !is_author_or_admin(&announcement, &user) => {
            return Ok(forbidden("只能修改自己的公告"));
        }
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AnnouncementNotFound,
                "公告不存在",
            ));
        }
        Err(e) => return Ok(storage_error("查询公告失败", e)),
    }

    if let Some(title) = &update_data.title
        && let Err(msg) = validate_required_text(title, "标题", 255)
    {
        return Ok(validation_failed(msg));
    }
    if let Some(content) = &update_data.content
        && let Err(msg) = validate_required_text(content, "内容", 20_000)
    {
        return Ok(validation_failed(msg));
    }
    if let Some(audience) = update_data.target_audience.as_mut() {
        *audience = Audience::parse(audience).to_string();
    }

    match storage.update_announcement(announcement_id, update_data).await {
        Ok(Some(announcement)) => {
            info!(
                "Announcement {} updated by {} {}",
                announcement_id, user.role, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                announcement,
                "公告更新成功",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::AnnouncementNotFound,
            "公告不存在",
        )),
        Err(e) => Ok(storage_error("更新公告失败", e)),
    }
}
