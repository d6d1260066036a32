use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnnouncementService;
use crate::models::ApiResponse;
use crate::models::announcements::requests::{AnnouncementListParams, AnnouncementListQuery};
use crate::models::schedules::audience::Audience;
use crate::services::{current_user, storage_error};

pub async fn list_announcements(
    service: &AnnouncementService,
    request: &HttpRequest,
    query: AnnouncementListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let mut list_query = AnnouncementListQuery::from(query);
    list_query.visible_audiences = Audience::visible_labels(&user);
    if !user.is_admin() {
        list_query.author = Some((user.id, user.role));
    }

    match storage.list_announcements_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "获取公告列表成功",
        ))),
        Err(e) => Ok(storage_error("获取公告列表失败", e)),
    }
}
