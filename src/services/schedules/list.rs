use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::ApiResponse;
use crate::models::schedules::audience::Audience;
use crate::models::schedules::requests::{ScheduleListParams, ScheduleListQuery};
use crate::services::{current_user, storage_error};

pub async fn list_schedules(
    service: &ScheduleService,
    request: &HttpRequest,
    query: ScheduleListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let mut list_query = ScheduleListQuery::from(query);
    list_query.visible_audiences = Audience::visible_labels(&user);
    if !user.is_admin() {
        list_query.creator = Some((user.id, user.role));
    }

    match storage.list_schedules_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "获取日程列表成功",
        ))),
        Err(e) => Ok(storage_error("获取日程列表失败", e)),
    }
}
