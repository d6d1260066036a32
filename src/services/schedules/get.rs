use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, can_manage};
use crate::models::schedules::audience::Audience;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, not_found, storage_error};

pub async fn get_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_schedule_by_id(schedule_id).await {
        Ok(Some(schedule))
            if can_manage(&schedule, &user)
                || Audience::parse(&schedule.target_audience).reaches(&user) =>
        {
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                schedule,
                "获取日程成功",
            )))
        }
        Ok(_) => Ok(not_found(ErrorCode::ScheduleNotFound, "日程不存在")),
        Err(e) => Ok(storage_error("查询日程失败", e)),
    }
}
