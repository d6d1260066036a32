use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ScheduleService, can_manage};
use crate::models::schedules::audience::Audience;
use crate::models::schedules::requests::UpdateScheduleRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error, validation_failed};
use crate::utils::validate::validate_required_text;

pub async fn update_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
    mut update_data: UpdateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let existing = match storage.get_schedule_by_id(schedule_id).await {
        Ok(Some(schedule)) => schedule,
        Ok(None) => return Ok(not_found(ErrorCode::ScheduleNotFound, "日程不存在")),
        Err(e) => return Ok(storage_error("查询日程失败", e)),
    };
    if !can_manage(&existing, &user) {
        return Ok(forbidden("只能修改自己创建的日程"));
    }

    if let Some(title) = &update_data.title
        && let Err(msg) = validate_required_text(title, "标题", 255)
    {
        return Ok(validation_failed(msg));
    }
    let start_time = update_data.start_time.unwrap_or(existing.start_time);
    let end_time = update_data.end_time.or(existing.end_time);
    if end_time.is_some_and(|end| end < start_time) {
        return Ok(validation_failed("结束时间不能早于开始时间"));
    }
    if let Some(audience) = update_data.target_audience.as_mut() {
        *audience = Audience::parse(audience).to_string();
    }

    match storage.update_schedule(schedule_id, update_data).await {
        Ok(Some(schedule)) => {
            info!("Schedule {} updated by {} {}", schedule_id, user.role, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                schedule,
                "日程更新成功",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::ScheduleNotFound, "日程不存在")),
        Err(e) => Ok(storage_error("更新日程失败", e)),
    }
}
