use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ScheduleService, can_manage};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_error};

pub async fn delete_schedule(
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
        Ok(Some(schedule)) if !can_manage(&schedule, &user) => {
            return Ok(forbidden("只能删除自己创建的日程"));
        }
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::ScheduleNotFound, "日程不存在")),
        Err(e) => return Ok(storage_error("查询日程失败", e)),
    }

    match storage.delete_schedule(schedule_id).await {
        Ok(true) => {
            info!("Schedule {} deleted by {} {}", schedule_id, user.role, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "日程删除成功",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::ScheduleNotFound, "日程不存在")),
        Err(e) => Ok(storage_error("删除日程失败", e)),
    }
}
