use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::models::ApiResponse;
use crate::models::dashboard::responses::DashboardStats;
use crate::models::users::entities::UserRole;
use crate::services::{current_user, storage_error};

pub async fn get_stats(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let stats = match user.role {
        UserRole::Admin => storage
            .get_admin_dashboard_stats()
            .await
            .map(DashboardStats::Admin),
        UserRole::Teacher => storage
            .get_teacher_dashboard_stats(user.id)
            .await
            .map(DashboardStats::Teacher),
        UserRole::Student => storage
            .get_student_dashboard_stats(user.id, user.semester)
            .await
            .map(DashboardStats::Student),
    };

    match stats {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "获取统计数据成功",
        ))),
        Err(e) => Ok(storage_error("查询统计数据失败", e)),
    }
}
