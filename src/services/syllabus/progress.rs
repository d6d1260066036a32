use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SyllabusService;
use crate::models::ApiResponse;
use crate::models::syllabus::requests::SyllabusQuery;
use crate::services::storage_error;

pub async fn get_progress(
    service: &SyllabusService,
    request: &HttpRequest,
    query: SyllabusQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_syllabus_progress(query).await {
        Ok(progress) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            progress,
            "获取大纲进度成功",
        ))),
        Err(e) => Ok(storage_error("查询大纲进度失败", e)),
    }
}
