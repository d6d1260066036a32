pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::lazy_storage_service;

lazy_storage_service!(DashboardService);

impl DashboardService {
    // 按当前用户角色返回统计
    pub async fn get_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::get_stats(self, request).await
    }
}
