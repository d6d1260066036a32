use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::ApiResponse;
use crate::models::materials::requests::{MaterialListParams, MaterialListQuery};
use crate::services::{current_user, storage_error};

pub async fn list_materials(
    service: &MaterialService,
    request: &HttpRequest,
    query: MaterialListParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let mut list_query = MaterialListQuery::from(query);
    if user.is_student() {
        list_query.visible_semester = user.semester;
    }

    match storage.list_materials_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "获取资料列表成功",
        ))),
        Err(e) => Ok(storage_error("获取资料列表失败", e)),
    }
}
