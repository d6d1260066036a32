use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MaterialService, visible_to};
use crate::models::ErrorCode;
use crate::services::uploads::file_download;
use crate::services::{current_user, not_found, storage_error};

pub async fn download_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_material_by_id(material_id).await {
        Ok(Some(material)) if visible_to(&material, &user) => {
            Ok(file_download(&material.file_path, &material.file_name))
        }
        Ok(_) => Ok(not_found(ErrorCode::MaterialNotFound, "资料不存在")),
        Err(e) => Ok(storage_error("查询资料失败", e)),
    }
}
