use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MaterialService, visible_to};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::uploads::remove_stored_file;
use crate::services::{current_user, forbidden, not_found, storage_error};

pub async fn get_material(
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
        Ok(Some(material)) if visible_to(&material, &user) => Ok(HttpResponse::Ok().json(
            ApiResponse::success(material, "获取资料成功"),
        )),
        Ok(_) => Ok(not_found(ErrorCode::MaterialNotFound, "资料不存在")),
        Err(e) => Ok(storage_error("查询资料失败", e)),
    }
}

pub async fn delete_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let material = match storage.get_material_by_id(material_id).await {
        Ok(Some(material)) => material,
        Ok(None) => return Ok(not_found(ErrorCode::MaterialNotFound, "资料不存在")),
        Err(e) => return Ok(storage_error("查询资料失败", e)),
    };
    if !user.owns_or_admin(material.teacher_id) {
        return Ok(forbidden("只能删除自己的资料"));
    }

    match storage.delete_material(material_id).await {
        Ok(true) => {
            // 记录删除后再清理磁盘文件
            remove_stored_file(&material.file_path);
            info!("Material {} deleted by {} {}", material_id, user.role, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "资料删除成功",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::MaterialNotFound, "资料不存在")),
        Err(e) => Ok(storage_error("删除资料失败", e)),
    }
}
