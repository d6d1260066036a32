use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, visible_to};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::uploads::{file_download, receive_upload, remove_stored_file};
use crate::services::{current_user, forbidden, not_found, storage_error};

pub async fn upload_attachment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => return Ok(not_found(ErrorCode::AssignmentNotFound, "作业不存在")),
        Err(e) => return Ok(storage_error("查询作业失败", e)),
    };
    if !user.owns_or_admin(assignment.teacher_id) {
        return Ok(forbidden("只能为自己的作业上传附件"));
    }

    let form = match receive_upload(payload).await {
        Ok(form) => form,
        Err(resp) => return Ok(resp),
    };
    let Some(file) = form.file.as_ref() else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "上传内容中没有文件",
        )));
    };

    match storage
        .set_assignment_attachment(assignment_id, &file.original_name, &file.stored_path)
        .await
    {
        Ok(Some(updated)) => {
            // 替换附件后删除旧文件
            if let Some(old_path) = assignment.attachment_path.as_deref() {
                remove_stored_file(old_path);
            }
            info!(
                "Attachment {} uploaded to assignment {}",
                file.original_name, assignment_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "附件上传成功",
            )))
        }
        Ok(None) => {
            form.discard();
            Ok(not_found(ErrorCode::AssignmentNotFound, "作业不存在"))
        }
        Err(e) => {
            form.discard();
            Ok(storage_error("保存附件失败", e))
        }
    }
}

pub async fn download_attachment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) if visible_to(&assignment, &user) => assignment,
        Ok(_) => return Ok(not_found(ErrorCode::AssignmentNotFound, "作业不存在")),
        Err(e) => return Ok(storage_error("查询作业失败", e)),
    };

    match (&assignment.attachment_path, &assignment.attachment_name) {
        (Some(path), Some(name)) => Ok(file_download(path, name)),
        _ => Ok(not_found(
            ErrorCode::FileNotFound,
            "该作业没有附件",
        )),
    }
}
