use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MaterialService;
use crate::models::materials::requests::{MaterialForm, NewMaterial};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::uploads::{UploadForm, receive_upload};
use crate::services::{current_user, forbidden, storage_error, validation_failed};
use crate::utils::validate::{validate_required_text, validate_semester};

pub async fn upload_material(
    service: &MaterialService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if !user.is_teacher() {
        return Ok(forbidden("只有教师可以上传资料"));
    }

    let form = match receive_upload(payload).await {
        Ok(form) => form,
        Err(resp) => return Ok(resp),
    };
    let Some(file) = form.file.clone() else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "上传内容中没有文件",
        )));
    };

    let fields = match material_form(&form) {
        Ok(fields) => fields,
        Err(msg) => {
            form.discard();
            return Ok(validation_failed(msg));
        }
    };

    let material = NewMaterial {
        teacher_id: user.id,
        // material_form 已保证 title、subject 存在
        title: fields.title.unwrap_or_default(),
        description: fields.description,
        subject: fields.subject.unwrap_or_default(),
        semester: fields.semester,
        file_name: file.original_name,
        file_path: file.stored_path,
        file_size: file.size,
        file_type: file.mime_type,
    };

    let storage = service.get_storage(request);
    match storage.create_material(material).await {
        Ok(material) => {
            info!(
                "Material {} ({} bytes) uploaded by teacher {}",
                material.id, material.file_size, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                material,
                "资料上传成功",
            )))
        }
        Err(e) => {
            form.discard();
            Ok(storage_error("保存资料失败", e))
        }
    }
}

fn material_form(form: &UploadForm) -> Result<MaterialForm, String> {
    let fields = MaterialForm {
        title: form.text("title"),
        description: form.text("description"),
        subject: form.text("subject"),
        semester: match form.text("semester") {
            Some(raw) => Some(
                raw.parse::<i32>()
                    .map_err(|_| "学期必须为数字".to_string())?,
            ),
            None => None,
        },
    };

    validate_required_text(fields.title.as_deref().unwrap_or_default(), "标题", 255)?;
    validate_required_text(fields.subject.as_deref().unwrap_or_default(), "科目", 100)?;
    if let Some(semester) = fields.semester {
        validate_semester(semester)?;
    }
    Ok(fields)
}
