//! multipart 上传与文件下载，资料、作业附件和作业提交共用
//!
//! 文件以 `<timestamp>-<uuid>.bin` 落盘到 `upload.dir`，记录原始文件名、大小和 MIME 类型。

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, http::header};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::LmsError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_magic::{extension_of, mime_for_extension};
use crate::utils::validate_magic_bytes;

const FILE_FIELD: &str = "file";
const MAX_TEXT_FIELD: usize = 64 * 1024;

/// 已落盘的上传文件
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub original_name: String,
    pub stored_path: String,
    pub size: i64,
    pub mime_type: String,
}

/// 解析后的 multipart 表单
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<StoredFile>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// 文本字段，去除首尾空白后为空视为缺失
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// 后续校验失败时删除已落盘的文件
    pub fn discard(&self) {
        if let Some(file) = &self.file {
            remove_stored_file(&file.stored_path);
        }
    }
}

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

fn upload_failed(e: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{}", LmsError::file_operation(format!("{e}")));
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::FileUploadFailed,
        "保存上传文件失败",
    ))
}

/// 读取整个 multipart 表单，最多接受一个名为 `file` 的文件字段
pub async fn receive_upload(mut payload: Multipart) -> Result<UploadForm, HttpResponse> {
    let mut form = UploadForm::default();
    if let Err(resp) = read_fields(&mut payload, &mut form).await {
        form.discard();
        return Err(resp);
    }
    Ok(form)
}

async fn read_fields(payload: &mut Multipart, form: &mut UploadForm) -> Result<(), HttpResponse> {
    loop {
        let field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(()),
            Err(e) => {
                return Err(bad_request(
                    ErrorCode::FileUploadFailed,
                    format!("上传表单格式错误: {e}"),
                ));
            }
        };

        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        if name == FILE_FIELD {
            if form.file.is_some() {
                return Err(bad_request(
                    ErrorCode::MultifileUploadNotAllowed,
                    "每次只能上传一个文件",
                ));
            }
            form.file = Some(store_file(field, file_name.unwrap_or_default()).await?);
        } else if !name.is_empty() {
            let value = read_text(field).await?;
            form.fields.insert(name, value);
        }
    }
}

async fn read_text(mut field: Field) -> Result<String, HttpResponse> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| {
            bad_request(ErrorCode::BadRequest, format!("读取表单字段失败: {e}"))
        })?;
        if buf.len() + data.len() > MAX_TEXT_FIELD {
            return Err(bad_request(
                ErrorCode::ValidationFailed,
                "表单字段过大",
            ));
        }
        buf.extend_from_slice(&data);
    }
    String::from_utf8(buf)
        .map_err(|_| bad_request(ErrorCode::ValidationFailed, "表单字段必须为 UTF-8 文本"))
}

async fn store_file(mut field: Field, original_name: String) -> Result<StoredFile, HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;

    // 提取扩展名并校验白名单
    let extension = extension_of(&original_name);
    if extension.is_empty()
        || !config
            .upload
            .allowed_types
            .iter()
            .any(|t| t.to_lowercase() == extension)
    {
        return Err(bad_request(
            ErrorCode::FileTypeNotAllowed,
            "不支持的文件类型",
        ));
    }

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        return Err(upload_failed(e));
    }

    let stored_name = format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4());
    let stored_path = config.upload_path(&stored_name);
    let mut f = File::create(&stored_path).map_err(upload_failed)?;

    let mut total_size: usize = 0;
    let mut first_chunk = true;
    while let Some(chunk) = field.next().await {
        let data = match chunk {
            Ok(data) => data,
            Err(e) => {
                remove_stored_file(&stored_path);
                return Err(bad_request(
                    ErrorCode::FileUploadFailed,
                    format!("读取上传文件失败: {e}"),
                ));
            }
        };

        // 第一个 chunk 时验证魔术字节
        if first_chunk {
            first_chunk = false;
            if !validate_magic_bytes(&data, &extension) {
                remove_stored_file(&stored_path);
                return Err(bad_request(
                    ErrorCode::FileTypeNotAllowed,
                    "文件内容与扩展名不符",
                ));
            }
        }

        total_size += data.len();
        if total_size > config.upload.max_size {
            remove_stored_file(&stored_path);
            return Err(bad_request(
                ErrorCode::FileSizeExceeded,
                "文件大小超出限制",
            ));
        }
        if let Err(e) = f.write_all(&data) {
            remove_stored_file(&stored_path);
            return Err(upload_failed(e));
        }
    }

    if total_size == 0 {
        remove_stored_file(&stored_path);
        return Err(bad_request(ErrorCode::FileUploadFailed, "上传的文件为空"));
    }

    Ok(StoredFile {
        original_name,
        stored_path,
        size: total_size as i64,
        mime_type: mime_for_extension(&extension).to_string(),
    })
}

/// 删除磁盘上的文件，文件已不存在时忽略
pub fn remove_stored_file(path: &str) {
    if let Err(e) = fs::remove_file(path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!("Failed to remove stored file {}: {}", path, e);
    }
}

fn attachment_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .filter(|c| !matches!(c, '"' | '\\' | '\r' | '\n'))
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

/// 以附件形式返回磁盘文件，使用数据库中的原始文件名
pub fn file_download(stored_path: &str, file_name: &str) -> HttpResponse {
    let buf = match fs::read(stored_path) {
        Ok(buf) => buf,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Stored file missing on disk: {}", stored_path);
            return HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "文件不存在",
            ));
        }
        Err(e) => {
            tracing::error!("{}", LmsError::file_operation(format!("{e}")));
            return HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "文件读取失败",
            ));
        }
    };

    HttpResponse::Ok()
        .insert_header((
            header::CONTENT_TYPE,
            mime_for_extension(&extension_of(file_name)),
        ))
        .insert_header((header::CONTENT_DISPOSITION, attachment_disposition(file_name)))
        .body(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;
    use actix_web::http::StatusCode;

    #[test]
    fn test_text_fields_are_trimmed() {
        let mut form = UploadForm::default();
        form.fields.insert("title".into(), "  Week 1 notes ".into());
        form.fields.insert("description".into(), "   ".into());
        assert_eq!(form.text("title").as_deref(), Some("Week 1 notes"));
        assert_eq!(form.text("description"), None);
        assert_eq!(form.text("subject"), None);
    }

    #[test]
    fn test_disposition_strips_quotes() {
        assert_eq!(
            attachment_disposition("report \"final\".pdf"),
            "attachment; filename=\"report final.pdf\""
        );
    }

    #[test]
    fn test_download_reads_file_with_original_name() {
        let path = std::env::temp_dir().join(format!("{}.bin", Uuid::new_v4()));
        let path = path.to_string_lossy().to_string();
        fs::write(&path, b"%PDF-1.7 body").unwrap();

        let resp = file_download(&path, "syllabus.pdf");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        let body = resp.into_body().try_into_bytes().unwrap();
        assert_eq!(&body[..], b"%PDF-1.7 body");

        remove_stored_file(&path);
        assert!(!Path::new(&path).exists());
    }

    #[test]
    fn test_download_missing_file_is_not_found() {
        let resp = file_download("/nonexistent/lms/file.bin", "a.pdf");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
