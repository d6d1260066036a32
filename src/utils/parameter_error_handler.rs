//! JSON 请求体与查询参数的解析错误处理
//!
//! 将 actix 默认的纯文本错误改写为统一的 ApiResponse 包装。

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid JSON body for {}: {}", req.path(), err);

    let (code, message) = match &err {
        JsonPayloadError::ContentType => (
            ErrorCode::BadRequest,
            "Content-Type 必须为 application/json".to_string(),
        ),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            (ErrorCode::BadRequest, "请求体过大".to_string())
        }
        JsonPayloadError::Deserialize(e) => {
            (ErrorCode::ValidationFailed, format!("请求体错误: {e}"))
        }
        _ => (ErrorCode::BadRequest, format!("JSON 格式错误: {err}")),
    };

    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message));
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid query string for {}: {}", req.path(), err);

    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        format!("查询参数错误: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
