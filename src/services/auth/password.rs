use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::ChangePasswordRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, hash_or_error, storage_error};
use crate::utils::password::verify_password;
use crate::utils::validate::validate_password_simple;

use super::AuthService;

pub async fn handle_change_password(
    service: &AuthService,
    password_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let account = match storage.get_account_by_id(user.role, user.id).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "账号不存在",
            )));
        }
        Err(e) => return Ok(storage_error("修改密码失败", e)),
    };

    if !verify_password(&password_request.current_password, &account.password_hash) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "当前密码错误",
        )));
    }
    if let Err(msg) = validate_password_simple(&password_request.new_password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PasswordTooWeak, msg)));
    }

    let password_hash = match hash_or_error(&password_request.new_password) {
        Ok(hash) => hash,
        Err(resp) => return Ok(resp),
    };

    match storage
        .update_account_password(user.role, user.id, &password_hash)
        .await
    {
        Ok(true) => {
            RequireJWT::evict_account(request, user.role, user.id).await;
            tracing::info!("{} {} changed password", user.role, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "密码修改成功",
            )))
        }
        Ok(false) => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "账号不存在",
        ))),
        Err(e) => Ok(storage_error("修改密码失败", e)),
    }
}
