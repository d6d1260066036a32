use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::responses::{
    RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse,
};
use crate::models::users::entities::AccountStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, storage_error};
use crate::utils::jwt;

use super::AuthService;

fn login_expired() -> HttpResponse {
    // 清除无效的 refresh token cookie
    let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();
    HttpResponse::Unauthorized()
        .cookie(empty_cookie)
        .json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "登录已过期或无效，请重新登录",
        ))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 从 cookie 中提取 refresh token
    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "未登录，请先登录",
        )));
    };

    let principal = match jwt::JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims.principal(),
        Err(e) => {
            tracing::warn!("Refresh token rejected: {}", e);
            None
        }
    };
    let Some((user_id, role)) = principal else {
        return Ok(login_expired());
    };

    // 账号被删除或停用后不再续签
    let storage = service.get_storage(request);
    match storage.get_account_by_id(role, user_id).await {
        Ok(Some(account)) if account.user.status == AccountStatus::Active => {}
        Ok(_) => return Ok(login_expired()),
        Err(e) => return Ok(storage_error("刷新令牌失败", e)),
    }

    match jwt::JwtUtils::generate_access_token(user_id, &role.to_string()) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            },
            "令牌刷新成功",
        ))),
        Err(e) => {
            tracing::error!("Failed to generate access token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "无法生成令牌",
                )),
            )
        }
    }
}

pub async fn handle_verify_token(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "令牌有效",
    )))
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match current_user(request) {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "获取用户信息成功",
        ))),
        Err(resp) => Ok(resp),
    }
}
