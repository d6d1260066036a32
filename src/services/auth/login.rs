use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::entities::{AccountStatus, UserRole};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::services::{normalize_email, storage_error};
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

fn auth_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "邮箱或密码错误",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();
    let email = normalize_email(&login_request.email);

    // 1. 按登录身份查找账号
    let account = match storage
        .get_account_by_email(login_request.role, &email)
        .await
    {
        Ok(Some(account)) => account,
        Ok(None) => return Ok(auth_failed()),
        Err(e) => return Ok(storage_error("登录失败", e)),
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &account.password_hash) {
        tracing::warn!("Failed login attempt for {} {}", login_request.role, email);
        return Ok(auth_failed());
    }

    // 3. 停用账号不允许登录
    if account.user.status != AccountStatus::Active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountInactive,
            "账号已停用，请联系管理员",
        )));
    }

    // 4. 管理员记录最后登录时间
    if account.user.role == UserRole::Admin
        && let Err(e) = storage.update_admin_last_login(account.user.id).await
    {
        tracing::warn!("Failed to update last login for admin {}: {}", account.user.id, e);
    }

    // 5. 生成令牌对
    let refresh_days = if login_request.remember_me {
        config.jwt.refresh_token_remember_me_expiry
    } else {
        config.jwt.refresh_token_expiry
    };
    let token_pair = match account
        .user
        .generate_token_pair(Some(chrono::TimeDelta::days(refresh_days)))
    {
        Ok(token_pair) => token_pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "登录失败，无法生成令牌",
                )),
            );
        }
    };

    tracing::info!(
        "{} {} logged in successfully",
        account.user.role,
        account.user.email
    );

    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
        user: account.user,
        created_at: chrono::Utc::now(),
    };

    // 6. refresh token 写入 HTTP-only cookie
    let refresh_cookie =
        jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_days);

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "登录成功")))
}
