use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

/// 处理登出
/// 清除缓存的会话账号，并通过空的 refresh_token cookie 清除客户端登录状态
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let Some(user) = RequireJWT::extract_user(request) {
        RequireJWT::evict_account(request, user.role, user.id).await;
        tracing::info!("{} {} logged out", user.role, user.id);
    }

    // max_age=0 会让浏览器删除该 cookie
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("已退出登录")))
}
