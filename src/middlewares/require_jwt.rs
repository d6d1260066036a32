/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <access token>`，按令牌中的角色到对应账号表
 * 查出账号，确认账号仍为启用状态后写入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/quizzes")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_quizzes))
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_user(&req)` 取得 [`AuthUser`]。
 *
 * 已解析的账号按 `account:{role}:{id}` 缓存，账号被修改、删除、
 * 改密或注销时由业务层调用 [`RequireJWT::evict_account`] 失效。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{AccountStatus, AuthUser, UserRole};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

pub(crate) fn account_cache_key(role: UserRole, id: i64) -> String {
    format!("account:{role}:{id}")
}

async fn resolve_user(req: &ServiceRequest) -> Result<AuthUser, String> {
    let token = JwtUtils::extract_bearer_token(req.request())
        .ok_or_else(|| "缺少或无效的 Authorization 请求头".to_string())?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "令牌无效".to_string()
    })?;

    let (id, role) = claims
        .principal()
        .ok_or_else(|| "令牌主体无效".to_string())?;
    let key = account_cache_key(role, id);

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());

    if let Some(cache) = &cache
        && let CacheResult::Found(json) = cache.get_raw(&key).await
    {
        match serde_json::from_str::<AuthUser>(&json) {
            Ok(user) => return Ok(user),
            Err(_) => cache.remove(&key).await,
        }
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| "存储服务不可用".to_string())?;

    let account = storage
        .get_account_by_id(role, id)
        .await
        .map_err(|_| "查询账号失败".to_string())?
        .ok_or_else(|| "账号不存在".to_string())?;

    if account.user.status != AccountStatus::Active {
        return Err("账号已停用".to_string());
    }

    if let Some(cache) = &cache
        && let Ok(json) = serde_json::to_string(&account.user)
    {
        cache
            .insert_raw(key, json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(account.user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match resolve_user(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for {} {}", user.role, user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("未授权: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前请求的已认证账号
    pub fn extract_user(req: &HttpRequest) -> Option<AuthUser> {
        req.extensions().get::<AuthUser>().cloned()
    }

    /// 使缓存的账号失效
    pub async fn evict_account(req: &HttpRequest, role: UserRole, id: i64) {
        if let Some(cache) = req.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
            cache.remove(&account_cache_key(role, id)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_separates_roles() {
        assert_eq!(account_cache_key(UserRole::Student, 4), "account:student:4");
        assert_ne!(
            account_cache_key(UserRole::Student, 4),
            account_cache_key(UserRole::Teacher, 4)
        );
    }
}
