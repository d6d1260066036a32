use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const REFRESH_COOKIE: &str = "refresh_token";
const ACCESS: &str = "access";
const REFRESH: &str = "refresh";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // 账号 ID（在对应角色的账号表中）
    pub role: String,       // admin / teacher / student
    pub token_type: String, // "access" 或 "refresh"
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    /// 解析出 (账号 ID, 角色)，任一字段非法都视为无效令牌
    pub fn principal(&self) -> Option<(i64, UserRole)> {
        let id = self.sub.parse::<i64>().ok().filter(|id| *id > 0)?;
        let role = self.role.parse::<UserRole>().ok()?;
        Some((id, role))
    }
}

// Token 响应结构体
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token_with_expiry(
            user_id,
            role,
            ACCESS,
            chrono::TimeDelta::minutes(config.jwt.access_token_expiry),
            &Self::secret(),
        )
    }

    pub fn generate_refresh_token(
        user_id: i64,
        role: &str,
        token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        let expiry = token_expiry
            .unwrap_or_else(|| chrono::TimeDelta::days(config.jwt.refresh_token_expiry));
        Self::generate_token_with_expiry(user_id, role, REFRESH, expiry, &Self::secret())
    }

    fn generate_token_with_expiry(
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::TimeDelta,
        secret: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: (now + expiry_duration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::generate_refresh_token(user_id, role, refresh_token_expiry)?,
        })
    }

    fn verify_with_secret(
        token: &str,
        expected_type: &str,
        secret: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_with_secret(token, ACCESS, &Self::secret())
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_with_secret(token, REFRESH, &Self::secret())
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(
        refresh_token: &str,
        max_age_days: i64,
    ) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::days(max_age_days))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 创建空的 Refresh Token Cookie（用于注销）
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }

    /// 从 Authorization 头提取 Bearer token
    pub fn extract_bearer_token(req: &actix_web::HttpRequest) -> Option<String> {
        req.headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_token_type_is_enforced() {
        let refresh = JwtUtils::generate_token_with_expiry(
            5,
            "teacher",
            REFRESH,
            chrono::TimeDelta::minutes(5),
            SECRET,
        )
        .unwrap();

        let claims = JwtUtils::verify_with_secret(&refresh, REFRESH, SECRET).unwrap();
        assert_eq!(claims.principal(), Some((5, UserRole::Teacher)));
        assert!(JwtUtils::verify_with_secret(&refresh, ACCESS, SECRET).is_err());
    }

    #[test]
    fn test_wrong_secret_and_expired_tokens_fail() {
        let token = JwtUtils::generate_token_with_expiry(
            1,
            "student",
            ACCESS,
            chrono::TimeDelta::minutes(5),
            SECRET,
        )
        .unwrap();
        assert!(JwtUtils::verify_with_secret(&token, ACCESS, "other-secret").is_err());

        let expired = JwtUtils::generate_token_with_expiry(
            1,
            "student",
            ACCESS,
            chrono::TimeDelta::minutes(-10),
            SECRET,
        )
        .unwrap();
        assert!(JwtUtils::verify_with_secret(&expired, ACCESS, SECRET).is_err());
    }

    #[test]
    fn test_principal_rejects_unknown_role() {
        let claims = Claims {
            sub: "3".to_string(),
            role: "user".to_string(),
            token_type: ACCESS.to_string(),
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.principal(), None);
    }
}
