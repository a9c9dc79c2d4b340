//! JWT 클레임 구조체
//!
//! 세션 쿠키 안에 저장하는 클레임과 Bearer 토큰에서 읽는 클레임을 정의합니다.
use serde::{Deserialize, Serialize};

use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::auth::scheme::AuthScheme;

/// 세션 쿠키에 서명되어 저장되는 클레임
///
/// ## 클레임 구성
///
/// - `sub`: 사용자 ID
/// - `name`: 표시 이름
/// - `email`: 이메일 (선택사항)
/// - `roles`: 역할 목록
/// - `iat` / `exp`: 발급/만료 시간 (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn into_user(self) -> AuthenticatedUser {
        AuthenticatedUser {
            subject: self.sub,
            name: self.name,
            email: self.email,
            roles: self.roles,
            scheme: AuthScheme::Cookies,
        }
    }
}

/// Bearer 토큰에서 읽는 클레임
///
/// `aud`, `iss`, `exp`는 `jsonwebtoken` 검증 단계에서 확인되므로 여기서는 읽지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BearerClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: i64,
}

impl BearerClaims {
    /// 표시 이름은 `name`, `preferred_username`, `sub` 순서로 선택합니다.
    pub fn into_user(self) -> AuthenticatedUser {
        let name = self
            .name
            .or(self.preferred_username)
            .unwrap_or_else(|| self.sub.clone());

        AuthenticatedUser {
            subject: self.sub,
            name,
            email: self.email,
            roles: self.roles,
            scheme: AuthScheme::Bearer,
        }
    }
}

/// OpenID Connect 콜백으로 받은 id_token의 클레임
///
/// `nonce`는 챌린지 시 발급한 값과 같아야 합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    pub exp: i64,
}

impl IdTokenClaims {
    pub fn into_user(self) -> AuthenticatedUser {
        let name = self
            .name
            .or(self.preferred_username)
            .unwrap_or_else(|| self.sub.clone());

        AuthenticatedUser {
            subject: self.sub,
            name,
            email: self.email,
            roles: self.roles,
            scheme: AuthScheme::OpenIdConnect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_display_name_fallback() {
        let claims: BearerClaims = serde_json::from_value(serde_json::json!({
            "sub": "svc-42",
            "preferred_username": "svc@contoso.com",
            "exp": 0
        }))
        .unwrap();

        let user = claims.into_user();
        assert_eq!(user.name, "svc@contoso.com");
        assert_eq!(user.scheme, AuthScheme::Bearer);
        assert!(user.roles.is_empty());

        let claims: BearerClaims =
            serde_json::from_value(serde_json::json!({ "sub": "svc-43", "exp": 0 })).unwrap();
        assert_eq!(claims.into_user().name, "svc-43");
    }
}
