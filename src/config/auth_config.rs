//! # Authentication Configuration Module
//!
//! 인증 스킴별 옵션 그룹을 관리하는 모듈입니다.
//!
//! ## 옵션 그룹
//!
//! | 그룹 | 설정 키 | 용도 |
//! |------|---------|------|
//! | [`AzureAdOptions`] | `AzureAd.*` | OpenID Connect 아이덴티티 프로바이더 |
//! | [`JwtBearerOptions`] | `JwtBearer.Audience`, `JwtBearer.Authority`, `JwtBearer.SigningKey` | Bearer 토큰 검증 |
//! | [`CookieAuthOptions`] | `Cookie.SigningKey`, `Cookie.ExpireMinutes` | 세션 쿠키 |
//!
//! 쿠키의 로그인/로그아웃 경로와 Secure 정책은 설정으로 바꿀 수 없습니다.
//!
//! ## 필수 환경 변수 설정 (프로덕션)
//!
//! ```bash
//! export AZURE_AD_TENANT_ID="00000000-0000-0000-0000-000000000000"
//! export AZURE_AD_CLIENT_ID="11111111-1111-1111-1111-111111111111"
//! export JWT_BEARER_AUDIENCE="api://sample"
//! export JWT_BEARER_AUTHORITY="https://login.microsoftonline.com/00000000-0000-0000-0000-000000000000/v2.0"
//! export COOKIE_SIGNING_KEY="$(openssl rand -base64 32)"
//! ```

use serde::Serialize;
use validator::Validate;

use crate::config::config_source::ConfigSource;
use crate::config::data_config::Environment;
use crate::errors::AppResult;

/// 세션 쿠키 로그인 경로
pub const LOGIN_PATH: &str = "/Account/SignIn";

/// 세션 쿠키 로그아웃 경로
pub const LOGOUT_PATH: &str = "/Account/SignOut";

/// 세션 쿠키 이름
pub const SESSION_COOKIE_NAME: &str = ".auth.session";

const DEV_COOKIE_SIGNING_KEY: &str = "development-cookie-signing-key-not-for-production";

/// Azure AD (OpenID Connect) 프로바이더 설정
///
/// `AzureAd` 섹션에서 바인딩됩니다.
#[derive(Debug, Clone, Validate, Serialize)]
pub struct AzureAdOptions {
    /// 로그인 인스턴스 URL. 기본값: `https://login.microsoftonline.com/`
    #[validate(url)]
    pub instance: String,

    /// 테넌트 도메인 (예: `contoso.onmicrosoft.com`)
    pub domain: Option<String>,

    /// 테넌트 ID 또는 `common`/`organizations`
    #[validate(length(min = 1))]
    pub tenant_id: String,

    /// 애플리케이션(클라이언트) ID
    #[validate(length(min = 1))]
    pub client_id: String,

    /// 프로바이더가 id_token을 보낼 로컬 경로. 기본값: `/signin-oidc`
    #[validate(length(min = 1))]
    pub callback_path: String,
}

impl AzureAdOptions {
    pub fn from_source(source: &ConfigSource, environment: &Environment) -> AppResult<Self> {
        let section = source.section("AzureAd");

        let (tenant_id, client_id) = if environment.allows_insecure_defaults() {
            (
                section.get_or("TenantId", "common"),
                section.get_or("ClientId", "development-client-id"),
            )
        } else {
            (section.require("TenantId")?, section.require("ClientId")?)
        };

        Ok(Self {
            instance: section.get_or("Instance", "https://login.microsoftonline.com/"),
            domain: section.get("Domain").map(str::to_string),
            tenant_id,
            client_id,
            callback_path: section.get_or("CallbackPath", "/signin-oidc"),
        })
    }

    /// `{Instance}{TenantId}/v2.0` 형식의 authority
    pub fn authority(&self) -> String {
        format!("{}/{}/v2.0", self.instance.trim_end_matches('/'), self.tenant_id)
    }

    /// id_token 검증 키를 찾는 OpenID discovery 문서 URL
    pub fn discovery_url(&self) -> String {
        format!("{}/.well-known/openid-configuration", self.authority())
    }
}

/// JWT Bearer 토큰 검증 설정
///
/// `SigningKey`가 있으면 HS256 공유 비밀키로 검증하고,
/// 없으면 `Authority`의 OpenID discovery 문서에서 JWKS를 가져옵니다.
#[derive(Debug, Clone, Validate)]
pub struct JwtBearerOptions {
    /// 토큰의 `aud` 클레임 기대값
    #[validate(length(min = 1))]
    pub audience: String,

    /// 토큰 발급자 (`iss`) 및 discovery 기준 URL
    #[validate(url)]
    pub authority: String,

    /// HS256 공유 비밀키 (선택)
    pub signing_key: Option<String>,
}

impl JwtBearerOptions {
    pub fn from_source(source: &ConfigSource) -> AppResult<Self> {
        let section = source.section("JwtBearer");

        Ok(Self {
            audience: section.require("Audience")?,
            authority: section.require("Authority")?,
            signing_key: section.get("SigningKey").map(str::to_string),
        })
    }

    /// OpenID discovery 문서 URL
    pub fn discovery_url(&self) -> String {
        format!(
            "{}/.well-known/openid-configuration",
            self.authority.trim_end_matches('/')
        )
    }
}

/// 쿠키 Secure 속성 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CookieSecurePolicy {
    /// 요청이 HTTPS일 때만 Secure
    SameAsRequest,
    /// 항상 Secure
    Always,
    /// Secure 속성을 붙이지 않음
    None,
}

impl CookieSecurePolicy {
    /// 요청 스킴에 따른 Secure 속성 값
    pub fn is_secure(&self, request_is_https: bool) -> bool {
        match self {
            CookieSecurePolicy::SameAsRequest => request_is_https,
            CookieSecurePolicy::Always => true,
            CookieSecurePolicy::None => false,
        }
    }
}

/// 세션 쿠키 인증 설정
#[derive(Debug, Clone, Validate)]
pub struct CookieAuthOptions {
    pub cookie_name: String,
    pub login_path: String,
    pub secure_policy: CookieSecurePolicy,

    /// 쿠키 안의 세션 토큰 서명 키
    #[validate(length(min = 32))]
    pub signing_key: String,

    /// 세션 만료 시간(분). 기본값: 14일, 최대 1년
    #[validate(range(min = 1, max = 525600))]
    pub expire_minutes: i64,
}

impl CookieAuthOptions {
    /// 쿠키 설정을 구성합니다.
    ///
    /// 로그인 경로와 Secure 정책은 고정값입니다.
    /// 서명 키는 개발/테스트 환경에서만 기본값을 허용합니다.
    pub fn from_source(source: &ConfigSource, environment: &Environment) -> AppResult<Self> {
        let section = source.section("Cookie");

        let signing_key = match section.get("SigningKey") {
            Some(key) => key.to_string(),
            None if environment.allows_insecure_defaults() => {
                log::warn!("COOKIE_SIGNING_KEY not set, using default (not secure for production!)");
                DEV_COOKIE_SIGNING_KEY.to_string()
            }
            None => section.require("SigningKey")?,
        };

        Ok(Self {
            cookie_name: SESSION_COOKIE_NAME.to_string(),
            login_path: LOGIN_PATH.to_string(),
            secure_policy: CookieSecurePolicy::Always,
            signing_key,
            expire_minutes: section.parse_or("ExpireMinutes", 14 * 24 * 60)?,
        })
    }
}
