//! JWT Bearer 토큰 인증 핸들러
//!
//! `Authorization: Bearer <token>` 헤더의 토큰을 `jsonwebtoken`으로 검증합니다.
//!
//! ## 서명 키
//!
//! | 설정 | 키 | 발급자(`iss`) |
//! |------|----|---------------|
//! | `JwtBearer.SigningKey` 있음 | HS256 공유 비밀키 | `JwtBearer.Authority` |
//! | 없음 | discovery 문서의 `jwks_uri` (kid로 선택) | discovery 문서의 `issuer` |
//!
//! JWKS는 서버 시작 전에 한 번 가져옵니다.

use actix_web::http::header;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::config::JwtBearerOptions;
use crate::domain::{AuthScheme, BearerClaims};
use crate::errors::{AppError, AppResult};
use crate::services::auth::handler::{AuthenticateResult, AuthenticationHandler};
use crate::services::auth::signing_keys::{discover, validation_error, SigningKeys};

/// Bearer 토큰 검증 핸들러
pub struct JwtBearerHandler {
    audience: String,
    issuer: String,
    keys: SigningKeys,
}

impl JwtBearerHandler {
    /// 검증 키를 직접 지정해 핸들러를 만듭니다.
    pub fn new(audience: impl Into<String>, issuer: impl Into<String>, keys: SigningKeys) -> Self {
        Self {
            audience: audience.into(),
            issuer: issuer.into(),
            keys,
        }
    }

    /// `JwtBearer.SigningKey`가 설정된 경우 공유 비밀키 핸들러를 만듭니다.
    pub fn with_signing_key(options: &JwtBearerOptions) -> Option<Self> {
        options.signing_key.as_ref().map(|secret| {
            Self::new(
                options.audience.clone(),
                options.authority.clone(),
                SigningKeys::Secret(DecodingKey::from_secret(secret.as_bytes())),
            )
        })
    }

    /// 설정에 따라 핸들러를 구성합니다.
    ///
    /// 공유 비밀키가 없으면 authority의 discovery 문서와 JWKS를 가져옵니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExternalServiceError` - discovery/JWKS 요청 실패
    pub async fn from_options(options: &JwtBearerOptions) -> AppResult<Self> {
        if let Some(handler) = Self::with_signing_key(options) {
            log::info!("🔑 Bearer 토큰: 공유 비밀키(HS256) 검증 사용");
            return Ok(handler);
        }

        let (issuer, keys) = discover(&options.discovery_url()).await?;
        Ok(Self::new(options.audience.clone(), issuer, keys))
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 헤더 형식
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        match auth_header.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("Bearer") && !token.trim().is_empty() => {
                Ok(token.trim())
            }
            _ => Err(AppError::AuthenticationError(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            )),
        }
    }

    /// 토큰 서명과 audience, issuer, 만료를 검증하고 클레임을 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 검증 실패
    pub fn verify_token(&self, token: &str) -> AppResult<BearerClaims> {
        let (decoding_key, algorithm) = self.keys.select(token)?;

        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);

        decode::<BearerClaims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(validation_error)
    }
}

impl AuthenticationHandler for JwtBearerHandler {
    fn scheme(&self) -> AuthScheme {
        AuthScheme::Bearer
    }

    fn authenticate(&self, req: &HttpRequest) -> AuthenticateResult {
        let Some(auth_header) = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
        else {
            return AuthenticateResult::NoResult;
        };

        // 다른 스킴(Basic 등)의 Authorization 헤더는 이 핸들러의 대상이 아님
        let token = match self.extract_bearer_token(auth_header) {
            Ok(token) => token,
            Err(_) => return AuthenticateResult::NoResult,
        };

        match self.verify_token(token) {
            Ok(claims) => AuthenticateResult::Success(claims.into_user()),
            Err(err) => AuthenticateResult::Fail(err),
        }
    }
}
