//! 세션 쿠키 인증 핸들러
//!
//! 로그인된 사용자의 세션을 HttpOnly 쿠키에 저장하고 요청마다 검증합니다.
//! 쿠키 값은 `Cookie.SigningKey`로 서명된 HS256 JWT(`SessionClaims`)입니다.
//!
//! ## 쿠키 속성
//!
//! - 이름: `.auth.session`
//! - `Path=/`, `HttpOnly`, `SameSite=Lax`
//! - `Secure`: `CookieSecurePolicy::Always`
//! - 만료: `Cookie.ExpireMinutes` (기본 14일)

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::HttpRequest;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::CookieAuthOptions;
use crate::domain::{AuthScheme, AuthenticatedUser, SessionClaims};
use crate::errors::{AppError, AppResult};
use crate::services::auth::handler::{AuthenticateResult, AuthenticationHandler};

/// 세션 쿠키 발급/검증 핸들러
pub struct CookieAuthenticationHandler {
    options: CookieAuthOptions,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl CookieAuthenticationHandler {
    pub fn new(options: CookieAuthOptions) -> Self {
        let encoding_key = EncodingKey::from_secret(options.signing_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(options.signing_key.as_bytes());

        Self {
            options,
            encoding_key,
            decoding_key,
        }
    }

    pub fn options(&self) -> &CookieAuthOptions {
        &self.options
    }

    /// 사용자 정보를 서명된 세션 토큰으로 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패
    pub fn issue_session_token(&self, user: &AuthenticatedUser) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.options.expire_minutes);

        let claims = SessionClaims {
            sub: user.subject.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("세션 토큰 생성 실패: {}", e)))
    }

    /// 세션 토큰을 검증하고 클레임을 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료, 서명 불일치, 형식 오류
    pub fn verify_session_token(&self, token: &str) -> AppResult<SessionClaims> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("세션이 만료되었습니다".to_string())
                }
                _ => AppError::AuthenticationError(format!("유효하지 않은 세션 쿠키입니다: {}", e)),
            })
    }

    /// 로그인 세션 쿠키를 만듭니다.
    ///
    /// `request_is_https`는 `CookieSecurePolicy::SameAsRequest`일 때만 사용됩니다.
    pub fn sign_in(&self, user: &AuthenticatedUser, request_is_https: bool) -> AppResult<Cookie<'static>> {
        let token = self.issue_session_token(user)?;

        Ok(Cookie::build(self.options.cookie_name.clone(), token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.options.secure_policy.is_secure(request_is_https))
            .max_age(time::Duration::minutes(self.options.expire_minutes))
            .finish())
    }

    /// 세션 쿠키를 제거하는 만료 쿠키를 만듭니다.
    ///
    /// Secure 속성은 `sign_in`과 같은 규칙을 따릅니다.
    pub fn sign_out(&self, request_is_https: bool) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.options.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.options.secure_policy.is_secure(request_is_https))
            .finish();
        cookie.make_removal();
        cookie
    }
}

impl AuthenticationHandler for CookieAuthenticationHandler {
    fn scheme(&self) -> AuthScheme {
        AuthScheme::Cookies
    }

    fn authenticate(&self, req: &HttpRequest) -> AuthenticateResult {
        let Some(cookie) = req.cookie(&self.options.cookie_name) else {
            return AuthenticateResult::NoResult;
        };

        if cookie.value().is_empty() {
            return AuthenticateResult::NoResult;
        }

        match self.verify_session_token(cookie.value()) {
            Ok(claims) => AuthenticateResult::Success(claims.into_user()),
            Err(err) => AuthenticateResult::Fail(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSource, CookieSecurePolicy, Environment};
    use actix_web::test::TestRequest;

    fn handler() -> CookieAuthenticationHandler {
        let options =
            CookieAuthOptions::from_source(&ConfigSource::default(), &Environment::Test).unwrap();
        CookieAuthenticationHandler::new(options)
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            subject: "user-7".to_string(),
            name: "Bob".to_string(),
            email: Some("bob@contoso.com".to_string()),
            roles: vec!["reader".to_string()],
            scheme: AuthScheme::OpenIdConnect,
        }
    }

    #[test]
    fn test_sign_in_cookie_attributes() {
        let cookie = handler().sign_in(&user(), false).unwrap();

        assert_eq!(cookie.name(), ".auth.session");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_authenticate_valid_cookie() {
        let handler = handler();
        let cookie = handler.sign_in(&user(), true).unwrap();
        let req = TestRequest::default().cookie(cookie).to_http_request();

        match handler.authenticate(&req) {
            AuthenticateResult::Success(identity) => {
                assert_eq!(identity.subject, "user-7");
                assert_eq!(identity.email.as_deref(), Some("bob@contoso.com"));
                assert_eq!(identity.scheme, AuthScheme::Cookies);
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_authenticate_without_cookie() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(handler().authenticate(&req), AuthenticateResult::NoResult));
    }

    #[test]
    fn test_authenticate_tampered_cookie() {
        let handler = handler();
        let token = handler.issue_session_token(&user()).unwrap();
        let tampered = format!("{}x", token);
        let req = TestRequest::default()
            .cookie(Cookie::new(".auth.session", tampered))
            .to_http_request();

        assert!(matches!(
            handler.authenticate(&req),
            AuthenticateResult::Fail(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_cookie_signed_with_other_key_fails() {
        let other = CookieAuthenticationHandler::new(CookieAuthOptions {
            signing_key: "another-signing-key-that-is-long-enough".to_string(),
            ..handler().options().clone()
        });
        let token = other.issue_session_token(&user()).unwrap();

        assert!(handler().verify_session_token(&token).is_err());
    }

    #[test]
    fn test_sign_out_cookie_is_removal() {
        let cookie = handler().sign_out(true);

        assert_eq!(cookie.name(), ".auth.session");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }

    #[test]
    fn test_sign_out_follows_request_scheme() {
        let handler = CookieAuthenticationHandler::new(CookieAuthOptions {
            secure_policy: CookieSecurePolicy::SameAsRequest,
            ..handler().options().clone()
        });

        assert_eq!(handler.sign_out(false).secure(), Some(false));
        assert_eq!(handler.sign_out(true).secure(), Some(true));
        assert_eq!(
            handler.sign_out(false).secure(),
            handler.sign_in(&user(), false).unwrap().secure()
        );
    }
}
