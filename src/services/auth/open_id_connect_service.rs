//! # Azure AD (OpenID Connect) 프로바이더 연동
//!
//! 기본 챌린지 스킴입니다. 로그인 페이지(`/Account/SignIn`)는 이 핸들러가 만든
//! 인가 URL로 사용자를 보내고, 로그아웃 시에는 프로바이더의 end-session URL로 보냅니다.
//!
//! ```text
//! Browser ── GET /Account/SignIn?ReturnUrl=/Home ──► App   (nonce 쿠키 발급)
//!         ◄── 302 {Instance}{Tenant}/oauth2/v2.0/authorize?... ──
//! Browser ── 로그인 ──► Azure AD
//! Browser ── POST {CallbackPath} id_token, state ──► App   (id_token + nonce 검증)
//!         ◄── 302 {state} + 세션 쿠키 ──
//! ```
//!
//! id_token은 Azure AD discovery 문서의 JWKS로 검증하며 `aud`는 `ClientId`여야 합니다.

use actix_web::cookie::{time, Cookie, SameSite};
use jsonwebtoken::{decode, Validation};

use crate::config::AzureAdOptions;
use crate::domain::{AuthenticatedUser, IdTokenClaims};
use crate::errors::{AppError, AppResult};
use crate::services::auth::signing_keys::{discover, validation_error, SigningKeys};

/// 챌린지와 콜백 사이에 nonce를 보관하는 쿠키
pub const NONCE_COOKIE_NAME: &str = ".auth.oidc.nonce";

/// 로그인 완료까지 허용하는 시간(분)
const NONCE_LIFETIME_MINUTES: i64 = 15;

/// 멀티 테넌트 discovery 문서의 issuer 자리표시자
const TENANT_PLACEHOLDER: &str = "{tenantid}";

/// OpenID Connect 챌린지, 콜백 검증, 로그아웃 URL
pub struct OpenIdConnectHandler {
    options: AzureAdOptions,
    /// `None`이면 issuer를 검증하지 않습니다 (`common`/`organizations` 테넌트)
    issuer: Option<String>,
    keys: SigningKeys,
}

impl OpenIdConnectHandler {
    pub fn new(options: AzureAdOptions, issuer: Option<String>, keys: SigningKeys) -> Self {
        Self {
            options,
            issuer,
            keys,
        }
    }

    /// authority의 discovery 문서에서 issuer와 JWKS를 가져와 핸들러를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExternalServiceError` - discovery/JWKS 요청 실패
    pub async fn from_options(options: &AzureAdOptions) -> AppResult<Self> {
        let (issuer, keys) = discover(&options.discovery_url()).await?;

        let issuer = if issuer.contains(TENANT_PLACEHOLDER) {
            log::warn!("멀티 테넌트 authority: id_token issuer를 검증하지 않습니다");
            None
        } else {
            Some(issuer)
        };

        Ok(Self::new(options.clone(), issuer, keys))
    }

    pub fn options(&self) -> &AzureAdOptions {
        &self.options
    }

    /// `{Instance}{TenantId}/oauth2/v2.0`
    fn endpoint_base(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0",
            self.options.instance.trim_end_matches('/'),
            self.options.tenant_id
        )
    }

    /// 로그인 챌린지용 인가 URL을 만듭니다.
    ///
    /// # Arguments
    ///
    /// * `origin` - 애플리케이션 origin (`https://host`), 콜백 URL 구성에 사용
    /// * `return_url` - 로그인 후 돌아갈 로컬 경로 (`state`로 전달)
    /// * `nonce` - id_token 재사용 방지 값
    pub fn authorize_url(&self, origin: &str, return_url: &str, nonce: &str) -> String {
        let redirect_uri = format!("{}{}", origin.trim_end_matches('/'), self.options.callback_path);

        let params = [
            ("client_id", self.options.client_id.as_str()),
            ("response_type", "id_token"),
            ("response_mode", "form_post"),
            ("redirect_uri", redirect_uri.as_str()),
            ("scope", "openid profile"),
            ("state", return_url),
            ("nonce", nonce),
        ];

        format!("{}/authorize?{}", self.endpoint_base(), query_string(&params))
    }

    /// 프로바이더 로그아웃 URL을 만듭니다.
    pub fn end_session_url(&self, post_logout_redirect_uri: &str) -> String {
        let params = [("post_logout_redirect_uri", post_logout_redirect_uri)];

        format!("{}/logout?{}", self.endpoint_base(), query_string(&params))
    }

    /// 챌린지 시 발급하는 nonce 쿠키
    ///
    /// 프로바이더의 cross-site `form_post`에도 전송되어야 하므로 `SameSite=None; Secure`입니다.
    pub fn nonce_cookie(&self, nonce: &str) -> Cookie<'static> {
        Cookie::build(NONCE_COOKIE_NAME, nonce.to_string())
            .path(self.options.callback_path.clone())
            .http_only(true)
            .same_site(SameSite::None)
            .secure(true)
            .max_age(time::Duration::minutes(NONCE_LIFETIME_MINUTES))
            .finish()
    }

    /// 콜백 처리 후 nonce 쿠키를 지우는 만료 쿠키
    pub fn nonce_removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(NONCE_COOKIE_NAME, "")
            .path(self.options.callback_path.clone())
            .http_only(true)
            .same_site(SameSite::None)
            .secure(true)
            .finish();
        cookie.make_removal();
        cookie
    }

    /// 콜백으로 받은 id_token을 검증하고 사용자 아이덴티티를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 서명, `aud`(ClientId), issuer, 만료,
    ///   nonce 중 하나라도 맞지 않는 경우
    pub fn validate_id_token(&self, id_token: &str, expected_nonce: &str) -> AppResult<AuthenticatedUser> {
        let (decoding_key, algorithm) = self.keys.select(id_token)?;

        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[&self.options.client_id]);
        match &self.issuer {
            Some(issuer) => {
                validation.set_issuer(&[issuer]);
                validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);
            }
            None => validation.set_required_spec_claims(&["exp", "aud", "sub"]),
        }

        let claims = decode::<IdTokenClaims>(id_token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(validation_error)?;

        if claims.nonce.as_deref() != Some(expected_nonce) {
            return Err(AppError::AuthenticationError(
                "id_token nonce가 일치하지 않습니다".to_string(),
            ));
        }

        Ok(claims.into_user())
    }
}

fn query_string(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
