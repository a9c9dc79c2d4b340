//! 애플리케이션 조립과 HTTP 서버 구동
//!
//! 파이프라인 순서는 고정입니다.
//!
//! ```text
//! Logger ─► exception pages ─► static files (파일이 있을 때만)
//!                                   │ 없으면 통과
//!                                   ▼
//!                             Authentication ─► AuthorizeFilter ─► routes
//! ```

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use actix_files::Files;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::guard::{self, GuardContext};
use actix_web::http::Method;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

use crate::config::AppSettings;
use crate::errors::AppResult;
use crate::middlewares::{exception_pages, Authentication, AuthorizeFilter};
use crate::policy::{AnonymousEndpoints, AuthorizationPolicy};
use crate::routes::{configure_all_routes, dispatch, RouteTemplate, DEFAULT_ROUTE_TEMPLATE};
use crate::services::auth::{
    AuthenticationHandler, CookieAuthenticationHandler, JwtBearerHandler, OpenIdConnectHandler,
};

/// 모든 워커가 공유하는 불변 상태
pub struct AppState {
    pub settings: AppSettings,
    pub cookie: Arc<CookieAuthenticationHandler>,
    pub jwt_bearer: Arc<JwtBearerHandler>,
    pub open_id_connect: OpenIdConnectHandler,
    pub route_template: RouteTemplate,
}

impl AppState {
    /// 설정과 준비된 토큰 핸들러로 상태를 구성합니다.
    ///
    /// Bearer/OpenID Connect 핸들러는 JWKS를 비동기로 가져와야 할 수 있어 호출자가 만듭니다
    /// ([`JwtBearerHandler::from_options`], [`OpenIdConnectHandler::from_options`]).
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 라우트 템플릿 파싱 실패
    pub fn new(
        settings: AppSettings,
        jwt_bearer: JwtBearerHandler,
        open_id_connect: OpenIdConnectHandler,
    ) -> AppResult<Self> {
        Ok(Self {
            cookie: Arc::new(CookieAuthenticationHandler::new(settings.cookie.clone())),
            jwt_bearer: Arc::new(jwt_bearer),
            open_id_connect,
            route_template: RouteTemplate::parse(DEFAULT_ROUTE_TEMPLATE)?,
            settings,
        })
    }

    /// 인증 미들웨어가 실행할 스킴 핸들러 (쿠키가 기본 스킴)
    pub fn authentication_handlers(&self) -> Vec<Arc<dyn AuthenticationHandler>> {
        let cookie: Arc<dyn AuthenticationHandler> = self.cookie.clone();
        let bearer: Arc<dyn AuthenticationHandler> = self.jwt_bearer.clone();
        vec![cookie, bearer]
    }
}

/// 애플리케이션을 조립합니다.
///
/// 서버와 테스트가 같은 파이프라인을 사용합니다.
pub fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let settings = &state.settings;
    let callback_path = state.open_id_connect.options().callback_path.clone();

    let anonymous =
        AnonymousEndpoints::defaults(state.route_template.clone()).allow_path(&callback_path);
    let authorize = AuthorizeFilter::new(
        AuthorizationPolicy::authenticated(),
        anonymous,
        &settings.cookie.login_path,
    );
    let authentication = Authentication::new(state.authentication_handlers());

    App::new()
        .app_data(state.clone())
        .wrap(exception_pages(&settings.environment))
        .wrap(Logger::default())
        .service(static_files(&settings.server.web_root))
        .service(
            // 마지막에 wrap한 미들웨어가 먼저 실행됩니다: Authentication → AuthorizeFilter
            web::scope("")
                .wrap(authorize)
                .wrap(authentication)
                .configure(|cfg| configure_all_routes(cfg, &callback_path))
                .default_service(web::to(dispatch)),
        )
}

/// 요청한 파일이 `web_root` 아래에 있을 때만 응답하는 정적 파일 서비스
fn static_files(web_root: &Path) -> Files {
    let root = web_root.to_path_buf();

    Files::new("/", web_root).guard(guard::fn_guard(move |ctx: &GuardContext| {
        let method = &ctx.head().method;
        (method == Method::GET || method == Method::HEAD)
            && static_file_path(&root, ctx.head().uri.path()).is_some()
    }))
}

/// 요청 경로를 `web_root` 아래의 실제 파일 경로로 바꿉니다.
///
/// 상위 디렉터리(`..`)를 포함하거나 파일이 아니면 `None`입니다.
pub fn static_file_path(web_root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(request_path).ok()?;
    let relative = Path::new(decoded.trim_start_matches('/'));

    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let candidate = web_root.join(relative);
    candidate.is_file().then_some(candidate)
}

/// HTTP 서버를 구성하고 실행합니다
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
pub async fn run(state: AppState) -> std::io::Result<()> {
    let bind_address = state.settings.server.bind_address();
    let workers = state.settings.server.workers;

    log::info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    log::info!("📍 Health check: http://{}/health", bind_address);
    log::info!("📍 실행 환경: {}", state.settings.environment.as_str());

    let state = web::Data::new(state);

    HttpServer::new(move || build_app(state.clone()))
        .bind(bind_address)?
        .workers(workers)
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use crate::domain::{AuthScheme, AuthenticatedUser};
    use crate::services::auth::{SigningKeys, NONCE_COOKIE_NAME};
    use actix_web::cookie::{time, Cookie};
    use actix_web::http::{header, StatusCode};
    use actix_web::test;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, DecodingKey, EncodingKey, Header};
    use serde_json::{json, Value};

    const BEARER_SECRET: &str = "bearer-test-secret-0123456789abcdef";
    const AUDIENCE: &str = "api://sample";
    const AUTHORITY: &str = "https://login.example.com/contoso-tenant/v2.0";
    const ID_TOKEN_SECRET: &str = "id-token-test-secret-0123456789abcdef";

    fn settings_with(extra: &[(&'static str, String)]) -> AppSettings {
        let mut pairs = vec![
            ("Environment", "test".to_string()),
            ("JwtBearer.Audience", AUDIENCE.to_string()),
            ("JwtBearer.Authority", AUTHORITY.to_string()),
            ("JwtBearer.SigningKey", BEARER_SECRET.to_string()),
        ];
        pairs.extend(extra.iter().cloned());
        AppSettings::from_source(&ConfigSource::from_pairs(pairs)).unwrap()
    }

    fn state_with(settings: AppSettings) -> web::Data<AppState> {
        let jwt_bearer = JwtBearerHandler::with_signing_key(&settings.jwt_bearer).unwrap();
        let open_id_connect = OpenIdConnectHandler::new(
            settings.azure_ad.clone(),
            Some(settings.azure_ad.authority()),
            SigningKeys::Secret(DecodingKey::from_secret(ID_TOKEN_SECRET.as_bytes())),
        );
        web::Data::new(AppState::new(settings, jwt_bearer, open_id_connect).unwrap())
    }

    fn state() -> web::Data<AppState> {
        state_with(settings_with(&[]))
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            subject: "user-1".to_string(),
            name: "Alice".to_string(),
            email: Some("alice@contoso.com".to_string()),
            roles: vec![],
            scheme: AuthScheme::OpenIdConnect,
        }
    }

    fn bearer_token(audience: &str, expires_in: Duration) -> String {
        let claims = json!({
            "sub": "svc-1",
            "preferred_username": "svc@contoso.com",
            "aud": audience,
            "iss": AUTHORITY,
            "exp": (Utc::now() + expires_in).timestamp(),
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(BEARER_SECRET.as_bytes()),
        )
        .unwrap()
    }

    /// Azure AD가 발급한 것과 같은 형태의 id_token (테스트 환경 기본 ClientId 대상)
    fn id_token(state: &AppState, nonce: &str) -> String {
        let claims = json!({
            "sub": "aad-user-1",
            "name": "Carol",
            "aud": state.settings.azure_ad.client_id,
            "iss": state.settings.azure_ad.authority(),
            "nonce": nonce,
            "exp": (Utc::now() + Duration::minutes(5)).timestamp(),
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(ID_TOKEN_SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn location(res: &ServiceResponse<impl MessageBody>) -> String {
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[actix_web::test]
    async fn test_anonymous_api_request_gets_401_without_redirect() {
        let app = test::init_service(build_app(state())).await;

        let req = test::TestRequest::get().uri("/api/orders").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().get(header::LOCATION).is_none());
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        let body = test::read_body(res).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_anonymous_page_request_redirects_to_login() {
        let app = test::init_service(build_app(state())).await;

        let req = test::TestRequest::get().uri("/Account/Profile").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            location(&res),
            "/Account/SignIn?ReturnUrl=%2FAccount%2FProfile"
        );
    }

    #[actix_web::test]
    async fn test_api_lookalike_path_redirects() {
        let app = test::init_service(build_app(state())).await;

        for uri in ["/apistuff", "/", "/Home/Index"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::FOUND, "{}", uri);
            assert!(location(&res).starts_with("/Account/SignIn?ReturnUrl="), "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_valid_session_cookie_reaches_home() {
        let state = state();
        let cookie = state.cookie.sign_in(&user(), true).unwrap();
        let app = test::init_service(build_app(state)).await;

        let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
        assert!(body.contains("Welcome, Alice"));
    }

    #[actix_web::test]
    async fn test_tampered_cookie_redirects() {
        let app = test::init_service(build_app(state())).await;

        let req = test::TestRequest::get()
            .uri("/Home/About")
            .cookie(Cookie::new(".auth.session", "not-a-valid-token"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
    }

    #[actix_web::test]
    async fn test_bearer_token_on_api_me() {
        let app = test::init_service(build_app(state())).await;

        let req = test::TestRequest::get()
            .uri("/api/me")
            .insert_header((
                header::AUTHORIZATION,
                format!("Bearer {}", bearer_token(AUDIENCE, Duration::minutes(5))),
            ))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["authenticated"], true);
        assert_eq!(body["name"], "svc@contoso.com");
        assert_eq!(body["identities"][0]["scheme"], "Bearer");
    }

    #[actix_web::test]
    async fn test_invalid_bearer_tokens_get_401() {
        let app = test::init_service(build_app(state())).await;

        let tokens = [
            bearer_token(AUDIENCE, Duration::minutes(-10)),
            bearer_token("api://other", Duration::minutes(5)),
        ];

        for token in tokens {
            let req = test::TestRequest::get()
                .uri("/api/me")
                .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[actix_web::test]
    async fn test_anonymous_endpoints_are_reachable() {
        let app = test::init_service(build_app(state())).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/Account/SignedOut").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = test::call_service(&app, test::TestRequest::get().uri("/Home/Error").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_sign_in_challenges_identity_provider() {
        let app = test::init_service(build_app(state())).await;

        let req = test::TestRequest::get()
            .uri("/Account/SignIn?ReturnUrl=%2FHome%2FAbout")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        let location = location(&res);
        assert!(location.starts_with("https://login.microsoftonline.com/common/oauth2/v2.0/authorize?"));
        assert!(location.contains("client_id=development-client-id"));
        assert!(location.contains("state=%2FHome%2FAbout"));
        assert!(location.contains("nonce="));
    }

    #[actix_web::test]
    async fn test_signed_in_user_returns_to_local_url_only() {
        let state = state();
        let cookie = state.cookie.sign_in(&user(), true).unwrap();
        let app = test::init_service(build_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/Account/SignIn?ReturnUrl=https%3A%2F%2Fevil.example.com")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/");
    }

    #[actix_web::test]
    async fn test_sign_out_clears_session_cookie() {
        let state = state();
        let cookie = state.cookie.sign_in(&user(), true).unwrap();
        let app = test::init_service(build_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/Account/SignOut")
            .cookie(cookie)
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert!(location(&res).contains("/oauth2/v2.0/logout?post_logout_redirect_uri="));

        let removal = res
            .response()
            .cookies()
            .find(|c| c.name() == ".auth.session")
            .unwrap();
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age(), Some(time::Duration::ZERO));
    }

    #[actix_web::test]
    async fn test_unknown_action_and_method() {
        let state = state();
        let cookie = state.cookie.sign_in(&user(), true).unwrap();
        let app = test::init_service(build_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/Home/Missing")
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/Home/Index")
            .cookie(cookie)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[actix_web::test]
    async fn test_static_files_served_before_authentication() {
        let web_root = std::env::temp_dir().join(format!("wwwroot-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(web_root.join("css")).unwrap();
        std::fs::write(web_root.join("css/site.css"), "body { margin: 0; }").unwrap();

        let settings = settings_with(&[("WebRoot", web_root.display().to_string())]);
        let app = test::init_service(build_app(state_with(settings))).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/css/site.css").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        // 없는 파일은 인증 파이프라인으로 넘어갑니다
        let res = test::call_service(&app, test::TestRequest::get().uri("/css/missing.css").to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);

        std::fs::remove_dir_all(&web_root).ok();
    }


    #[actix_web::test]
    async fn test_oidc_callback_issues_session_cookie() {
        let state = state();
        let app = test::init_service(build_app(state.clone())).await;

        // 챌린지: nonce 쿠키 발급
        let req = test::TestRequest::get()
            .uri("/Account/SignIn?ReturnUrl=%2FHome%2FAbout")
            .to_request();
        let res = test::call_service(&app, req).await;
        let nonce_cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == NONCE_COOKIE_NAME)
            .unwrap()
            .into_owned();
        assert_eq!(nonce_cookie.path(), Some("/signin-oidc"));
        assert!(location(&res).contains(&format!("nonce={}", nonce_cookie.value())));

        // 프로바이더의 form_post
        let token = id_token(&state, nonce_cookie.value());
        let req = test::TestRequest::post()
            .uri("/signin-oidc")
            .cookie(nonce_cookie)
            .set_form([("id_token", token.as_str()), ("state", "/Home/About")])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/Home/About");
        let session = res
            .response()
            .cookies()
            .find(|c| c.name() == ".auth.session")
            .unwrap()
            .into_owned();
        let nonce_removal = res
            .response()
            .cookies()
            .find(|c| c.name() == NONCE_COOKIE_NAME)
            .unwrap();
        assert_eq!(nonce_removal.max_age(), Some(time::Duration::ZERO));

        // 발급된 세션으로 보호된 페이지 접근
        let req = test::TestRequest::get()
            .uri("/Home/About")
            .cookie(session)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_oidc_callback_rejects_mismatched_nonce() {
        let state = state();
        let app = test::init_service(build_app(state.clone())).await;

        let token = id_token(&state, "nonce-from-another-login");
        let req = test::TestRequest::post()
            .uri("/signin-oidc")
            .cookie(Cookie::new(NONCE_COOKIE_NAME, "expected-nonce"))
            .set_form([("id_token", token.as_str()), ("state", "/")])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().all(|c| c.name() != ".auth.session"));
    }

    #[actix_web::test]
    async fn test_oidc_callback_is_anonymous_and_needs_nonce_cookie() {
        let state = state();
        let app = test::init_service(build_app(state.clone())).await;

        let token = id_token(&state, "n-1");
        let req = test::TestRequest::post()
            .uri("/signin-oidc")
            .set_form([("id_token", token.as_str())])
            .to_request();
        let res = test::call_service(&app, req).await;

        // 로그인 페이지로 돌려보내지 않고 콜백 핸들러가 직접 거절합니다
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().get(header::LOCATION).is_none());

        let req = test::TestRequest::post()
            .uri("/signin-oidc")
            .set_form([("error", "access_denied"), ("error_description", "user cancelled")])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_oidc_callback_ignores_external_state() {
        let state = state();
        let app = test::init_service(build_app(state.clone())).await;

        let token = id_token(&state, "n-1");
        let req = test::TestRequest::post()
            .uri("/signin-oidc")
            .cookie(Cookie::new(NONCE_COOKIE_NAME, "n-1"))
            .set_form([("id_token", token.as_str()), ("state", "https://evil.example.com")])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/");
    }
}
