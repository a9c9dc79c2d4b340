//! 라우트 설정 모듈
//!
//! - `GET /health` - 헬스체크 (익명)
//! - `GET /api/me` - 현재 principal (JSON)
//! - `POST {CallbackPath}` - OpenID Connect 콜백 (익명)
//! - 그 외 모든 경로 - 라우트 템플릿 `{controller=Home}/{action=Index}/{id?}`로 디스패치
//!
//! 인증/인가는 라우트 단위가 아니라 `startup`에서 scope 전체에 적용됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new().service(
//!     web::scope("")
//!         .configure(|cfg| configure_all_routes(cfg, "/signin-oidc"))
//!         .default_service(web::to(dispatch)),
//! );
//! ```

pub mod route_template;

pub use route_template::{RouteTemplate, RouteValues, DEFAULT_ROUTE_TEMPLATE};

use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::errors::{AppError, AppResult};
use crate::handlers::{account, api, home};
use crate::startup::AppState;

/// 명시적 라우트를 등록합니다
///
/// 템플릿 디스패치는 scope의 default service로 등록해야 합니다 ([`dispatch`]).
/// `callback_path`는 `AzureAd.CallbackPath` 설정값입니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig, callback_path: &str) {
    // Health check endpoint
    cfg.service(health_check);

    cfg.service(web::resource(callback_path).route(web::post().to(account::sign_in_callback)));

    cfg.service(web::scope("/api").service(api::me));
}

/// 라우트 템플릿으로 (controller, action)을 찾아 컨트롤러를 호출합니다
///
/// # Errors
///
/// * `AppError::MethodNotAllowed` - GET/HEAD 이외의 메서드
/// * `AppError::NotFound` - 템플릿과 맞지 않거나 알 수 없는 controller/action
pub async fn dispatch(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return Err(AppError::MethodNotAllowed(format!(
            "{} {}",
            req.method(),
            req.path()
        )));
    }

    let values = state
        .route_template
        .match_path(req.path())
        .ok_or_else(|| AppError::NotFound(format!("경로를 찾을 수 없습니다: {}", req.path())))?;

    log::debug!(
        "디스패치: {} → {}/{}",
        req.path(),
        values.controller(),
        values.action()
    );

    let controller = values.controller().to_ascii_lowercase();
    let action = values.action().to_ascii_lowercase();

    match (controller.as_str(), action.as_str()) {
        ("home", "index") => home::index(&req),
        ("home", "about") => home::about(&req),
        ("home", "error") => home::error(&req),
        ("account", "signin") => account::sign_in(&req, &state),
        ("account", "signout") => account::sign_out(&req, &state),
        ("account", "signedout") => account::signed_out(&req),
        ("account", "profile") => account::profile(&req),
        _ => Err(AppError::NotFound(format!(
            "알 수 없는 액션입니다: {}/{}",
            values.controller(),
            values.action()
        ))),
    }
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 전역 인가 정책에서 제외되어 있어 로드밸런서가 인증 없이 호출할 수 있습니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "global_auth_filter",
///   "version": "0.1.0",
///   "timestamp": "2023-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
