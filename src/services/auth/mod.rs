//! 인증 스킴 핸들러 모듈
//!
//! 각 스킴의 자격 증명 처리는 외부 크레이트에 위임하고, 이 모듈은 설정을 연결합니다.
//!
//! | 스킴 | 핸들러 | 위임 대상 |
//! |------|--------|-----------|
//! | Cookies | [`CookieAuthenticationHandler`] | actix-web 쿠키, jsonwebtoken (HS256) |
//! | Bearer | [`JwtBearerHandler`] | jsonwebtoken, reqwest (OpenID discovery) |
//! | OpenIdConnect | [`OpenIdConnectHandler`] | Azure AD 로그인 페이지, jsonwebtoken (id_token) |
//!
//! Bearer와 OpenIdConnect는 [`SigningKeys`]의 discovery/JWKS 키 선택을 공유합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use global_auth_filter::services::auth::{AuthenticationHandler, CookieAuthenticationHandler};
//!
//! let cookies = CookieAuthenticationHandler::new(settings.cookie.clone());
//! match cookies.authenticate(&req) {
//!     AuthenticateResult::Success(user) => log::debug!("세션 사용자: {}", user.subject),
//!     _ => {}
//! }
//! ```

pub mod cookie_service;
pub mod handler;
pub mod jwt_bearer_service;
pub mod open_id_connect_service;
pub mod signing_keys;

pub use cookie_service::*;
pub use handler::*;
pub use jwt_bearer_service::*;
pub use open_id_connect_service::*;
pub use signing_keys::*;
