//! 접근 정책 모듈
//!
//! - [`access_decision`] - 인증 실패 시 401/로그인 리다이렉트 결정
//! - [`authorization_policy`] - `Authenticated` 전역 정책과 익명 엔드포인트

pub mod access_decision;
pub mod authorization_policy;

pub use access_decision::{
    decide, login_redirect_uri, on_redirect_to_login, starts_with_segments, RedirectToLogin,
    API_PATH_PREFIX,
};
pub use authorization_policy::{AnonymousEndpoints, AuthorizationPolicy, AUTHENTICATED_POLICY};
