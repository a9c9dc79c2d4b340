//! 전역 인증 필터 샘플
//!
//! 쿠키 세션, JWT Bearer, OpenID Connect(Azure AD) 인증 스킴을 등록하고
//! 하나의 전역 인가 정책(`Authenticated`)을 모든 라우트에 적용하는 웹 애플리케이션입니다.
//! 정책을 만족하지 못한 요청은 경로에 따라 다르게 끝납니다.
//!
//! - `/api`, `/api/...` → `401 Unauthorized` (리다이렉트 없음)
//! - 그 외 → `302 Found` → `/Account/SignIn?ReturnUrl=...`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │     startup     │ ← 파이프라인 조립, HTTP 서버
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   middlewares   │ ← Authentication, AuthorizeFilter, 예외 페이지
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ routes/handlers │ ← 라우트 템플릿 디스패치, 컨트롤러
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ services/policy │ ← 스킴 핸들러, 접근 결정
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use global_auth_filter::config::AppSettings;
//! use global_auth_filter::services::auth::JwtBearerHandler;
//!
//! let settings = AppSettings::from_env()?;
//! let jwt_bearer = JwtBearerHandler::from_options(&settings.jwt_bearer).await?;
//! global_auth_filter::startup::run(settings, jwt_bearer).await?;
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod policy;
pub mod routes;
pub mod services;
pub mod startup;
