//! # HTTP Request Handlers Module
//!
//! 라우트 디스패치가 호출하는 컨트롤러 함수들입니다.
//!
//! ```text
//! Request ─► static files ─► Authentication ─► AuthorizeFilter ─► routes::dispatch
//!                                                                   │
//!                                  ┌────────────────────────────────┼──────────────┐
//!                                  ▼                                ▼              ▼
//!                               home::*                        account::*      api::*
//! ```
//!
//! - [`home`]: `Home/Index`, `Home/About`, `Home/Error`
//! - [`account`]: `Account/SignIn`, `Account/SignOut`, `Account/SignedOut`, `Account/Profile`
//! - [`api`]: `GET /api/me`
//! - [`views`]: HTML 렌더링

pub mod account;
pub mod api;
pub mod home;
pub mod views;
