//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 담당합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 인증 미들웨어 (Authentication)
//! - 쿠키/Bearer 스킴 핸들러를 실행해 `Principal`을 만듭니다
//! - 결과를 request extension에 저장합니다
//!
//! ### 2. 전역 인가 필터 (AuthorizeFilter)
//! - 모든 라우트에 `Authenticated` 정책 적용
//! - `/api` 경로는 401, 그 외 경로는 로그인 페이지로 302
//!
//! ### 3. 예외 페이지 (exception_pages)
//! - 개발 환경: 상세 예외 페이지, 그 외: 일반 에러 페이지
//!
//! # 사용 방법
//! ```rust,ignore
//! App::new().service(
//!     web::scope("")
//!         .wrap(AuthorizeFilter::new(policy, anonymous, LOGIN_PATH))
//!         .wrap(Authentication::new(handlers)) // 마지막에 wrap한 것이 먼저 실행됩니다
//!         .configure(|cfg| configure_all_routes(cfg, "/signin-oidc")),
//! )
//! ```

pub mod authentication;
mod authentication_inner;
pub mod authorize_filter;
mod authorize_inner;
pub mod exception_pages;

// 미들웨어 재export
pub use authentication::Authentication;
pub use authentication_inner::authenticate_request;
pub use authorize_filter::AuthorizeFilter;
pub use exception_pages::exception_pages;
