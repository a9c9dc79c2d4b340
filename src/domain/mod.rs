//! # Domain Layer Module
//!
//! 인증 파이프라인이 주고받는 도메인 타입을 정의합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! └── models
//!     ├── auth     - AuthScheme, AuthenticatedUser, Principal
//!     ├── access   - RequestContext, ResponseAction
//!     └── token    - SessionClaims, BearerClaims
//!      │
//!      ▼
//! Services (스킴 핸들러) / Policy (접근 결정) / Middlewares
//! ```

pub mod models;

pub use models::access::*;
pub use models::auth::*;
pub use models::token::*;
