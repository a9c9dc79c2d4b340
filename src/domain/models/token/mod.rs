//! 토큰 클레임 모델

pub mod claims;

pub use claims::{BearerClaims, IdTokenClaims, SessionClaims};
