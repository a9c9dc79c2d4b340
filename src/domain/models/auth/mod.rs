//! 인증 아이덴티티 모델

pub mod authenticated_user;
pub mod scheme;

pub use authenticated_user::{AuthenticatedUser, Principal};
pub use scheme::AuthScheme;
