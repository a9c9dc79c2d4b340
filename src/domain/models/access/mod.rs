//! 접근 결정 입력/출력 모델

pub mod request_context;

pub use request_context::{RequestContext, ResponseAction};
