//! 서비스 계층 모듈
//!
//! 시작 시 한 번 구성되어 모든 워커가 공유하는 인증 스킴 핸들러들을 제공합니다.

pub mod auth;
