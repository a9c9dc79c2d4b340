//! # Domain Models Module
//!
//! 요청 단위로 만들어지고 버려지는 값 객체들을 정의합니다.
//! 영속성이 없으며 요청 사이에 공유되지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 인증 스킴, 사용자 아이덴티티, principal
//! - [`access`] - 인증 실패 요청의 컨텍스트와 응답 동작
//! - [`token`] - 세션 쿠키/Bearer 토큰 클레임

pub mod access;
pub mod auth;
pub mod token;
