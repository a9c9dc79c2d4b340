//! 인증 스킴 핸들러 공통 인터페이스

use actix_web::HttpRequest;

use crate::domain::{AuthScheme, AuthenticatedUser};
use crate::errors::AppError;

/// 하나의 스킴으로 요청을 인증한 결과
#[derive(Debug)]
pub enum AuthenticateResult {
    /// 자격 증명이 유효함
    Success(AuthenticatedUser),
    /// 이 스킴의 자격 증명이 요청에 없음
    NoResult,
    /// 자격 증명이 있지만 유효하지 않음 (만료, 서명 불일치 등)
    Fail(AppError),
}

/// 요청에서 자격 증명을 읽어 아이덴티티를 만드는 스킴 핸들러
///
/// 핸들러는 시작 시 한 번 만들어지고 모든 워커가 공유하므로
/// 요청 처리 중 상태를 바꾸지 않습니다.
pub trait AuthenticationHandler: Send + Sync {
    fn scheme(&self) -> AuthScheme;

    fn authenticate(&self, req: &HttpRequest) -> AuthenticateResult;
}
