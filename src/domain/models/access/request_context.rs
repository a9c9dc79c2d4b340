//! 인증 실패 요청의 컨텍스트와 응답 동작

use actix_web::http::header;
use actix_web::HttpResponse;

/// 인증 실패 처리 시점의 요청 정보
///
/// 요청마다 새로 만들어지고 응답이 작성되면 버려집니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// 요청 URL 경로 (쿼리 제외)
    pub path: String,
    /// 외부 인증 계층이 결정한 인증 여부
    pub is_authenticated: bool,
}

impl RequestContext {
    pub fn new(path: impl Into<String>, is_authenticated: bool) -> Self {
        Self {
            path: path.into(),
            is_authenticated,
        }
    }
}

/// 인증 실패에 대한 응답 동작
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseAction {
    /// 401 Unauthorized, 본문 없음
    Unauthorized,
    /// 로그인 페이지로 302 리다이렉트
    Redirect(String),
}

impl ResponseAction {
    /// 새 응답 하나에 동작을 적용합니다.
    pub fn into_response(self) -> HttpResponse {
        match self {
            ResponseAction::Unauthorized => HttpResponse::Unauthorized().finish(),
            ResponseAction::Redirect(location) => HttpResponse::Found()
                .insert_header((header::LOCATION, location))
                .finish(),
        }
    }
}
