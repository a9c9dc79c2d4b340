//! Home 컨트롤러
//!
//! - `Home/Index`, `Home/About`: 로그인한 사용자용 페이지
//! - `Home/Error`: 익명 접근 가능한 일반 에러 페이지

use actix_web::{HttpRequest, HttpResponse};

use crate::domain::Principal;
use crate::errors::AppResult;
use crate::handlers::views;

pub fn index(req: &HttpRequest) -> AppResult<HttpResponse> {
    let principal = Principal::from_request_extensions(req);
    Ok(html(views::home_index(&principal)))
}

pub fn about(req: &HttpRequest) -> AppResult<HttpResponse> {
    let principal = Principal::from_request_extensions(req);
    Ok(html(views::home_about(&principal)))
}

/// 요청 ID를 새로 발급해 일반 에러 페이지를 보여줍니다.
pub fn error(_req: &HttpRequest) -> AppResult<HttpResponse> {
    let request_id = uuid::Uuid::new_v4().to_string();
    Ok(html(views::error_page(&request_id)))
}

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}
