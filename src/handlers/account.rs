//! Account 컨트롤러
//!
//! 로그인 챌린지, OpenID Connect 콜백, 로그아웃, 프로필 페이지를 처리합니다.
//! `Profile`을 제외한 액션은 익명 접근이 허용됩니다.

use std::collections::HashMap;

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::domain::Principal;
use crate::errors::{AppError, AppResult};
use crate::services::auth::NONCE_COOKIE_NAME;
use crate::handlers::home::html;
use crate::handlers::views;
use crate::startup::AppState;

/// 로그아웃 후 프로바이더가 돌려보낼 경로
pub const SIGNED_OUT_PATH: &str = "/Account/SignedOut";

/// `GET /Account/SignIn?ReturnUrl=...`
///
/// 이미 로그인한 경우 `ReturnUrl`(로컬 경로만)로 돌려보내고,
/// 그렇지 않으면 Azure AD 인가 엔드포인트로 챌린지합니다.
pub fn sign_in(req: &HttpRequest, state: &AppState) -> AppResult<HttpResponse> {
    let principal = Principal::from_request_extensions(req);
    let return_url = return_url(req);

    if principal.is_authenticated() {
        log::debug!("이미 로그인된 사용자, {}로 이동", return_url);
        return Ok(redirect(&return_url));
    }

    let nonce = uuid::Uuid::new_v4().to_string();
    let origin = {
        let info = req.connection_info();
        format!("{}://{}", info.scheme(), info.host())
    };
    let authorize_url = state.open_id_connect.authorize_url(&origin, &return_url, &nonce);

    log::info!("OpenID Connect 챌린지 시작 (ReturnUrl: {})", return_url);
    Ok(HttpResponse::Found()
        .cookie(state.open_id_connect.nonce_cookie(&nonce))
        .insert_header((header::LOCATION, authorize_url))
        .finish())
}

/// 프로바이더가 `form_post`로 보내는 콜백 본문
#[derive(Debug, Deserialize)]
pub struct SignInCallbackForm {
    pub id_token: Option<String>,
    /// 챌린지 때 넘긴 `ReturnUrl`
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// `POST {CallbackPath}`
///
/// id_token과 nonce 쿠키를 검증한 뒤 세션 쿠키를 발급하고 `state`(로컬 경로만)로 보냅니다.
///
/// # Errors
///
/// * `AppError::AuthenticationError` - 프로바이더 에러 응답, id_token 또는 nonce 쿠키 누락,
///   id_token 검증 실패
pub async fn sign_in_callback(
    req: HttpRequest,
    form: web::Form<SignInCallbackForm>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    if let Some(error) = form.error {
        log::warn!(
            "프로바이더 로그인 실패: {} ({})",
            error,
            form.error_description.as_deref().unwrap_or("-")
        );
        return Err(AppError::AuthenticationError(format!("로그인 실패: {}", error)));
    }

    let id_token = form
        .id_token
        .ok_or_else(|| AppError::AuthenticationError("id_token이 없습니다".to_string()))?;

    let nonce = req
        .cookie(NONCE_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("nonce 쿠키가 없습니다".to_string()))?;

    let user = state.open_id_connect.validate_id_token(&id_token, &nonce)?;
    let session_cookie = state.cookie.sign_in(&user, is_https(&req))?;

    let return_url = form
        .state
        .filter(|url| is_local_url(url))
        .unwrap_or_else(|| "/".to_string());

    log::info!("OpenID Connect 로그인 완료: 사용자 ID {} → {}", user.subject, return_url);

    Ok(HttpResponse::Found()
        .cookie(session_cookie)
        .cookie(state.open_id_connect.nonce_removal_cookie())
        .insert_header((header::LOCATION, return_url))
        .finish())
}

/// `GET /Account/SignOut`
///
/// 세션 쿠키를 지우고 프로바이더 로그아웃 URL로 보냅니다.
pub fn sign_out(req: &HttpRequest, state: &AppState) -> AppResult<HttpResponse> {
    let signed_out_url = {
        let info = req.connection_info();
        format!("{}://{}{}", info.scheme(), info.host(), SIGNED_OUT_PATH)
    };
    let end_session_url = state.open_id_connect.end_session_url(&signed_out_url);

    if let Some(user) = Principal::from_request_extensions(req).primary() {
        log::info!("로그아웃: 사용자 ID {}", user.subject);
    }

    Ok(HttpResponse::Found()
        .cookie(state.cookie.sign_out(is_https(req)))
        .insert_header((header::LOCATION, end_session_url))
        .finish())
}

/// `GET /Account/SignedOut`
pub fn signed_out(req: &HttpRequest) -> AppResult<HttpResponse> {
    if Principal::from_request_extensions(req).is_authenticated() {
        return Ok(redirect("/"));
    }

    Ok(html(views::signed_out()))
}

/// `GET /Account/Profile`
pub fn profile(req: &HttpRequest) -> AppResult<HttpResponse> {
    let principal = Principal::from_request_extensions(req);
    Ok(html(views::profile(&principal)))
}

/// 쿼리의 `ReturnUrl`. 로컬 경로가 아니면 `/`
fn return_url(req: &HttpRequest) -> String {
    web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.get("ReturnUrl").cloned())
        .filter(|url| is_local_url(url))
        .unwrap_or_else(|| "/".to_string())
}

/// 오픈 리다이렉트 방지: `/`로 시작하되 `//`, `/\`는 허용하지 않습니다.
pub fn is_local_url(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\")
}

fn is_https(req: &HttpRequest) -> bool {
    req.connection_info().scheme() == "https"
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_local_url() {
        assert!(is_local_url("/"));
        assert!(is_local_url("/Home/About?x=1"));
        assert!(!is_local_url("//evil.example.com"));
        assert!(!is_local_url("/\\evil.example.com"));
        assert!(!is_local_url("https://evil.example.com"));
        assert!(!is_local_url(""));
    }
}
