//! 인증 실패 응답 정책
//!
//! 인증이 필요하지만 없는 요청을 호출자 유형에 맞는 응답으로 바꿉니다.
//!
//! - `/api` 세그먼트로 시작하는 경로 → 401 (본문 없음, 리다이렉트 없음)
//! - 그 외 경로 → 로그인 페이지로 리다이렉트
//!
//! 비교는 대소문자를 구분하며 세그먼트 경계를 지킵니다.
//! `/api`, `/api/orders`는 일치하고 `/apiary`, `/API/orders`는 일치하지 않습니다.

use crate::domain::{RequestContext, ResponseAction};

/// API 클라이언트용 경로 접두사
pub const API_PATH_PREFIX: &str = "/api";

/// 로그인 리다이렉트 훅 시그니처: `(path, redirect_uri) -> ResponseAction`
pub type RedirectToLogin = fn(&str, &str) -> ResponseAction;

/// 기본 로그인 리다이렉트 훅
///
/// 같은 입력에 대해 항상 같은 동작을 반환하며 I/O를 하지 않습니다.
///
/// # Examples
///
/// ```rust
/// use global_auth_filter::domain::ResponseAction;
/// use global_auth_filter::policy::on_redirect_to_login;
///
/// assert_eq!(on_redirect_to_login("/api/orders", "/Account/SignIn"), ResponseAction::Unauthorized);
/// assert_eq!(
///     on_redirect_to_login("/Home/Index", "/Account/SignIn"),
///     ResponseAction::Redirect("/Account/SignIn".to_string())
/// );
/// ```
pub fn on_redirect_to_login(path: &str, redirect_uri: &str) -> ResponseAction {
    if starts_with_segments(path, API_PATH_PREFIX) {
        return ResponseAction::Unauthorized;
    }

    ResponseAction::Redirect(redirect_uri.to_string())
}

/// `path`가 `prefix`와 같거나 `prefix/`로 시작하는지 확인합니다. 대소문자를 구분합니다.
pub fn starts_with_segments(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');

    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// 인증 실패 컨텍스트에 대한 응답 동작을 결정합니다.
///
/// 인증된 요청이면 훅을 호출하지 않고 `None`을 반환합니다.
pub fn decide(
    context: &RequestContext,
    redirect_uri: &str,
    hook: RedirectToLogin,
) -> Option<ResponseAction> {
    if context.is_authenticated {
        return None;
    }

    Some(hook(&context.path, redirect_uri))
}

/// 로그인 경로에 원래 요청 위치를 `ReturnUrl`로 붙인 리다이렉트 URI를 만듭니다.
pub fn login_redirect_uri(login_path: &str, path_and_query: &str) -> String {
    format!(
        "{}?ReturnUrl={}",
        login_path,
        urlencoding::encode(path_and_query)
    )
}
