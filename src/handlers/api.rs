//! `/api` 엔드포인트
//!
//! 전역 정책이 그대로 적용되며, 인증되지 않은 요청은 리다이렉트 없이 401을 받습니다.

use actix_web::{get, HttpResponse};
use serde_json::json;

use crate::domain::Principal;

/// 현재 principal의 아이덴티티 목록
///
/// # Endpoint
/// `GET /api/me`
#[get("/me")]
pub async fn me(principal: Principal) -> HttpResponse {
    let name = principal.primary().map(|user| user.name.clone());

    HttpResponse::Ok().json(json!({
        "authenticated": principal.is_authenticated(),
        "name": name,
        "identities": principal.identities,
    }))
}
