use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::models::auth::scheme::AuthScheme;

/// 하나의 인증 스킴이 확인한 사용자 아이덴티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID (`sub` 클레임)
    pub subject: String,

    /// 표시 이름
    pub name: String,

    /// 이메일 (선택사항)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// 사용자 역할 목록
    #[serde(default)]
    pub roles: Vec<String>,

    /// 이 아이덴티티를 만든 인증 스킴
    pub scheme: AuthScheme,
}

/// 요청에 대해 성공한 모든 스킴의 아이덴티티 묶음
///
/// `Authentication` 미들웨어가 요청 extension에 저장합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Principal {
    pub identities: Vec<AuthenticatedUser>,
}

impl Principal {
    pub fn new(identities: Vec<AuthenticatedUser>) -> Self {
        Self { identities }
    }

    /// 하나 이상의 스킴이 인증에 성공했는지 확인
    pub fn is_authenticated(&self) -> bool {
        !self.identities.is_empty()
    }

    /// 특정 스킴이 만든 아이덴티티
    pub fn identity_for(&self, scheme: AuthScheme) -> Option<&AuthenticatedUser> {
        self.identities.iter().find(|identity| identity.scheme == scheme)
    }

    /// 대표 아이덴티티 (가장 먼저 인증된 스킴)
    pub fn primary(&self) -> Option<&AuthenticatedUser> {
        self.identities.first()
    }

    /// 요청 extension에서 principal을 꺼냅니다. 없으면 익명 principal입니다.
    pub fn from_request_extensions(req: &HttpRequest) -> Self {
        req.extensions().get::<Principal>().cloned().unwrap_or_default()
    }
}

/// ActixWeb FromRequest trait 구현. 인증되지 않은 요청은 익명 principal을 받습니다.
impl FromRequest for Principal {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(Principal::from_request_extensions(req)))
    }
}
