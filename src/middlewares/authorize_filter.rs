//! 전역 인가 필터
//!
//! 모든 라우트에 `Authenticated` 정책을 적용합니다. 정책을 만족하지 못한 요청은
//! 로그인 리다이렉트 훅(`RedirectToLogin`)이 고른 응답(401 또는 302)으로 끝납니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::authorize_inner::AuthorizeFilterService;
use crate::policy::{on_redirect_to_login, AnonymousEndpoints, AuthorizationPolicy, RedirectToLogin};

/// 전역 인가 필터 미들웨어
#[derive(Clone)]
pub struct AuthorizeFilter {
    policy: Arc<AuthorizationPolicy>,
    anonymous: Arc<AnonymousEndpoints>,
    login_path: String,
    on_redirect_to_login: RedirectToLogin,
}

impl AuthorizeFilter {
    /// 기본 훅([`on_redirect_to_login`])을 사용하는 필터를 만듭니다.
    pub fn new(
        policy: AuthorizationPolicy,
        anonymous: AnonymousEndpoints,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            policy: Arc::new(policy),
            anonymous: Arc::new(anonymous),
            login_path: login_path.into(),
            on_redirect_to_login,
        }
    }

    /// 로그인 리다이렉트 훅을 교체합니다.
    pub fn with_redirect_to_login(mut self, hook: RedirectToLogin) -> Self {
        self.on_redirect_to_login = hook;
        self
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthorizeFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthorizeFilterService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizeFilterService {
            service: Rc::new(service),
            policy: self.policy.clone(),
            anonymous: self.anonymous.clone(),
            login_path: self.login_path.clone(),
            on_redirect_to_login: self.on_redirect_to_login,
        }))
    }
}
