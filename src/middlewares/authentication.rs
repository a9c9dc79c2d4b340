//! 인증 미들웨어
//!
//! 등록된 모든 스킴 핸들러로 요청을 인증하고, 성공한 아이덴티티를 모은
//! [`Principal`](crate::domain::Principal)을 request extension에 저장합니다.
//! 요청을 거부하지는 않습니다. 거부는 [`AuthorizeFilter`](super::AuthorizeFilter)의 몫입니다.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::authentication_inner::AuthenticationService;
use crate::services::auth::AuthenticationHandler;

/// 스킴 핸들러 목록을 실행하는 인증 미들웨어
#[derive(Clone)]
pub struct Authentication {
    handlers: Arc<Vec<Arc<dyn AuthenticationHandler>>>,
}

impl Authentication {
    /// 핸들러는 등록 순서대로 실행되며, 첫 번째 성공이 대표 아이덴티티가 됩니다.
    pub fn new(handlers: Vec<Arc<dyn AuthenticationHandler>>) -> Self {
        Self {
            handlers: Arc::new(handlers),
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthenticationService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticationService {
            service: Rc::new(service),
            handlers: self.handlers.clone(),
        }))
    }
}
