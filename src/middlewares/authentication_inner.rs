//! Authentication 미들웨어의 요청 처리 로직
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpRequest};

use crate::domain::Principal;
use crate::services::auth::{AuthenticateResult, AuthenticationHandler};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthenticationService<S> {
    pub service: Rc<S>,
    pub handlers: Arc<Vec<Arc<dyn AuthenticationHandler>>>,
}

impl<S, B> Service<ServiceRequest> for AuthenticationService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let principal = authenticate_request(&self.handlers, req.request());
        req.extensions_mut().insert(principal);

        self.service.call(req)
    }
}

/// 모든 스킴 핸들러를 실행하여 principal을 만듭니다.
///
/// 실패한 스킴은 로그만 남기고 익명으로 취급합니다.
pub fn authenticate_request(
    handlers: &[Arc<dyn AuthenticationHandler>],
    req: &HttpRequest,
) -> Principal {
    let mut identities = Vec::new();

    for handler in handlers {
        match handler.authenticate(req) {
            AuthenticateResult::Success(user) => {
                log::debug!("인증 성공 [{}]: 사용자 ID {}", handler.scheme(), user.subject);
                identities.push(user);
            }
            AuthenticateResult::NoResult => {}
            AuthenticateResult::Fail(err) => {
                log::warn!("인증 실패 [{}] {}: {}", handler.scheme(), req.path(), err);
            }
        }
    }

    Principal::new(identities)
}
