//! AuthorizeFilter 미들웨어의 정책 평가와 챌린지 처리
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthScheme, Principal, RequestContext, ResponseAction};
use crate::policy::{decide, login_redirect_uri, AnonymousEndpoints, AuthorizationPolicy, RedirectToLogin};

/// 실제 인가 로직을 수행하는 서비스
pub struct AuthorizeFilterService<S> {
    pub service: Rc<S>,
    pub policy: Arc<AuthorizationPolicy>,
    pub anonymous: Arc<AnonymousEndpoints>,
    pub login_path: String,
    pub on_redirect_to_login: RedirectToLogin,
}

impl<S, B> Service<ServiceRequest> for AuthorizeFilterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        if self.anonymous.allows(req.path()) {
            return Box::pin(async move {
                let res = service.call(req).await?;
                Ok(res.map_into_left_body())
            });
        }

        let is_authorized = req
            .extensions()
            .get::<Principal>()
            .is_some_and(|principal| self.policy.is_satisfied(principal));
        let context = RequestContext::new(req.path(), is_authorized);

        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| req.path());
        let redirect_uri = login_redirect_uri(&self.login_path, path_and_query);

        let Some(action) = decide(&context, &redirect_uri, self.on_redirect_to_login) else {
            return Box::pin(async move {
                let res = service.call(req).await?;
                Ok(res.map_into_left_body())
            });
        };

        log::info!(
            "정책 '{}' 불충족: {} {} → {:?}",
            self.policy.name,
            req.method(),
            context.path,
            action
        );

        let challenge_bearer =
            action == ResponseAction::Unauthorized && self.policy.includes(AuthScheme::Bearer);
        let mut response = action.into_response();
        if challenge_bearer {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        let (req, _) = req.into_parts();
        let res = ServiceResponse::new(req, response).map_into_right_body();
        Box::pin(async move { Ok(res) })
    }
}
