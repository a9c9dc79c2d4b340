//! 전역 인가 정책
//!
//! `Authenticated` 정책은 Bearer 토큰 또는 세션 쿠키 중 하나로 인증된 사용자를 요구합니다.
//! 익명 엔드포인트를 제외한 모든 라우트에 기본 적용됩니다.

use crate::domain::{AuthScheme, Principal};
use crate::routes::route_template::RouteTemplate;

/// 전역 정책 이름
pub const AUTHENTICATED_POLICY: &str = "Authenticated";

/// 이름 있는 인가 규칙
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationPolicy {
    pub name: String,
    /// 정책 평가에 사용할 인증 스킴
    pub schemes: Vec<AuthScheme>,
    pub require_authenticated_user: bool,
}

impl AuthorizationPolicy {
    /// `Authenticated` 정책: Bearer 또는 Cookies 스킴으로 인증된 사용자 필요
    pub fn authenticated() -> Self {
        Self {
            name: AUTHENTICATED_POLICY.to_string(),
            schemes: vec![AuthScheme::Bearer, AuthScheme::Cookies],
            require_authenticated_user: true,
        }
    }

    pub fn includes(&self, scheme: AuthScheme) -> bool {
        self.schemes.contains(&scheme)
    }

    /// principal이 정책 스킴 중 하나의 아이덴티티를 가지고 있는지 확인합니다.
    pub fn is_satisfied(&self, principal: &Principal) -> bool {
        if !self.require_authenticated_user {
            return true;
        }

        self.schemes
            .iter()
            .any(|scheme| principal.identity_for(*scheme).is_some())
    }
}

/// 정책을 적용하지 않는 엔드포인트 목록
///
/// 라우트 템플릿으로 얻은 (controller, action) 쌍과 고정 경로로 판별합니다.
#[derive(Debug, Clone)]
pub struct AnonymousEndpoints {
    route: RouteTemplate,
    actions: Vec<(String, String)>,
    paths: Vec<String>,
}

impl AnonymousEndpoints {
    pub fn new(route: RouteTemplate) -> Self {
        Self {
            route,
            actions: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// 로그인/로그아웃 흐름, 에러 페이지, 헬스체크
    ///
    /// OpenID Connect 콜백 경로는 설정값이므로 호출 측에서 `allow_path`로 추가합니다.
    pub fn defaults(route: RouteTemplate) -> Self {
        Self::new(route)
            .allow_action("Account", "SignIn")
            .allow_action("Account", "SignOut")
            .allow_action("Account", "SignedOut")
            .allow_action("Home", "Error")
            .allow_path("/health")
    }

    pub fn allow_action(mut self, controller: &str, action: &str) -> Self {
        self.actions.push((controller.to_string(), action.to_string()));
        self
    }

    pub fn allow_path(mut self, path: &str) -> Self {
        self.paths.push(path.to_string());
        self
    }

    /// 요청 경로가 익명 접근을 허용하는지 확인합니다.
    pub fn allows(&self, path: &str) -> bool {
        if self.paths.iter().any(|p| p == path) {
            return true;
        }

        match self.route.match_path(path) {
            Some(values) => self
                .actions
                .iter()
                .any(|(controller, action)| values.is(controller, action)),
            None => false,
        }
    }
}
