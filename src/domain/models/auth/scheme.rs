//! 인증 스킴 정의

use std::fmt;

use serde::{Deserialize, Serialize};

/// 요청을 검증할 수 있는 이름 있는 인증 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthScheme {
    /// 세션 쿠키 (기본 인증 스킴)
    Cookies,
    /// `Authorization: Bearer` 토큰
    Bearer,
    /// 외부 OpenID Connect 프로바이더 (기본 챌린지 스킴)
    OpenIdConnect,
}

impl AuthScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Cookies => "Cookies",
            AuthScheme::Bearer => "Bearer",
            AuthScheme::OpenIdConnect => "OpenIdConnect",
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_names() {
        assert_eq!(AuthScheme::Cookies.to_string(), "Cookies");
        assert_eq!(AuthScheme::Bearer.as_str(), "Bearer");
        assert_eq!(AuthScheme::OpenIdConnect.as_str(), "OpenIdConnect");
    }
}
