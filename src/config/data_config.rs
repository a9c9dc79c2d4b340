//! 실행 환경 및 서버 설정 모듈
//!
//! 실행 환경(개발/테스트/스테이징/프로덕션)과 HTTP 서버 바인딩, 정적 파일 루트를 관리합니다.

use std::path::PathBuf;

use serde::Serialize;
use validator::Validate;

use crate::config::config_source::ConfigSource;
use crate::errors::AppResult;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Environment {
    /// 개발 환경 - 상세 예외 페이지를 노출합니다
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 일반 에러 페이지만 노출합니다
    Production,
}

impl Environment {
    /// 설정 소스에서 실행 환경을 읽습니다.
    ///
    /// `Environment` 키(환경 변수 `ENVIRONMENT`)를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn from_source(source: &ConfigSource) -> Self {
        source
            .get("Environment")
            .map(Self::from_str)
            .unwrap_or(Environment::Production)
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `s` - 환경 이름 문자열 (대소문자 무관)
    ///
    /// # Returns
    ///
    /// 해당하는 Environment 값. 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 개발 환경 여부
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// 개발용 기본 비밀키를 허용하는 환경인지 확인합니다.
    pub fn allows_insecure_defaults(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// 서버 바인딩 및 정적 파일 설정
#[derive(Debug, Clone, Validate)]
pub struct ServerConfig {
    /// 바인딩할 호스트 주소. 기본값: "0.0.0.0"
    #[validate(length(min = 1))]
    pub host: String,

    /// 바인딩할 포트. 기본값: 8080
    #[validate(range(min = 1))]
    pub port: u16,

    /// 워커 스레드 수. 기본값: 4
    #[validate(range(min = 1, max = 256))]
    pub workers: usize,

    /// 정적 파일 루트 디렉터리. 기본값: "wwwroot"
    pub web_root: PathBuf,
}

impl ServerConfig {
    /// 설정 소스에서 서버 설정을 읽습니다.
    ///
    /// # Environment Variables
    ///
    /// - `HOST`, `PORT`, `WORKERS`, `WEB_ROOT`
    pub fn from_source(source: &ConfigSource) -> AppResult<Self> {
        Ok(Self {
            host: source.get_or("Host", "0.0.0.0"),
            port: source.parse_or("Port", 8080)?,
            workers: source.parse_or("Workers", 4)?,
            web_root: PathBuf::from(source.get_or("WebRoot", "wwwroot")),
        })
    }

    /// `host:port` 형식의 바인딩 주소
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
