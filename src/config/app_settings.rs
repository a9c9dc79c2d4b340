//! 애플리케이션 전체 설정
//!
//! 프로세스 시작 시 한 번 구성되어 필요한 컴포넌트에 명시적으로 전달됩니다.

use validator::Validate;

use crate::config::auth_config::{AzureAdOptions, CookieAuthOptions, JwtBearerOptions};
use crate::config::config_source::ConfigSource;
use crate::config::data_config::{Environment, ServerConfig};
use crate::errors::{AppError, AppResult};

/// 모든 옵션 그룹을 묶은 설정 구조체
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub environment: Environment,
    pub server: ServerConfig,
    pub azure_ad: AzureAdOptions,
    pub jwt_bearer: JwtBearerOptions,
    pub cookie: CookieAuthOptions,
}

impl AppSettings {
    /// 현재 프로세스 환경 변수에서 설정을 구성합니다.
    pub fn from_env() -> AppResult<Self> {
        Self::from_source(&ConfigSource::from_env())
    }

    /// 설정 소스에서 모든 옵션 그룹을 바인딩하고 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 필수 키 누락 또는 파싱 실패
    /// * `AppError::ValidationError` - 값이 허용 범위를 벗어난 경우
    pub fn from_source(source: &ConfigSource) -> AppResult<Self> {
        let environment = Environment::from_source(source);

        let settings = Self {
            server: ServerConfig::from_source(source)?,
            azure_ad: AzureAdOptions::from_source(source, &environment)?,
            jwt_bearer: JwtBearerOptions::from_source(source)?,
            cookie: CookieAuthOptions::from_source(source, &environment)?,
            environment,
        };

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> AppResult<()> {
        let checks = [
            ("Server", self.server.validate()),
            ("AzureAd", self.azure_ad.validate()),
            ("JwtBearer", self.jwt_bearer.validate()),
            ("Cookie", self.cookie.validate()),
        ];

        for (group, result) in checks {
            result.map_err(|e| AppError::ValidationError(format!("{}: {}", group, e)))?;
        }

        Ok(())
    }
}
