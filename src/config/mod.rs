//! # Configuration Module
//!
//! 설정 관리를 담당하는 모듈입니다.
//! 환경 변수(및 `.env` 파일)를 키/값 소스로 읽어 타입이 있는 옵션 구조체로 바인딩하고,
//! 시작 시 한 번 [`AppSettings`]로 묶어 각 컴포넌트에 명시적으로 전달합니다.
//!
//! ## 모듈 구성
//!
//! - [`config_source`] - 키/값 소스와 키 이름 변환
//! - [`data_config`] - 실행 환경, 서버 바인딩
//! - [`auth_config`] - AzureAd, JwtBearer, Cookie 옵션 그룹
//! - [`app_settings`] - 전체 설정 구조체
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use global_auth_filter::config::AppSettings;
//!
//! let settings = AppSettings::from_env()?;
//! println!("Server will bind to {}", settings.server.bind_address());
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export ENVIRONMENT="production"   # development, test, staging, production
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export WEB_ROOT="wwwroot"
//!
//! export AZURE_AD_INSTANCE="https://login.microsoftonline.com/"
//! export AZURE_AD_TENANT_ID="your-tenant-id"
//! export AZURE_AD_CLIENT_ID="your-client-id"
//!
//! export JWT_BEARER_AUDIENCE="api://your-api"
//! export JWT_BEARER_AUTHORITY="https://login.microsoftonline.com/your-tenant-id/v2.0"
//!
//! export COOKIE_SIGNING_KEY="at-least-32-bytes-of-random-data"
//! ```

pub mod app_settings;
pub mod auth_config;
pub mod config_source;
pub mod data_config;

pub use app_settings::*;
pub use auth_config::*;
pub use config_source::*;
pub use data_config::*;
