//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 설정 로딩, 인증 처리,
//! 라우트 디스패치에서 발생하는 에러를 하나의 타입으로 다룹니다.
//!
//! 인증 실패는 이 타입으로 클라이언트에게 전달되지 않습니다.
//! 파이프라인 안에서는 `AuthenticateResult::Fail`로 기록만 되고,
//! 최종 응답(401 또는 로그인 리다이렉트)은 `AuthorizeFilter`가 결정합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::{AppError, AppResult};
//!
//! fn audience(source: &ConfigSource) -> AppResult<String> {
//!     source
//!         .get("JwtBearer.Audience")
//!         .map(str::to_string)
//!         .ok_or_else(|| AppError::ConfigurationError("JwtBearer.Audience is required".to_string()))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 설정값 누락 또는 형식 오류 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 라우트 또는 액션을 찾을 수 없음 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 지원하지 않는 HTTP 메서드 (405 Method Not Allowed)
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// 인증 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 아이덴티티 프로바이더 등 외부 서비스 에러 (502 Bad Gateway)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            AppError::ConfigurationError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 애플리케이션 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 크레이트 에러에 컨텍스트 메시지를 붙여 `AppError`로 변환하는 트레이트
pub trait ErrorContext<T> {
    /// 고정 메시지로 컨텍스트를 추가합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 지연 평가되는 메시지로 컨텍스트를 추가합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
