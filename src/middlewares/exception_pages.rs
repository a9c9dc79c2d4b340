//! 처리되지 않은 오류(500)를 환경별 예외 페이지로 바꿉니다.
//!
//! - Development: 오류 메시지와 요청 정보를 담은 상세 페이지
//! - 그 외: `Home/Error` 일반 에러 페이지 (요청 ID 포함)

use actix_web::body::EitherBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpResponse, Result};

use crate::config::Environment;
use crate::handlers::views;

/// 환경에 맞는 예외 페이지 미들웨어를 만듭니다.
pub fn exception_pages<B: 'static>(environment: &Environment) -> ErrorHandlers<B> {
    if environment.is_development() {
        ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, developer_exception_page)
    } else {
        ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, generic_error_page)
    }
}

fn developer_exception_page<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let (error, detail) = match res.response().error() {
        Some(err) => (err.to_string(), format!("{:?}", err)),
        None => (
            "Internal Server Error".to_string(),
            "응답에 연결된 오류 정보가 없습니다.".to_string(),
        ),
    };

    let request = res.request();
    let headers = request
        .headers()
        .iter()
        .filter(|(name, _)| *name != header::AUTHORIZATION && *name != header::COOKIE)
        .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("<binary>")))
        .collect::<Vec<_>>();

    log::error!("처리되지 않은 오류: {} {} - {}", request.method(), request.path(), error);

    let html = views::developer_exception_page(
        request.method().as_str(),
        request.path(),
        &error,
        &detail,
        &headers,
    );

    Ok(replace_body(res, html))
}

fn generic_error_page<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let request_id = uuid::Uuid::new_v4().to_string();

    if let Some(err) = res.response().error() {
        log::error!(
            "처리되지 않은 오류 [{}]: {} {} - {}",
            request_id,
            res.request().method(),
            res.request().path(),
            err
        );
    }

    Ok(replace_body(res, views::error_page(&request_id)))
}

fn replace_body<B>(res: ServiceResponse<B>, html: String) -> ErrorHandlerResponse<B> {
    let (req, _) = res.into_parts();
    let mut response = HttpResponse::InternalServerError().body(html);
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    let res: ServiceResponse<EitherBody<B>> =
        ServiceResponse::new(req, response).map_into_right_body();
    ErrorHandlerResponse::Response(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use actix_web::{test, web, App};

    async fn boom() -> Result<HttpResponse, AppError> {
        Err(AppError::InternalError("<db> 연결 끊김".to_string()))
    }

    #[actix_web::test]
    async fn test_development_shows_details() {
        let app = test::init_service(
            App::new()
                .wrap(exception_pages(&Environment::Development))
                .route("/boom", web::get().to(boom)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/boom").to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
        assert!(body.contains("An unhandled exception occurred"));
        assert!(body.contains("&lt;db&gt; 연결 끊김"));
        assert!(body.contains("/boom"));
    }

    #[actix_web::test]
    async fn test_production_hides_details() {
        let app = test::init_service(
            App::new()
                .wrap(exception_pages(&Environment::Production))
                .route("/boom", web::get().to(boom)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/boom").to_request()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
        assert!(body.contains("An error occurred while processing your request."));
        assert!(body.contains("Request ID:"));
        assert!(!body.contains("연결 끊김"));
    }

    #[actix_web::test]
    async fn test_client_errors_pass_through() {
        let app = test::init_service(
            App::new()
                .wrap(exception_pages(&Environment::Production))
                .route(
                    "/missing",
                    web::get().to(|| async { Err::<HttpResponse, _>(AppError::NotFound("없음".into())) }),
                ),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
