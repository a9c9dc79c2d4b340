//! 전역 인증 필터 샘플 애플리케이션
//!
//! 설정을 읽고 Bearer 토큰과 id_token 검증 키를 준비한 뒤 HTTP 서버를 구동합니다.

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use global_auth_filter::config::AppSettings;
use global_auth_filter::services::auth::{JwtBearerHandler, OpenIdConnectHandler};
use global_auth_filter::startup::{self, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 전역 인증 필터 샘플 시작중...");

    let settings = match AppSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };

    let jwt_bearer = match JwtBearerHandler::from_options(&settings.jwt_bearer).await {
        Ok(handler) => handler,
        Err(e) => {
            error!("Bearer 토큰 검증 키 준비 실패: {}", e);
            std::process::exit(1);
        }
    };

    let open_id_connect = match OpenIdConnectHandler::from_options(&settings.azure_ad).await {
        Ok(handler) => handler,
        Err(e) => {
            error!("OpenID Connect 검증 키 준비 실패: {}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::new(settings, jwt_bearer, open_id_connect) {
        Ok(state) => state,
        Err(e) => {
            error!("애플리케이션 상태 구성 실패: {}", e);
            std::process::exit(1);
        }
    };

    info!("✅ 인증 스킴 초기화 완료 (Cookies, Bearer, OpenIdConnect)");

    startup::run(state).await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 eprintln 사용
    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}
