//! 토큰 서명 검증 키
//!
//! Bearer 토큰과 OpenID Connect id_token이 같은 키 선택/discovery 로직을 사용합니다.
//!
//! ```text
//! {authority}/.well-known/openid-configuration ──► issuer, jwks_uri
//! jwks_uri ──► JwkSet ──► 토큰 헤더의 kid로 키 선택
//! ```

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::jwk::{JwkSet, KeyAlgorithm};
use jsonwebtoken::{decode_header, Algorithm, DecodingKey};
use serde::Deserialize;

use crate::errors::{AppError, AppResult, ErrorContext};

/// 토큰 서명 검증 키
pub enum SigningKeys {
    /// HS256 공유 비밀키
    Secret(DecodingKey),
    /// 아이덴티티 프로바이더의 공개키 집합
    Jwks(JwkSet),
}

impl SigningKeys {
    /// 토큰 헤더에 맞는 검증 키와 알고리즘을 고릅니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 헤더 파싱 실패, kid 누락, 알 수 없는 kid,
    ///   지원하지 않는 알고리즘
    pub fn select(&self, token: &str) -> AppResult<(DecodingKey, Algorithm)> {
        match self {
            SigningKeys::Secret(key) => Ok((key.clone(), Algorithm::HS256)),
            SigningKeys::Jwks(jwks) => {
                let header = decode_header(token)
                    .map_err(|e| AppError::AuthenticationError(format!("토큰 헤더 파싱 실패: {}", e)))?;

                let kid = header.kid.as_deref().ok_or_else(|| {
                    AppError::AuthenticationError("토큰에 kid 헤더가 없습니다".to_string())
                })?;

                let jwk = jwks.find(kid).ok_or_else(|| {
                    AppError::AuthenticationError(format!("kid '{}'에 해당하는 키가 없습니다", kid))
                })?;

                let algorithm = match jwk.common.key_algorithm {
                    Some(KeyAlgorithm::RS256) | None => Algorithm::RS256,
                    Some(KeyAlgorithm::RS384) => Algorithm::RS384,
                    Some(KeyAlgorithm::RS512) => Algorithm::RS512,
                    Some(KeyAlgorithm::ES256) => Algorithm::ES256,
                    Some(KeyAlgorithm::ES384) => Algorithm::ES384,
                    Some(other) => {
                        return Err(AppError::AuthenticationError(format!(
                            "지원하지 않는 키 알고리즘: {:?}",
                            other
                        )));
                    }
                };

                let key = DecodingKey::from_jwk(jwk)
                    .map_err(|e| AppError::AuthenticationError(format!("JWK 변환 실패: {}", e)))?;

                Ok((key, algorithm))
            }
        }
    }
}

/// OpenID discovery 문서에서 필요한 필드
#[derive(Debug, Deserialize)]
struct OpenIdConfiguration {
    issuer: String,
    jwks_uri: String,
}

/// discovery 문서와 JWKS를 가져옵니다. `(issuer, keys)`를 반환합니다.
///
/// # Errors
///
/// * `AppError::ExternalServiceError` - 요청 실패 또는 오류 응답
/// * `AppError::InternalError` - 응답 파싱 실패
pub async fn discover(discovery_url: &str) -> AppResult<(String, SigningKeys)> {
    let client = reqwest::Client::new();
    log::info!("🔎 OpenID discovery 문서 요청: {}", discovery_url);

    let configuration: OpenIdConfiguration = fetch_json(&client, discovery_url).await?;
    let jwks: JwkSet = fetch_json(&client, &configuration.jwks_uri).await?;

    log::info!(
        "🔑 JWKS {}개 키 로드 (issuer: {})",
        jwks.keys.len(),
        configuration.issuer
    );

    Ok((configuration.issuer, SigningKeys::Jwks(jwks)))
}

/// `jsonwebtoken` 검증 에러를 인증 에러로 바꿉니다.
pub fn validation_error(e: JwtError) -> AppError {
    match e.kind() {
        ErrorKind::ExpiredSignature => {
            AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
        }
        ErrorKind::InvalidAudience => {
            AppError::AuthenticationError("토큰 audience가 일치하지 않습니다".to_string())
        }
        ErrorKind::InvalidIssuer => {
            AppError::AuthenticationError("토큰 발급자가 일치하지 않습니다".to_string())
        }
        _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
    }
}

async fn fetch_json<T>(client: &reqwest::Client, url: &str) -> AppResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("{} 요청 실패: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(AppError::ExternalServiceError(format!(
            "{} 응답 상태: {}",
            url,
            response.status()
        )));
    }

    response
        .json::<T>()
        .await
        .with_context(|| format!("{} 응답 파싱 실패", url))
}
