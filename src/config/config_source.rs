//! 키/값 설정 소스
//!
//! 프로세스 환경 변수(및 `dotenv`로 로드된 `.env` 파일)를 하나의 맵으로 읽어
//! 점(`.`)으로 구분된 설정 키로 조회할 수 있게 합니다.
//!
//! 키는 먼저 그대로 조회하고, 없으면 환경 변수 형식으로 변환해 다시 조회합니다.
//!
//! | 설정 키 | 환경 변수 |
//! |---------|-----------|
//! | `JwtBearer.Audience` | `JWT_BEARER_AUDIENCE` |
//! | `AzureAd.TenantId` | `AZURE_AD_TENANT_ID` |
//! | `Cookie.ExpireMinutes` | `COOKIE_EXPIRE_MINUTES` |

use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

/// 설정 키/값 맵
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    values: HashMap<String, String>,
}

impl ConfigSource {
    /// 현재 프로세스의 환경 변수로 소스를 생성합니다.
    pub fn from_env() -> Self {
        Self {
            values: env::vars().collect(),
        }
    }

    /// 임의의 키/값 쌍으로 소스를 생성합니다. 테스트와 임베딩 용도입니다.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 설정값을 조회합니다. 빈 문자열은 설정되지 않은 것으로 취급합니다.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .or_else(|| self.values.get(&env_key(key)))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 설정값을 조회하고 없으면 기본값을 반환합니다.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// 필수 설정값을 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 키가 없거나 값이 비어 있는 경우
    pub fn require(&self, key: &str) -> AppResult<String> {
        self.get(key).map(str::to_string).ok_or_else(|| {
            AppError::ConfigurationError(format!("{} ({}) must be set", key, env_key(key)))
        })
    }

    /// 설정값을 파싱합니다. 키가 없으면 기본값을 사용합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 값이 있지만 파싱할 수 없는 경우
    pub fn parse_or<T>(&self, key: &str, default: T) -> AppResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw.parse::<T>().map_err(|e| {
                AppError::ConfigurationError(format!("{} has invalid value '{}': {}", key, raw, e))
            }),
            None => Ok(default),
        }
    }

    /// `section.name` 형식의 하위 키를 조회하는 섹션 뷰를 반환합니다.
    pub fn section<'a>(&'a self, name: &'a str) -> ConfigSection<'a> {
        ConfigSection { source: self, name }
    }
}

/// 설정 섹션 (`AzureAd`, `JwtBearer` 등)
#[derive(Debug, Clone, Copy)]
pub struct ConfigSection<'a> {
    source: &'a ConfigSource,
    name: &'a str,
}

impl<'a> ConfigSection<'a> {
    /// 섹션 이름과 하위 키를 합친 전체 키를 반환합니다.
    pub fn key(&self, sub_key: &str) -> String {
        format!("{}.{}", self.name, sub_key)
    }

    pub fn get(&self, sub_key: &str) -> Option<&'a str> {
        self.source.get(&self.key(sub_key))
    }

    pub fn get_or(&self, sub_key: &str, default: &str) -> String {
        self.source.get_or(&self.key(sub_key), default)
    }

    pub fn require(&self, sub_key: &str) -> AppResult<String> {
        self.source.require(&self.key(sub_key))
    }

    pub fn parse_or<T>(&self, sub_key: &str, default: T) -> AppResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.source.parse_or(&self.key(sub_key), default)
    }
}

/// 설정 키를 환경 변수 이름으로 변환합니다.
///
/// 각 세그먼트를 PascalCase에서 SCREAMING_SNAKE_CASE로 바꾸고 `_`로 연결합니다.
/// 연속된 대문자(`JWKS`)는 하나의 단어로 유지됩니다.
pub fn env_key(key: &str) -> String {
    key.split(['.', ':'])
        .filter(|segment| !segment.is_empty())
        .map(screaming_snake)
        .collect::<Vec<_>>()
        .join("_")
}

fn screaming_snake(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        if c == '-' {
            out.push('_');
        } else {
            out.extend(c.to_uppercase());
        }
    }

    out
}
