//! 라우트 템플릿
//!
//! `{controller=Home}/{action=Index}/{id?}` 형식의 템플릿을 파싱하고
//! 요청 경로에서 라우트 값을 추출합니다.
//!
//! - `{name}` - 필수 파라미터
//! - `{name=Default}` - 생략 시 기본값을 사용하는 파라미터
//! - `{name?}` - 생략 가능한 파라미터
//! - 그 외 - 리터럴 세그먼트 (대소문자 무관)

use std::collections::HashMap;

use crate::errors::{AppError, AppResult};

/// 기본 catch-all 라우트 템플릿
pub const DEFAULT_ROUTE_TEMPLATE: &str = "{controller=Home}/{action=Index}/{id?}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Parameter {
        name: String,
        default: Option<String>,
        optional: bool,
    },
}

/// 파싱된 라우트 템플릿
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    segments: Vec<Segment>,
}

/// 경로 매칭 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteValues {
    values: HashMap<String, String>,
}

impl RouteValues {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn controller(&self) -> &str {
        self.get("controller").unwrap_or_default()
    }

    pub fn action(&self) -> &str {
        self.get("action").unwrap_or_default()
    }

    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }

    /// (controller, action)이 주어진 값과 같은지 대소문자 무관하게 비교합니다.
    pub fn is(&self, controller: &str, action: &str) -> bool {
        self.controller().eq_ignore_ascii_case(controller)
            && self.action().eq_ignore_ascii_case(action)
    }
}

impl RouteTemplate {
    /// 템플릿 문자열을 파싱합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigurationError` - 중괄호 불일치, 빈 파라미터 이름,
    ///   선택 파라미터 뒤에 필수 세그먼트가 오는 경우
    pub fn parse(template: &str) -> AppResult<Self> {
        let segments = template
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|raw| parse_segment(template, raw))
            .collect::<AppResult<Vec<_>>>()?;

        let mut seen_optional = false;
        for segment in &segments {
            let skippable = matches!(
                segment,
                Segment::Parameter { default: Some(_), .. } | Segment::Parameter { optional: true, .. }
            );
            if seen_optional && !skippable {
                return Err(AppError::ConfigurationError(format!(
                    "route template '{}' has a required segment after an optional one",
                    template
                )));
            }
            seen_optional |= skippable;
        }

        Ok(Self { segments })
    }

    /// 요청 경로를 템플릿에 매칭합니다.
    ///
    /// 경로 세그먼트가 템플릿보다 많거나, 리터럴이 다르거나,
    /// 기본값 없는 필수 파라미터가 빠진 경우 `None`을 반환합니다.
    pub fn match_path(&self, path: &str) -> Option<RouteValues> {
        let trimmed = path.trim_matches('/');
        let parts: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        if parts.len() > self.segments.len() || parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        let mut values = HashMap::new();
        for (i, segment) in self.segments.iter().enumerate() {
            let part = parts.get(i).copied();
            match (segment, part) {
                (Segment::Literal(literal), Some(part)) => {
                    if !literal.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                (Segment::Literal(_), None) => return None,
                (Segment::Parameter { name, .. }, Some(part)) => {
                    values.insert(name.clone(), part.to_string());
                }
                (Segment::Parameter { name, default: Some(default), .. }, None) => {
                    values.insert(name.clone(), default.clone());
                }
                (Segment::Parameter { optional: true, .. }, None) => {}
                (Segment::Parameter { .. }, None) => return None,
            }
        }

        Some(RouteValues { values })
    }
}

fn parse_segment(template: &str, raw: &str) -> AppResult<Segment> {
    let invalid = |reason: &str| {
        AppError::ConfigurationError(format!("route template '{}': {} in '{}'", template, reason, raw))
    };

    match (raw.starts_with('{'), raw.ends_with('}')) {
        (true, true) => {
            let inner = &raw[1..raw.len() - 1];
            let (name, default, optional) = if let Some((name, default)) = inner.split_once('=') {
                (name, Some(default.to_string()), false)
            } else if let Some(name) = inner.strip_suffix('?') {
                (name, None, true)
            } else {
                (inner, None, false)
            };

            if name.is_empty() || name.contains(['{', '}']) {
                return Err(invalid("invalid parameter name"));
            }

            Ok(Segment::Parameter {
                name: name.to_string(),
                default,
                optional,
            })
        }
        (false, false) if !raw.contains(['{', '}']) => Ok(Segment::Literal(raw.to_string())),
        _ => Err(invalid("unbalanced braces")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_route() -> RouteTemplate {
        RouteTemplate::parse(DEFAULT_ROUTE_TEMPLATE).unwrap()
    }

    #[test]
    fn test_default_template_segments() {
        let expected = |name: &str, default: Option<&str>, optional: bool| Segment::Parameter {
            name: name.to_string(),
            default: default.map(str::to_string),
            optional,
        };

        assert_eq!(
            default_route().segments,
            vec![
                expected("controller", Some("Home"), false),
                expected("action", Some("Index"), false),
                expected("id", None, true),
            ]
        );
    }

    #[test]
    fn test_defaults_fill_missing_segments() {
        let route = default_route();

        let values = route.match_path("/").unwrap();
        assert_eq!(values.controller(), "Home");
        assert_eq!(values.action(), "Index");
        assert_eq!(values.id(), None);

        let values = route.match_path("/Account").unwrap();
        assert!(values.is("account", "index"));
    }

    #[test]
    fn test_full_path_match() {
        let route = default_route();
        let values = route.match_path("/Orders/Details/42").unwrap();

        assert_eq!(values.controller(), "Orders");
        assert_eq!(values.action(), "Details");
        assert_eq!(values.id(), Some("42"));
    }

    #[test]
    fn test_too_many_segments_do_not_match() {
        let route = default_route();
        assert!(route.match_path("/a/b/c/d").is_none());
        assert!(route.match_path("/Home//Index").is_none());
    }

    #[test]
    fn test_literal_and_required_segments() {
        let route = RouteTemplate::parse("api/{resource}/{id?}").unwrap();

        let values = route.match_path("/API/orders").unwrap();
        assert_eq!(values.get("resource"), Some("orders"));
        assert!(route.match_path("/api").is_none());
        assert!(route.match_path("/other/orders").is_none());
    }

    #[test]
    fn test_invalid_templates() {
        assert!(RouteTemplate::parse("{controller").is_err());
        assert!(RouteTemplate::parse("{}").is_err());
        assert!(RouteTemplate::parse("{id?}/{action}").is_err());
    }
}
