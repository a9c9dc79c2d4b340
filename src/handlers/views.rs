//! HTML 뷰 렌더링
//!
//! 컨트롤러와 예외 페이지가 사용하는 최소한의 HTML 템플릿입니다.

use crate::config::{LOGIN_PATH, LOGOUT_PATH};
use crate::domain::{AuthenticatedUser, Principal};

/// 공통 레이아웃
pub fn layout(title: &str, principal: &Principal, body: &str) -> String {
    let nav = match principal.primary() {
        Some(user) => format!(
            r#"<span>Hello, {}!</span> <a href="/Account/Profile">Profile</a> <a href="{}">Sign out</a>"#,
            escape_html(&user.name),
            LOGOUT_PATH
        ),
        None => format!(r#"<a href="{}">Sign in</a>"#, LOGIN_PATH),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title} - Global Auth Filter Sample</title>
    <link rel="stylesheet" href="/css/site.css" />
</head>
<body>
    <nav><a href="/">Home</a> <a href="/Home/About">About</a> {nav}</nav>
    <main>
{body}
    </main>
</body>
</html>"#,
        title = escape_html(title),
        nav = nav,
        body = body,
    )
}

pub fn home_index(principal: &Principal) -> String {
    let name = principal.primary().map(|u| u.name.as_str()).unwrap_or("guest");
    layout(
        "Home",
        principal,
        &format!(
            "<h1>Welcome, {}</h1>\n<p>Every page in this application requires a signed-in user.</p>",
            escape_html(name)
        ),
    )
}

pub fn home_about(principal: &Principal) -> String {
    layout(
        "About",
        principal,
        "<h1>About</h1>\n<p>Requests are authenticated with a session cookie or a bearer token \
         and authorized by the global <code>Authenticated</code> policy.</p>",
    )
}

/// 일반 에러 페이지 (비개발 환경)
pub fn error_page(request_id: &str) -> String {
    layout(
        "Error",
        &Principal::default(),
        &format!(
            "<h1 class=\"text-danger\">Error.</h1>\n<h2>An error occurred while processing your request.</h2>\n\
             <p><strong>Request ID:</strong> <code>{}</code></p>",
            escape_html(request_id)
        ),
    )
}

/// 상세 예외 페이지 (개발 환경)
pub fn developer_exception_page(method: &str, path: &str, error: &str, detail: &str, headers: &[String]) -> String {
    let header_items = headers
        .iter()
        .map(|h| format!("<li><code>{}</code></li>", escape_html(h)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8" /><title>Internal Server Error</title></head>
<body>
    <h1>An unhandled exception occurred while processing the request.</h1>
    <h2>{error}</h2>
    <p><strong>{method}</strong> <code>{path}</code></p>
    <h3>Details</h3>
    <pre>{detail}</pre>
    <h3>Request headers</h3>
    <ul>
{header_items}
    </ul>
</body>
</html>"#,
        error = escape_html(error),
        method = escape_html(method),
        path = escape_html(path),
        detail = escape_html(detail),
        header_items = header_items,
    )
}

pub fn signed_out() -> String {
    layout(
        "Signed out",
        &Principal::default(),
        "<h2>You have successfully signed out.</h2>",
    )
}

pub fn profile(principal: &Principal) -> String {
    let sections = principal
        .identities
        .iter()
        .map(identity_section)
        .collect::<Vec<_>>()
        .join("\n");

    layout("Profile", principal, &format!("<h1>Profile</h1>\n{}", sections))
}

fn identity_section(user: &AuthenticatedUser) -> String {
    let mut rows = vec![
        ("sub", user.subject.clone()),
        ("name", user.name.clone()),
    ];
    if let Some(email) = &user.email {
        rows.push(("email", email.clone()));
    }
    if !user.roles.is_empty() {
        rows.push(("roles", user.roles.join(", ")));
    }

    let rows = rows
        .into_iter()
        .map(|(k, v)| format!("<tr><th>{}</th><td>{}</td></tr>", k, escape_html(&v)))
        .collect::<Vec<_>>()
        .join("");

    format!("<h2>{}</h2>\n<table>{}</table>", user.scheme, rows)
}

/// HTML 특수문자 이스케이프
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthScheme;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_profile_lists_each_identity() {
        let principal = Principal::new(vec![AuthenticatedUser {
            subject: "u1".to_string(),
            name: "<Eve>".to_string(),
            email: Some("eve@contoso.com".to_string()),
            roles: vec!["a".to_string(), "b".to_string()],
            scheme: AuthScheme::Cookies,
        }]);

        let html = profile(&principal);
        assert!(html.contains("<h2>Cookies</h2>"));
        assert!(html.contains("&lt;Eve&gt;"));
        assert!(html.contains("a, b"));
        assert!(!html.contains("<Eve>"));
    }

    #[test]
    fn test_layout_links_follow_login_state() {
        let anonymous = layout("t", &Principal::default(), "");
        assert!(anonymous.contains(r#"href="/Account/SignIn""#));
        assert!(!anonymous.contains(r#"href="/Account/SignOut""#));

        let principal = Principal::new(vec![AuthenticatedUser {
            subject: "u1".to_string(),
            name: "Eve".to_string(),
            email: None,
            roles: vec![],
            scheme: AuthScheme::Cookies,
        }]);
        assert!(layout("t", &principal, "").contains(r#"href="/Account/SignOut""#));
    }
}
