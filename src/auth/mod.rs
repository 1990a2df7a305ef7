//! Session-cookie handling.
//!
//! The session credential is an opaque `jwt` cookie minted by the backend
//! at login. The portal never inspects the token; it only checks that the
//! cookie is present and forwards the whole `Cookie` header upstream.
//! Requests without it are rejected before any backend call is made.

use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::Config;
use crate::errors::AppError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "jwt";

/// Extract the value of the `jwt` cookie from a `Cookie` header.
pub fn session_token(cookie_header: &str) -> Option<&str> {
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            pair.strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|token| !token.is_empty())
}

/// The inbound `Cookie` header of an authenticated request, forwarded
/// verbatim to the backend.
#[derive(Debug, Clone)]
pub struct SessionCookie(pub String);

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookie_header = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Session credential not found".to_string()))?;

        if session_token(cookie_header).is_none() {
            return Err(AppError::Unauthorized(
                "Session credential not found".to_string(),
            ));
        }

        Ok(SessionCookie(cookie_header.to_string()))
    }
}

/// Middleware guarding page routes: no session cookie, no backend call.
pub async fn require_session(request: Request, next: Next) -> Response {
    let has_session = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(session_token)
        .is_some();

    if has_session {
        next.run(request).await
    } else {
        AppError::Unauthorized("Session credential not found".to_string()).into_response()
    }
}

/// Find the `jwt` cookie among the backend's `Set-Cookie` headers.
pub fn harvest_session_cookie(set_cookies: &[String]) -> Option<String> {
    set_cookies.iter().find_map(|cookie| {
        let value = cookie
            .trim()
            .strip_prefix(SESSION_COOKIE)?
            .strip_prefix('=')?;
        let token = value.split(';').next()?.trim();
        (!token.is_empty()).then(|| token.to_string())
    })
}

/// Session cookie re-issued on the portal's own origin after login.
pub fn issue_cookie(token: &str, config: &Config) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, config.session_max_age
    );
    if config.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Expired cookie sent on logout.
pub fn clear_cookie(config: &Config) -> String {
    let mut cookie = format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE
    );
    if config.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_found() {
        assert_eq!(session_token("jwt=abc123"), Some("abc123"));
        assert_eq!(session_token("theme=dark; jwt=abc123"), Some("abc123"));
        assert_eq!(session_token("theme=dark;  jwt=abc123 "), Some("abc123"));
    }

    #[test]
    fn test_session_token_missing_or_empty() {
        assert_eq!(session_token("theme=dark"), None);
        assert_eq!(session_token("jwt="), None);
        // A cookie merely containing the letters is not the session cookie.
        assert_eq!(session_token("not_jwt=abc"), None);
    }

    #[test]
    fn test_harvest_session_cookie() {
        let set_cookies = vec![
            "lang=es; Path=/".to_string(),
            "jwt=tok-55; HttpOnly; Path=/".to_string(),
        ];
        assert_eq!(harvest_session_cookie(&set_cookies), Some("tok-55".into()));
        assert_eq!(harvest_session_cookie(&["lang=es".to_string()]), None);
    }

    #[test]
    fn test_issue_and_clear_cookie() {
        let mut config = Config {
            backend_url: "http://b".into(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".into(),
            session_max_age: 3600,
            secure_cookies: false,
        };
        assert_eq!(
            issue_cookie("tok", &config),
            "jwt=tok; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600"
        );
        config.secure_cookies = true;
        assert!(issue_cookie("tok", &config).ends_with("; Secure"));
        assert!(clear_cookie(&config).contains("Max-Age=0"));
    }
}
