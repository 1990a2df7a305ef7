//! Configuration module for the portal server.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the external school backend (no trailing slash)
    pub backend_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Lifetime of the session cookie re-issued on login, in seconds
    pub session_max_age: u64,
    /// Mark the session cookie as Secure (behind TLS)
    pub secure_cookies: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let backend_url = env::var("PORTAL_BACKEND_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = env::var("PORTAL_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .expect("Invalid PORTAL_BIND_ADDR format");

        let log_level = env::var("PORTAL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let session_max_age = env::var("PORTAL_SESSION_MAX_AGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60 * 60 * 24 * 7);

        let secure_cookies = env::var("PORTAL_SECURE_COOKIES")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            backend_url,
            bind_addr,
            log_level,
            session_max_age,
            secure_cookies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("PORTAL_BACKEND_URL");
        env::remove_var("PORTAL_BIND_ADDR");
        env::remove_var("PORTAL_LOG_LEVEL");
        env::remove_var("PORTAL_SESSION_MAX_AGE");
        env::remove_var("PORTAL_SECURE_COOKIES");

        let config = Config::from_env();

        assert_eq!(config.backend_url, "http://127.0.0.1:8000");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.session_max_age, 60 * 60 * 24 * 7);
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_backend_url_trailing_slash_trimmed() {
        env::set_var("PORTAL_BACKEND_URL", "http://school.example/");
        let config = Config::from_env();
        assert_eq!(config.backend_url, "http://school.example");
        env::remove_var("PORTAL_BACKEND_URL");
    }
}
