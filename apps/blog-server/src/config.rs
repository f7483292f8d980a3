//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::{DatabaseConfig, JwtConfig};

/// Templates shipped with the crate.
const DEFAULT_VIEWS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/views");

/// Application configuration. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// `Secure` attribute on the session cookie.
    pub secure_cookie: bool,
    pub views_dir: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            secure_cookie: env::var("SECURE_COOKIE")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            views_dir: env::var("VIEWS_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_VIEWS_DIR.to_string()),
        }
    }
}

/// Only an explicit `false` turns a flag off.
fn parse_flag(value: &str) -> bool {
    !value.trim().eq_ignore_ascii_case("false")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" FALSE "));
        assert!(parse_flag("true"));
        assert!(parse_flag("0"));
        assert!(parse_flag(""));
    }
}
