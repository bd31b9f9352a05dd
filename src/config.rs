use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub reset_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `None` runs the server against the in-process user store.
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    /// Echo the reset token in the forgot-password response (no mail transport yet).
    pub expose_reset_token: bool,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "crolens".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "crolens-users".into()),
            ttl_minutes: parse_env("JWT_TTL_MINUTES").unwrap_or(60 * 24),
            reset_ttl_minutes: parse_env("RESET_TTL_MINUTES").unwrap_or(60),
        };
        let expose_reset_token = std::env::var("EXPOSE_RESET_TOKEN")
            .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_env("APP_PORT").unwrap_or(8080);

        Ok(Self {
            database_url,
            jwt,
            expose_reset_token,
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = AppConfig {
            database_url: None,
            jwt: JwtConfig {
                secret: "s".into(),
                issuer: "i".into(),
                audience: "a".into(),
                ttl_minutes: 1,
                reset_ttl_minutes: 1,
            },
            expose_reset_token: false,
            host: "127.0.0.1".into(),
            port: 3001,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:3001");
    }

    #[test]
    fn parse_env_ignores_garbage() {
        std::env::set_var("CROLENS_TEST_PARSE_ENV", "not-a-number");
        assert_eq!(parse_env::<i64>("CROLENS_TEST_PARSE_ENV"), None);
        std::env::set_var("CROLENS_TEST_PARSE_ENV", "42");
        assert_eq!(parse_env::<i64>("CROLENS_TEST_PARSE_ENV"), Some(42));
        std::env::remove_var("CROLENS_TEST_PARSE_ENV");
    }
}
