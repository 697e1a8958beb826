use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, PartialEq)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_request_timeout_secs: u64,
    pub seed_users: Vec<SeedUser>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = get_required("JWT_SECRET").context("JWT_SECRET is required")?;
        let jwt_ttl_seconds: i64 = std::env::var("JWT_TTL_SECONDS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .context("Failed to parse JWT_TTL_SECONDS, expecting integer")?;

        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }
        if jwt_ttl_seconds <= 0 {
            return Err(anyhow!("JWT_TTL_SECONDS must be > 0"));
        }

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_request_timeout_secs = parse_u64_env("HTTP_REQUEST_TIMEOUT_SECS", 10)?;
        let seed_users = parse_seed_users(&std::env::var("SEED_USERS").unwrap_or_default())?;

        Ok(Self {
            jwt_secret,
            jwt_ttl_seconds,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_request_timeout_secs,
            seed_users,
        })
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `name:password` pairs separated by commas.
fn parse_seed_users(raw: &str) -> Result<Vec<SeedUser>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (username, password) = entry
                .split_once(':')
                .ok_or_else(|| anyhow!("SEED_USERS entry '{entry}' must be name:password"))?;
            Ok(SeedUser {
                username: username.trim().to_string(),
                password: password.to_string(),
            })
        })
        .collect()
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{SeedUser, parse_cors_origins, parse_seed_users};

    #[test]
    fn cors_origins_skip_blank_entries() {
        let origins = parse_cors_origins(" http://a , ,http://b ".to_string());
        assert_eq!(origins, vec!["http://a", "http://b"]);
    }

    #[test]
    fn seed_users_are_parsed_in_order() {
        let users = parse_seed_users("vasya:password, CATS:secret:with:colons").expect("must parse");
        assert_eq!(
            users,
            vec![
                SeedUser {
                    username: "vasya".to_string(),
                    password: "password".to_string(),
                },
                SeedUser {
                    username: "CATS".to_string(),
                    password: "secret:with:colons".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_seed_users_yield_nothing() {
        assert!(parse_seed_users("").expect("must parse").is_empty());
    }

    #[test]
    fn seed_user_without_password_is_rejected() {
        assert!(parse_seed_users("vasya").is_err());
    }
}
