use std::env;
use std::path::PathBuf;
use std::time::Duration;

// 默认 token 有效期：三年
const DEFAULT_JWT_EXPIRATION_SECS: u64 = 3 * 365 * 24 * 3600;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiration_secs: u64,
    pub bcrypt_cost: u32,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub storage_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let jwt_expiration_secs = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|value| parse_expiration(&value))
            .unwrap_or(DEFAULT_JWT_EXPIRATION_SECS);

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_expiration_secs,
            bcrypt_cost: parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: parse_or("SERVER_PORT", 3000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api".into()),
            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        })
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == "memory"
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// 解析形如 `3y`、`72h`、`30d` 的有效期，返回秒数；无后缀时按小时处理
pub fn parse_expiration(value: &str) -> Option<u64> {
    let value = value.trim();
    let (number, unit_secs) = match value.chars().last()? {
        's' => (&value[..value.len() - 1], 1),
        'm' => (&value[..value.len() - 1], 60),
        'h' => (&value[..value.len() - 1], 3600),
        'd' => (&value[..value.len() - 1], 24 * 3600),
        'y' => (&value[..value.len() - 1], 365 * 24 * 3600),
        _ => (value, 3600),
    };
    number.trim().parse::<u64>().ok()?.checked_mul(unit_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiration_suffixes() {
        assert_eq!(parse_expiration("45s"), Some(45));
        assert_eq!(parse_expiration("24h"), Some(24 * 3600));
        assert_eq!(parse_expiration("2d"), Some(2 * 24 * 3600));
        assert_eq!(parse_expiration("3y"), Some(DEFAULT_JWT_EXPIRATION_SECS));
        assert_eq!(parse_expiration("12"), Some(12 * 3600));
    }

    #[test]
    fn expiration_rejects_garbage() {
        assert_eq!(parse_expiration(""), None);
        assert_eq!(parse_expiration("soon"), None);
        assert_eq!(parse_expiration("h"), None);
        assert_eq!(parse_expiration("18446744073709551615y"), None);
    }
}
