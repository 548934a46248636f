use std::{env, fmt, str::FromStr};

/// What update/delete do when no row matches the given id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingRowPolicy {
    /// Zero affected rows counts as success.
    #[default]
    Ignore,
    /// Zero affected rows is reported as `AppError::NotFound`.
    NotFound,
}

impl FromStr for MissingRowPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "not_found" | "not-found" => Ok(Self::NotFound),
            other => Err(anyhow::anyhow!(
                "invalid INVOICE_MISSING_ROW value `{other}` (expected `ignore` or `not_found`)"
            )),
        }
    }
}

impl fmt::Display for MissingRowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => f.write_str("ignore"),
            Self::NotFound => f.write_str("not_found"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub missing_row: MissingRowPolicy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let missing_row = match env::var("INVOICE_MISSING_ROW") {
            Ok(value) => value.parse()?,
            Err(_) => MissingRowPolicy::default(),
        };
        Ok(Self {
            port,
            database_url,
            host,
            missing_row,
        })
    }
}
