use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

/// Cross-origin callers allowed to hit the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub allowed_origins: AllowedOrigins,
    pub store_timeout: Duration,
    pub seed_count: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            db_path: PathBuf::from("gallery.db"),
            allowed_origins: AllowedOrigins::Any,
            store_timeout: Duration::from_millis(5000),
            seed_count: 100,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            host: try_load("GALLERY_HOST", defaults.host),
            port: try_load("GALLERY_PORT", defaults.port),
            db_path: PathBuf::from(try_load(
                "GALLERY_DB_PATH",
                defaults.db_path.display().to_string(),
            )),
            allowed_origins: var("GALLERY_ALLOWED_ORIGINS")
                .map(|raw| AllowedOrigins::parse(&raw))
                .unwrap_or(defaults.allowed_origins),
            store_timeout: Duration::from_millis(try_load(
                "GALLERY_STORE_TIMEOUT_MS",
                defaults.store_timeout.as_millis() as u64,
            )),
            seed_count: try_load("GALLERY_SEED_COUNT", defaults.seed_count),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
    }
}
