use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Where catalog items come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Live Postgres catalog (`DATABASE_URL` required).
    Postgres { database_url: String, max_connections: u32 },
    /// In-memory catalog, seeded from `FIXTURE_PATH` or the built-in demo set.
    Fixture { path: Option<PathBuf>, read_only: bool },
}

/// The single admin account allowed to upload items.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

/// Local object storage for uploaded covers.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory objects are written to and served from.
    pub root: PathBuf,
    /// URL prefix under which `root` is publicly reachable.
    pub public_base_url: String,
    /// Upper bound for a single cover upload.
    pub max_cover_bytes: usize,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development, except
/// the secrets. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub data_source: DataSource,
    pub jwt: JwtConfig,
    pub admin: AdminConfig,
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATA_SOURCE`          | `postgres`                 |
    /// | `DATABASE_URL`         | -- (required for postgres) |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    /// | `FIXTURE_PATH`         | -- (built-in demo items)   |
    /// | `FIXTURE_READ_ONLY`    | `false`                    |
    /// | `ADMIN_USERNAME`       | `admin`                    |
    /// | `ADMIN_PASSWORD_HASH`  | -- (required)              |
    /// | `STORAGE_ROOT`         | `storage`                  |
    /// | `PUBLIC_MEDIA_URL`     | `/media`                   |
    /// | `MAX_COVER_BYTES`      | `10485760`                 |
    ///
    /// # Panics
    ///
    /// Panics on malformed values or missing required secrets. Misconfiguration
    /// should stop the server at startup, not surface on the first request.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = parse_env("PORT", "3000");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_env("REQUEST_TIMEOUT_SECS", "30");

        let data_source = match std::env::var("DATA_SOURCE")
            .unwrap_or_else(|_| "postgres".into())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => DataSource::Postgres {
                database_url: std::env::var("DATABASE_URL")
                    .expect("DATABASE_URL must be set when DATA_SOURCE=postgres"),
                max_connections: parse_env("DB_MAX_CONNECTIONS", "10"),
            },
            "fixture" => DataSource::Fixture {
                path: std::env::var("FIXTURE_PATH").ok().map(PathBuf::from),
                read_only: parse_env("FIXTURE_READ_ONLY", "false"),
            },
            other => panic!("DATA_SOURCE must be 'postgres' or 'fixture', got '{other}'"),
        };

        let admin = AdminConfig {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            password_hash: std::env::var("ADMIN_PASSWORD_HASH")
                .expect("ADMIN_PASSWORD_HASH must be set in the environment"),
        };
        assert!(
            admin.password_hash.starts_with("$argon2"),
            "ADMIN_PASSWORD_HASH must be an argon2 PHC string"
        );

        let storage = StorageConfig {
            root: PathBuf::from(
                std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage".into()),
            ),
            public_base_url: std::env::var("PUBLIC_MEDIA_URL")
                .unwrap_or_else(|_| "/media".into()),
            max_cover_bytes: parse_env("MAX_COVER_BYTES", "10485760"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            data_source,
            jwt: JwtConfig::from_env(),
            admin,
            storage,
        }
    }
}

fn parse_env<T>(name: &str, default: &str) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(name).unwrap_or_else(|_| default.into());
    raw.parse()
        .unwrap_or_else(|e| panic!("{name} must be a valid {}: {e}", std::any::type_name::<T>()))
}
