use mailadmin_core::search::{
    OutOfRangePolicy, PagingPolicy, SmallSizePolicy, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Page sizing and out-of-range handling for list endpoints.
    pub paging: PagingPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `3000`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `PAGE_DEFAULT_SIZE`        | `20`                    |
    /// | `PAGE_MAX_SIZE`            | `100`                   |
    /// | `PAGE_SMALL_SIZE_POLICY`   | `honor` (or `floor`)    |
    /// | `PAGE_OUT_OF_RANGE_POLICY` | `clamp` (or `empty`)    |
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_size: i64 = var("PAGE_DEFAULT_SIZE", &DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .expect("PAGE_DEFAULT_SIZE must be a valid i64");

        let max_size: i64 = var("PAGE_MAX_SIZE", &MAX_PAGE_SIZE.to_string())
            .parse()
            .expect("PAGE_MAX_SIZE must be a valid i64");

        let small_size: SmallSizePolicy = var("PAGE_SMALL_SIZE_POLICY", "honor")
            .parse()
            .unwrap_or_else(|e| panic!("Invalid PAGE_SMALL_SIZE_POLICY: {e}"));

        let out_of_range: OutOfRangePolicy = var("PAGE_OUT_OF_RANGE_POLICY", "clamp")
            .parse()
            .unwrap_or_else(|e| panic!("Invalid PAGE_OUT_OF_RANGE_POLICY: {e}"));

        let paging = PagingPolicy::new(default_size, max_size, small_size, out_of_range)
            .unwrap_or_else(|e| panic!("Invalid paging configuration: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            paging,
        }
    }
}
