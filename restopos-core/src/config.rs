/// Core configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/restopos | Settings and log files |
/// | SUBMIT_TIMEOUT_MS | 30000 | Order submission deadline (ms) |
/// | TABLE_STATUS_RETRIES | 2 | Retries for the post-submit table status write |
/// | ENVIRONMENT | development | Runtime environment |
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Working directory for settings and log files
    pub work_dir: String,
    /// Order submission deadline in milliseconds
    pub submit_timeout_ms: u64,
    /// Retry budget for the idempotent table status write
    pub table_status_retries: u32,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl CoreConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/restopos".into()),
            submit_timeout_ms: std::env::var("SUBMIT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            table_status_retries: std::env::var("TABLE_STATUS_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the work dir, keeping everything else from the environment
    ///
    /// Mostly for tests.
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    pub fn submit_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.submit_timeout_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
