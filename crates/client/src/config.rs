use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub list: ListConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL the endpoint paths are joined onto.
    pub base_url: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_expenses_path")]
    pub expenses_path: String,

    #[serde(default = "default_requisitions_path")]
    pub requisitions_path: String,

    /// Requisition management listing (manager view).
    #[serde(default = "default_manage_path")]
    pub manage_path: String,

    #[serde(default = "default_review_path")]
    pub review_path: String,

    #[serde(default = "default_submit_path")]
    pub submit_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// JSON file holding the local key-value session.
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// One of `json`, `pretty` or `compact`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

// Default value functions
fn default_request_timeout_ms() -> u64 {
    15_000
}
fn default_expenses_path() -> String {
    "all-expense.php".to_string()
}
fn default_requisitions_path() -> String {
    "all-requisition.php".to_string()
}
fn default_manage_path() -> String {
    "manage_requisitions.php".to_string()
}
fn default_review_path() -> String {
    "approve_reject_requisitions.php".to_string()
}
fn default_submit_path() -> String {
    "add_expense.php".to_string()
}
fn default_session_path() -> PathBuf {
    PathBuf::from(".expense-tracker/session.json")
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}
fn default_page_size() -> usize {
    shared::pagination::DEFAULT_PAGE_SIZE
}

#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl ApiConfig {
    /// Full URL of an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        self.endpoint(endpoint.path(self))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Remote endpoints the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Expenses,
    Requisitions,
    ManageRequisitions,
    Review,
    Submit,
}

impl Endpoint {
    /// Metric and log label.
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Expenses => "expenses",
            Endpoint::Requisitions => "requisitions",
            Endpoint::ManageRequisitions => "manage_requisitions",
            Endpoint::Review => "review",
            Endpoint::Submit => "submit",
        }
    }

    pub fn path<'a>(&self, api: &'a ApiConfig) -> &'a str {
        match self {
            Endpoint::Expenses => &api.expenses_path,
            Endpoint::Requisitions => &api.requisitions_path,
            Endpoint::ManageRequisitions => &api.manage_path,
            Endpoint::Review => &api.review_path,
            Endpoint::Submit => &api.submit_path,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with ET__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("ET").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds from embedded defaults so tests do not depend on the working
    /// directory. Validation is left to the caller.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [api]
            base_url = ""
            request_timeout_ms = 5000
            expenses_path = "all-expense.php"
            requisitions_path = "all-requisition.php"
            manage_path = "manage_requisitions.php"
            review_path = "approve_reject_requisitions.php"
            submit_path = "add_expense.php"

            [session]
            path = "session.json"

            [logging]
            level = "debug"
            format = "pretty"

            [list]
            page_size = 10
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "ET__API__BASE_URL environment variable must be set".to_string(),
            ));
        }

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidValue(format!(
                "api.base_url must be an http(s) URL, got {base_url}"
            )));
        }

        if self.api.request_timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "api.request_timeout_ms cannot be 0".to_string(),
            ));
        }

        if self.list.page_size == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "list.page_size cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}
