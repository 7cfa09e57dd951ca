use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings shared by every paginated screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Entities requested per page (default: 10).
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Messages handled in one drain before a backlog warning (default: 256).
    #[serde(default = "default_mailbox_warn_depth")]
    pub mailbox_warn_depth: usize,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_page_size() -> usize {
    10
}

fn default_mailbox_warn_depth() -> usize {
    256
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            mailbox_warn_depth: default_mailbox_warn_depth(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
