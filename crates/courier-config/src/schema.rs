//! Configuration sections.

use serde::{Deserialize, Serialize};

/// Dispatcher section.
///
/// # Example
///
/// ```
/// use courier_config::DispatcherConfig;
///
/// let config = DispatcherConfig {
///     context_path: "/shop".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(config.default_verb, "GET");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Prefix removed from every request path before matching.
    #[serde(default)]
    pub context_path: String,

    /// Verb given to route definitions that do not name one.
    #[serde(default = "default_verb")]
    pub default_verb: String,

    /// Include the full error chain in server error bodies.
    #[serde(default)]
    pub expose_error_detail: bool,

    /// Content type of JSON envelopes.
    #[serde(default = "default_json_content_type")]
    pub json_content_type: String,

    /// Body of not-found outcomes.
    #[serde(default = "default_not_found_message")]
    pub not_found_message: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            context_path: String::new(),
            default_verb: default_verb(),
            expose_error_detail: false,
            json_content_type: default_json_content_type(),
            not_found_message: default_not_found_message(),
        }
    }
}

fn default_verb() -> String {
    "GET".to_string()
}

fn default_json_content_type() -> String {
    "application/json;charset=UTF-8".to_string()
}

fn default_not_found_message() -> String {
    "Route not found".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// JSON lines.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
    /// Single-line human-readable output.
    Compact,
}

impl From<LogFormat> for courier_telemetry::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (e.g. "info", "courier_router=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Log span creation and close.
    #[serde(default)]
    pub span_events: bool,

    /// Include file and line in events.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::Json,
            span_events: false,
            include_location: false,
        }
    }
}

impl From<&LoggingSection> for courier_telemetry::LogConfig {
    fn from(section: &LoggingSection) -> Self {
        Self {
            enabled: section.enabled,
            level: section.level.clone(),
            format: section.format.into(),
            span_events: section.span_events,
            file_line_info: section.include_location,
            ..Self::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
