//! The root configuration type.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, DispatcherConfig, LogFormat, LoggingSection};

/// Complete Courier configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and the
/// environment.
///
/// # Example
///
/// ```
/// use courier_config::CourierConfig;
///
/// let config = CourierConfig::default();
/// assert_eq!(config.dispatcher.default_verb, "GET");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct CourierConfig {
    /// Dispatcher settings.
    #[serde(default)]
    pub dispatcher: DispatcherConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl CourierConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if:
    /// - `dispatcher.context_path` is not empty and does not start with `/`,
    ///   or ends with `/`
    /// - `dispatcher.default_verb` is not an HTTP method token
    /// - `logging.level` is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let context_path = &self.dispatcher.context_path;
        if !context_path.is_empty() {
            if !context_path.starts_with('/') {
                return Err(ConfigError::invalid_value(
                    "dispatcher.context_path",
                    format!("must start with '/': {context_path}"),
                ));
            }
            if context_path.ends_with('/') {
                return Err(ConfigError::invalid_value(
                    "dispatcher.context_path",
                    format!("must not end with '/': {context_path}"),
                ));
            }
        }

        let verb = &self.dispatcher.default_verb;
        if verb.is_empty() || http::Method::from_bytes(verb.as_bytes()).is_err() {
            return Err(ConfigError::invalid_value(
                "dispatcher.default_verb",
                format!("not an HTTP method: {verb:?}"),
            ));
        }

        if self.logging.enabled {
            if let Err(e) = courier_telemetry::create_env_filter(&self.logging.level) {
                return Err(ConfigError::invalid_value("logging.level", e.to_string()));
            }
        }

        Ok(())
    }

    /// Development preset: pretty debug logs with locations, error detail
    /// exposed.
    ///
    /// ```
    /// use courier_config::{CourierConfig, LogFormat};
    ///
    /// let config = CourierConfig::development();
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// assert!(config.dispatcher.expose_error_detail);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        Self {
            dispatcher: DispatcherConfig {
                expose_error_detail: true,
                ..DispatcherConfig::default()
            },
            logging: LoggingSection {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                span_events: true,
                include_location: true,
                ..LoggingSection::default()
            },
        }
    }

    /// Production preset. Same as the defaults.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// The logging section as a telemetry [`LogConfig`](courier_telemetry::LogConfig).
    #[must_use]
    pub fn log_config(&self) -> courier_telemetry::LogConfig {
        courier_telemetry::LogConfig::from(&self.logging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CourierConfig::default().validate().is_ok());
        assert!(CourierConfig::development().validate().is_ok());
        assert!(CourierConfig::production().validate().is_ok());
    }

    #[test]
    fn test_context_path_validation() {
        let mut config = CourierConfig::default();

        config.dispatcher.context_path = "/shop".to_string();
        assert!(config.validate().is_ok());

        config.dispatcher.context_path = "shop".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "dispatcher.context_path"
        ));

        config.dispatcher.context_path = "/shop/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_verb_validation() {
        let mut config = CourierConfig::default();

        config.dispatcher.default_verb = "POST".to_string();
        assert!(config.validate().is_ok());

        config.dispatcher.default_verb = String::new();
        assert!(config.validate().is_err());

        config.dispatcher.default_verb = "GE T".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "dispatcher.default_verb"
        ));
    }

    #[test]
    fn test_log_level_validation() {
        let mut config = CourierConfig::default();
        config.logging.level = "courier=notalevel".to_string();
        assert!(config.validate().is_err());

        config.logging.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_config() {
        let log = CourierConfig::development().log_config();
        assert_eq!(log.level, "debug");
        assert_eq!(log.format, courier_telemetry::LogFormat::Pretty);
        assert!(log.span_events);
        assert!(log.file_line_info);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CourierConfig::development();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CourierConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
