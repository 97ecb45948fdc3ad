//! Error types for Courier.
//!
//! [`CourierError`] covers every failure that ends a request: no route,
//! a scalar that does not parse, a parameter that cannot be bound at all,
//! or a handler that fails. Recoverable binding problems are not errors;
//! they are reported as [`Degradation`] records instead.

use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`CourierError`].
pub type CourierResult<T> = Result<T, CourierError>;

/// Broad classification of a [`CourierError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// No route accepted the request.
    NotFound,
    /// A route definition was rejected at registration.
    BadRoute,
    /// Request data could not be turned into handler arguments.
    Binding,
    /// The handler itself failed.
    Handler,
}

impl ErrorCategory {
    /// Returns the HTTP status code for this category.
    #[must_use]
    pub const fn default_status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRoute | Self::Binding | Self::Handler => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Standard error type for Courier.
#[derive(Error, Debug)]
pub enum CourierError {
    /// No registered route accepts the verb and path.
    #[error("No route for {verb} {path}")]
    NoRouteMatch {
        /// Request verb.
        verb: String,
        /// Request path, context path removed.
        path: String,
    },

    /// A scalar parameter's value does not parse as its declared type.
    #[error("Parameter '{param}': cannot convert '{value}' to {target}")]
    ScalarCoercion {
        /// Parameter name.
        param: String,
        /// The offending raw value.
        value: String,
        /// Declared type.
        target: String,
    },

    /// An object parameter has no prefixed keys but a plain text value,
    /// which cannot become an object.
    #[error("Parameter '{param}': a text value cannot be bound to {type_name}")]
    UnbindableText {
        /// Parameter name.
        param: String,
        /// Declared object type.
        type_name: String,
    },

    /// The handler returned an error.
    #[error("Handler for route '{route}' failed: {source}")]
    HandlerInvocation {
        /// Pattern of the matched route.
        route: String,
        /// The handler's error.
        #[source]
        source: anyhow::Error,
    },

    /// A route definition was rejected.
    #[error("Invalid route '{pattern}': {reason}")]
    InvalidRoute {
        /// The rejected pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl CourierError {
    /// Creates a no-route error.
    #[must_use]
    pub fn no_route(verb: impl Into<String>, path: impl Into<String>) -> Self {
        Self::NoRouteMatch {
            verb: verb.into(),
            path: path.into(),
        }
    }

    /// Creates a scalar coercion error.
    #[must_use]
    pub fn scalar_coercion(
        param: impl Into<String>,
        value: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::ScalarCoercion {
            param: param.into(),
            value: value.into(),
            target: target.into(),
        }
    }

    /// Creates an unbindable text error.
    #[must_use]
    pub fn unbindable_text(param: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnbindableText {
            param: param.into(),
            type_name: type_name.into(),
        }
    }

    /// Wraps a handler failure with the route it came from.
    pub fn handler(route: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::HandlerInvocation {
            route: route.into(),
            source: source.into(),
        }
    }

    /// Creates an invalid route error.
    #[must_use]
    pub fn invalid_route(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRoute {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NoRouteMatch { .. } => ErrorCategory::NotFound,
            Self::ScalarCoercion { .. } | Self::UnbindableText { .. } => ErrorCategory::Binding,
            Self::HandlerInvocation { .. } => ErrorCategory::Handler,
            Self::InvalidRoute { .. } => ErrorCategory::BadRoute,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().default_status_code()
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoRouteMatch { .. } => "ROUTE_NOT_FOUND",
            Self::ScalarCoercion { .. } => "SCALAR_COERCION_FAILED",
            Self::UnbindableText { .. } => "UNBINDABLE_PARAMETER",
            Self::HandlerInvocation { .. } => "HANDLER_FAILED",
            Self::InvalidRoute { .. } => "INVALID_ROUTE",
        }
    }

    /// Formats the error with its full source chain.
    #[must_use]
    pub fn detail(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            let text = err.to_string();
            if !out.contains(&text) {
                out.push_str(": ");
                out.push_str(&text);
            }
            source = err.source();
        }
        out
    }
}

/// Why a parameter or field was left at its absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationKind {
    /// No value was present in the request.
    Missing,
    /// A value was present but did not fit the declared type.
    Incompatible,
    /// A session parameter was declared but the request has no session.
    NoSession,
}

impl fmt::Display for DegradationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("missing"),
            Self::Incompatible => f.write_str("incompatible"),
            Self::NoSession => f.write_str("no session"),
        }
    }
}

/// A recovered binding problem.
///
/// Produced when a parameter, or one field of an object parameter, could not
/// be filled and was left at its absent value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degradation {
    /// Parameter name.
    pub param: String,
    /// Key path of the field inside an object parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Classification.
    pub kind: DegradationKind,
    /// Human-readable explanation.
    pub reason: String,
}

impl Degradation {
    /// A parameter with no value in the request.
    #[must_use]
    pub fn missing(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            field: None,
            kind: DegradationKind::Missing,
            reason: "no value in request".to_string(),
        }
    }

    /// A session parameter on a request without a session.
    #[must_use]
    pub fn no_session(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            field: None,
            kind: DegradationKind::NoSession,
            reason: "request has no session".to_string(),
        }
    }

    /// A field value that does not fit its declared type.
    #[must_use]
    pub fn incompatible_field(
        param: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            param: param.into(),
            field: Some(field.into()),
            kind: DegradationKind::Incompatible,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} ({field}): {}: {}", self.param, self.kind, self.reason),
            None => write!(f, "{}: {}: {}", self.param, self.kind, self.reason),
        }
    }
}
