//! Dispatch outcomes.

use bytes::Bytes;
use courier_core::{CourierError, Degradation};
use courier_extract::render::TEXT_CONTENT_TYPE;
use courier_extract::RenderInstruction;
use http::StatusCode;

/// The result of dispatching one request.
#[derive(Debug)]
pub enum Outcome {
    /// A handler ran and its reply was rendered.
    Rendered {
        /// Pattern of the matched route.
        route: String,
        /// What the serving layer should write or forward.
        instruction: RenderInstruction,
        /// Parameters and fields that fell back to their absent value.
        degradations: Vec<Degradation>,
        /// Content type to send, if the instruction writes a body.
        content_type: Option<String>,
    },
    /// No route accepts the verb and path.
    NotFound {
        /// Request verb.
        verb: String,
        /// Request path, context path removed.
        path: String,
        /// Body text.
        message: String,
    },
    /// Binding or the handler failed.
    Failed {
        /// The failure.
        error: CourierError,
        /// Body text; the full chain only when error detail is exposed.
        message: String,
    },
}

impl Outcome {
    /// HTTP status of the outcome.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rendered { .. } => StatusCode::OK,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Failed { error, .. } => error.status_code(),
        }
    }

    /// Whether a handler ran successfully.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    /// Content type of the body, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Rendered { content_type, .. } => content_type.as_deref(),
            Self::NotFound { .. } | Self::Failed { .. } => Some(TEXT_CONTENT_TYPE),
        }
    }

    /// Encodes the body.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if a JSON envelope cannot be encoded.
    pub fn body(&self) -> Result<Bytes, serde_json::Error> {
        match self {
            Self::Rendered { instruction, .. } => instruction.body(),
            Self::NotFound { message, .. } | Self::Failed { message, .. } => {
                Ok(Bytes::from(message.clone()))
            }
        }
    }

    /// The render instruction of a successful dispatch.
    #[must_use]
    pub fn instruction(&self) -> Option<&RenderInstruction> {
        match self {
            Self::Rendered { instruction, .. } => Some(instruction),
            _ => None,
        }
    }

    /// Degradations recorded while binding. Empty unless rendered.
    #[must_use]
    pub fn degradations(&self) -> &[Degradation] {
        match self {
            Self::Rendered { degradations, .. } => degradations,
            _ => &[],
        }
    }

    /// The error of a failed dispatch.
    #[must_use]
    pub fn error(&self) -> Option<&CourierError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
