//! The normalized request the serving layer hands to the dispatcher.

use courier_core::Session;
use courier_extract::RequestData;

/// One request: verb, path, parameters and the optional session.
///
/// ```rust
/// use courier_extract::RequestData;
/// use courier_server::DispatchRequest;
///
/// let request = DispatchRequest::new("GET", "/shop/user/42")
///     .with_data(RequestData::new().with_param("verbose", "true"));
/// assert_eq!(request.path(), "/shop/user/42");
/// assert!(request.session().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    verb: String,
    path: String,
    data: RequestData,
    session: Option<Session>,
}

impl DispatchRequest {
    /// Creates a request with no parameters and no session.
    pub fn new(verb: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            path: path.into(),
            data: RequestData::new(),
            session: None,
        }
    }

    /// Replaces the request data.
    #[must_use]
    pub fn with_data(mut self, data: RequestData) -> Self {
        self.data = data;
        self
    }

    /// Attaches a session.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// The verb as received.
    #[must_use]
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// The full request path, context path included.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parameters and parts.
    #[must_use]
    pub fn data(&self) -> &RequestData {
        &self.data
    }

    /// The session, if the request has one.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}
