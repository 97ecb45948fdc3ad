//! Normalized request data.
//!
//! The serving layer hands the dispatcher a [`RequestData`]: query and form
//! parameters merged into one multi-valued map, plus the uploaded parts of a
//! multipart request, already split.

use bytes::Bytes;
use indexmap::IndexMap;

use crate::error::RequestDataError;

/// Multi-valued parameters in arrival order.
pub type ParamMap = IndexMap<String, Vec<String>>;

/// One part of a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    field_name: String,
    file_name: Option<String>,
    data: Bytes,
}

impl Part {
    /// An uploaded file.
    pub fn file(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: Some(file_name.into()),
            data: data.into(),
        }
    }

    /// A plain form field sent as a part.
    pub fn text(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: None,
            data: Bytes::from(value.into()),
        }
    }

    /// The form field name.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// The submitted file name, if the part carried one.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The payload.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns true if the part is an upload with a non-empty file name.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.file_name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// Request parameters and parts, read-only to the binder.
///
/// # Example
///
/// ```rust
/// use courier_extract::{Part, RequestData};
///
/// let data = RequestData::from_query("tag=a&tag=b&page=2")
///     .unwrap()
///     .with_parts(vec![Part::file("avatar", "me.png", &b"\x89PNG"[..])]);
///
/// assert_eq!(data.first("page"), Some("2"));
/// assert_eq!(data.values("tag"), ["a", "b"]);
/// assert!(data.is_multipart());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestData {
    params: ParamMap,
    parts: Option<Vec<Part>>,
}

impl RequestData {
    /// Creates empty, non-multipart request data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` string, such as a query
    /// string or form body. Repeated names keep every value in order.
    pub fn from_query(query: &str) -> Result<Self, RequestDataError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        let mut data = Self::new();
        for (name, value) in pairs {
            data.push_param(name, value);
        }
        Ok(data)
    }

    /// Appends a parameter value, builder style.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_param(name, value);
        self
    }

    /// Appends a parameter value.
    pub fn push_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.entry(name.into()).or_default().push(value.into());
    }

    /// Merges another urlencoded string, such as a form body after the query.
    pub fn extend_from_query(&mut self, query: &str) -> Result<(), RequestDataError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        for (name, value) in pairs {
            self.push_param(name, value);
        }
        Ok(())
    }

    /// Marks the request as multipart and attaches its parts.
    ///
    /// Parts without a file name are plain form fields; their text is also
    /// appended to the parameters. Payloads that are not UTF-8 are converted
    /// lossily.
    #[must_use]
    pub fn with_parts(mut self, parts: Vec<Part>) -> Self {
        for part in parts.iter().filter(|p| p.file_name.is_none()) {
            let text = String::from_utf8_lossy(&part.data).into_owned();
            self.push_param(part.field_name.clone(), text);
        }
        self.parts = Some(parts);
        self
    }

    /// The first value of `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value of `name`, in arrival order.
    #[must_use]
    pub fn values(&self, name: &str) -> &[String] {
        self.params.get(name).map_or(&[], Vec::as_slice)
    }

    /// All parameters.
    #[must_use]
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    /// The parts, when the request is multipart.
    #[must_use]
    pub fn parts(&self) -> Option<&[Part]> {
        self.parts.as_deref()
    }

    /// Returns true for multipart requests.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.parts.is_some()
    }

    /// Uploaded files in arrival order. Empty for non-multipart requests.
    pub fn files(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter().flatten().filter(|p| p.is_file())
    }
}
