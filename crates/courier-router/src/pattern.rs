//! Path pattern compilation.
//!
//! A pattern is literal text with `{name}` placeholders. Each placeholder
//! matches exactly one non-empty path segment (no `/`). Literal text is
//! matched verbatim: regex metacharacters in it carry no meaning.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::RouteError;
use crate::PathVariables;

/// Capture pattern substituted for every placeholder.
const SEGMENT_CAPTURE: &str = "([^/]+)";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([^/{}]*)\}").expect("valid regex"))
}

/// A compiled path pattern.
///
/// Compilation happens once, when the pattern is built. Patterns without
/// placeholders carry no regex and only match by equality.
///
/// # Example
///
/// ```rust
/// use courier_router::PathPattern;
///
/// let pattern = PathPattern::parse("/user/{id}").unwrap();
/// let vars = pattern.matches("/user/42").unwrap();
/// assert_eq!(vars.get("id"), Some("42"));
///
/// assert!(pattern.matches("/user/42/extra").is_none());
/// ```
#[derive(Clone)]
pub struct PathPattern {
    raw: String,
    regex: Option<Regex>,
    names: Vec<String>,
}

impl PathPattern {
    /// Compiles `pattern`.
    ///
    /// Fails on an empty placeholder (`{}`), on a placeholder name used
    /// twice, or when the generated expression does not compile.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let placeholders = placeholder_regex();

        let mut names: Vec<String> = Vec::new();
        let mut expr = String::with_capacity(pattern.len() + 8);
        expr.push('^');

        let mut last = 0;
        for caps in placeholders.captures_iter(pattern) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let name = name.as_str().trim();
            if name.is_empty() {
                return Err(RouteError::empty_placeholder(pattern));
            }
            if names.iter().any(|n| n == name) {
                return Err(RouteError::duplicate_placeholder(pattern, name));
            }

            expr.push_str(&regex::escape(&pattern[last..whole.start()]));
            expr.push_str(SEGMENT_CAPTURE);
            names.push(name.to_string());
            last = whole.end();
        }

        if names.is_empty() {
            return Ok(Self {
                raw: pattern.to_string(),
                regex: None,
                names,
            });
        }

        expr.push_str(&regex::escape(&pattern[last..]));
        expr.push('$');

        let regex =
            Regex::new(&expr).map_err(|e| RouteError::invalid_pattern(pattern, e.to_string()))?;

        Ok(Self {
            raw: pattern.to_string(),
            regex: Some(regex),
            names,
        })
    }

    /// The pattern as registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in pattern order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns true if the pattern has no placeholders.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.regex.is_none()
    }

    /// Matches `path` against this pattern.
    ///
    /// A path byte-equal to the pattern matches with no variables, even when
    /// the pattern has placeholders. Otherwise captures are mapped to
    /// placeholder names positionally.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<PathVariables> {
        if self.raw == path {
            return Some(PathVariables::new());
        }

        let caps = self.regex.as_ref()?.captures(path)?;
        let mut vars = PathVariables::with_capacity(self.names.len());
        for (name, value) in self.names.iter().zip(caps.iter().skip(1)) {
            if let Some(value) = value {
                vars.push(name.as_str(), value.as_str());
            }
        }
        Some(vars)
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern")
            .field("raw", &self.raw)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PathPattern {}
