//! Argument binding.
//!
//! [`bind`] turns request data into one value per declared handler parameter.
//! The value source is chosen from the parameter's kind, in this order:
//!
//! | Kind | Source |
//! |------|--------|
//! | [`ParamKind::Session`] | the request's session handle |
//! | [`ParamKind::FileMap`] | uploaded parts, last payload per field |
//! | [`ParamKind::MultiFileMap`] | uploaded parts, every payload per field |
//! | [`ParamKind::ValueMap`] | every parameter, values coerced |
//! | [`ParamKind::Object`] | keys under the parameter's prefix |
//! | scalars and strings | path variables and parameters |
//!
//! A scalar whose value does not parse fails the whole request. Anything
//! else that cannot be filled binds to the absent value of its kind and is
//! recorded as a [`Degradation`].

use courier_core::{
    coerce_all, CourierError, Degradation, ParamKind, ParamSpec, ScalarType, Session, Value,
};
use courier_router::PathVariables;
use indexmap::IndexMap;
use tracing::debug;

use crate::mapper::map_to_object;
use crate::request::RequestData;

/// One bound argument.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArgument {
    name: String,
    value: Value,
}

impl BoundArgument {
    /// The declared parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Handler arguments in declaration order, plus every recovered problem.
///
/// Always holds exactly one argument per declared parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundArguments {
    args: Vec<BoundArgument>,
    degradations: Vec<Degradation>,
}

impl BoundArguments {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: &str, value: Value) {
        self.args.push(BoundArgument {
            name: name.to_string(),
            value,
        });
    }

    fn degrade(&mut self, degradation: Degradation) {
        debug!(
            param = %degradation.param,
            kind = %degradation.kind,
            reason = %degradation.reason,
            "Argument degraded"
        );
        self.degradations.push(degradation);
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns true if the handler declares no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The argument at `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.args.get(index).map(BoundArgument::value)
    }

    /// The argument bound to the parameter named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args
            .iter()
            .find(|a| a.name == name)
            .map(BoundArgument::value)
    }

    /// Shorthand for a string argument.
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Shorthand for an integer argument.
    #[must_use]
    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Iterates over the arguments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &BoundArgument> {
        self.args.iter()
    }

    /// The argument values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.args.iter().map(BoundArgument::value)
    }

    /// Recovered problems, in the order they occurred.
    #[must_use]
    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    /// Returns true if any argument or field was left at its absent value
    /// because of a problem.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }

    /// Consumes the list, returning the values.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.args.into_iter().map(|a| a.value).collect()
    }
}

/// Binds every parameter in `params` from the request.
///
/// # Errors
///
/// [`CourierError::ScalarCoercion`] when a scalar's value does not parse as
/// its declared type, and [`CourierError::UnbindableText`] when an object
/// parameter finds a plain value instead of prefixed keys.
///
/// # Example
///
/// ```rust
/// use courier_core::{ParamSpec, ScalarType, Value};
/// use courier_extract::{bind, RequestData};
/// use courier_router::PathVariables;
///
/// let params = [
///     ParamSpec::primitive("id", ScalarType::Int),
///     ParamSpec::text("q"),
/// ];
/// let vars: PathVariables = [("id", "42")].into_iter().collect();
/// let data = RequestData::new().with_param("q", "rust");
///
/// let args = bind(&params, &vars, &data, None).unwrap();
/// assert_eq!(args.get("id"), Some(&Value::Int(42)));
/// assert_eq!(args.str("q"), Some("rust"));
/// ```
pub fn bind(
    params: &[ParamSpec],
    variables: &PathVariables,
    data: &RequestData,
    session: Option<&Session>,
) -> Result<BoundArguments, CourierError> {
    let mut args = BoundArguments {
        args: Vec::with_capacity(params.len()),
        degradations: Vec::new(),
    };

    for spec in params {
        let value = match spec.kind() {
            ParamKind::Session => match session {
                Some(session) => Value::Session(session.clone()),
                None => {
                    args.degrade(Degradation::no_session(spec.name()));
                    Value::Null
                }
            },
            ParamKind::FileMap => file_map(data),
            ParamKind::MultiFileMap => multi_file_map(data),
            ParamKind::ValueMap => value_map(data),
            ParamKind::Object(schema) => {
                match map_to_object(data.params(), schema, spec.lookup_name(), spec.name()) {
                    Some(mapped) => {
                        for degradation in mapped.degradations {
                            args.degrade(degradation);
                        }
                        Value::Object(mapped.object)
                    }
                    None => {
                        if lookup(spec, variables, data).is_some() {
                            return Err(CourierError::unbindable_text(
                                spec.name(),
                                schema.name(),
                            ));
                        }
                        args.degrade(Degradation::missing(spec.name()));
                        Value::Null
                    }
                }
            }
            ParamKind::Text => match lookup(spec, variables, data) {
                Some(raw) => Value::Str(raw.to_string()),
                None => {
                    args.degrade(Degradation::missing(spec.name()));
                    Value::Null
                }
            },
            ParamKind::Primitive(scalar) | ParamKind::Wrapper(scalar) => {
                match lookup(spec, variables, data) {
                    Some(raw) => convert(spec, *scalar, raw)?,
                    None => {
                        args.degrade(Degradation::missing(spec.name()));
                        spec.kind().absent()
                    }
                }
            }
        };
        args.push(spec.name(), value);
    }

    Ok(args)
}

/// Finds the raw value of a scalar parameter.
///
/// An explicit binding name looks in request parameters first, then path
/// variables. Otherwise the declared name looks in path variables first.
fn lookup<'a>(
    spec: &ParamSpec,
    variables: &'a PathVariables,
    data: &'a RequestData,
) -> Option<&'a str> {
    let name = spec.lookup_name();
    if spec.has_explicit_binding() {
        data.first(name).or_else(|| variables.get(name))
    } else {
        variables.get(name).or_else(|| data.first(name))
    }
}

fn convert(spec: &ParamSpec, scalar: ScalarType, raw: &str) -> Result<Value, CourierError> {
    scalar
        .convert(raw)
        .map_err(|e| CourierError::scalar_coercion(spec.name(), e.value, scalar.name()))
}

fn file_map(data: &RequestData) -> Value {
    let mut files = IndexMap::new();
    for part in data.files() {
        files.insert(
            part.field_name().to_string(),
            Value::Bytes(part.data().clone()),
        );
    }
    Value::Map(files)
}

fn multi_file_map(data: &RequestData) -> Value {
    let mut files: IndexMap<String, Value> = IndexMap::new();
    for part in data.files() {
        let entry = files
            .entry(part.field_name().to_string())
            .or_insert_with(|| Value::List(Vec::new()));
        if let Value::List(items) = entry {
            items.push(Value::Bytes(part.data().clone()));
        }
    }
    Value::Map(files)
}

fn value_map(data: &RequestData) -> Value {
    Value::Map(
        data.params()
            .iter()
            .map(|(name, values)| (name.clone(), Value::List(coerce_all(values))))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Part;
    use courier_core::{DegradationKind, FieldShape, MemorySession, ObjectSchema};

    fn vars(pairs: &[(&str, &str)]) -> PathVariables {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_scalar_from_path_variable() {
        let params = [ParamSpec::primitive("id", ScalarType::Int)];
        let args = bind(&params, &vars(&[("id", "42")]), &RequestData::new(), None).unwrap();
        assert_eq!(args.get("id"), Some(&Value::Int(42)));
        assert!(!args.is_degraded());
    }

    #[test]
    fn test_declared_name_prefers_path_variable() {
        let params = [ParamSpec::text("id")];
        let data = RequestData::new().with_param("id", "from-query");
        let args = bind(&params, &vars(&[("id", "from-path")]), &data, None).unwrap();
        assert_eq!(args.str("id"), Some("from-path"));
    }

    #[test]
    fn test_explicit_binding_prefers_query() {
        let params = [ParamSpec::text("ident").bind_as("id")];
        let data = RequestData::new().with_param("id", "from-query");
        let args = bind(&params, &vars(&[("id", "from-path")]), &data, None).unwrap();
        assert_eq!(args.str("ident"), Some("from-query"));

        let args = bind(&params, &vars(&[("id", "from-path")]), &RequestData::new(), None).unwrap();
        assert_eq!(args.str("ident"), Some("from-path"));
    }

    #[test]
    fn test_scalar_falls_back_to_query() {
        let params = [ParamSpec::wrapper("page", ScalarType::Long)];
        let data = RequestData::new().with_param("page", "3");
        let args = bind(&params, &PathVariables::new(), &data, None).unwrap();
        assert_eq!(args.get("page"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_scalar_parse_failure_is_fatal() {
        let params = [ParamSpec::primitive("id", ScalarType::Int)];
        let err = bind(&params, &vars(&[("id", "abc")]), &RequestData::new(), None).unwrap_err();
        match err {
            CourierError::ScalarCoercion { param, value, target } => {
                assert_eq!(param, "id");
                assert_eq!(value, "abc");
                assert_eq!(target, "int");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_scalars_bind_absent() {
        let params = [
            ParamSpec::primitive("count", ScalarType::Int),
            ParamSpec::primitive("flag", ScalarType::Bool),
            ParamSpec::wrapper("limit", ScalarType::Int),
            ParamSpec::text("name"),
        ];
        let args = bind(&params, &PathVariables::new(), &RequestData::new(), None).unwrap();

        assert_eq!(args.len(), 4);
        assert_eq!(args.get("count"), Some(&Value::Int(0)));
        assert_eq!(args.get("flag"), Some(&Value::Bool(false)));
        assert_eq!(args.get("limit"), Some(&Value::Null));
        assert_eq!(args.get("name"), Some(&Value::Null));
        assert_eq!(args.degradations().len(), 4);
        assert!(args
            .degradations()
            .iter()
            .all(|d| d.kind == DegradationKind::Missing));
    }

    #[test]
    fn test_session_binding() {
        let session = Session::new(MemorySession::new());
        let params = [ParamSpec::session("session")];

        let args = bind(
            &params,
            &PathVariables::new(),
            &RequestData::new(),
            Some(&session),
        )
        .unwrap();
        let bound = args.get("session").and_then(Value::as_session).unwrap();
        assert!(bound.same_store(&session));

        let args = bind(&params, &PathVariables::new(), &RequestData::new(), None).unwrap();
        assert_eq!(args.get("session"), Some(&Value::Null));
        assert_eq!(args.degradations()[0].kind, DegradationKind::NoSession);
    }

    #[test]
    fn test_file_map_non_multipart_is_empty() {
        let params = [ParamSpec::new("files", ParamKind::FileMap)];
        let data = RequestData::new().with_param("files", "not-a-file");
        let args = bind(&params, &PathVariables::new(), &data, None).unwrap();
        assert_eq!(args.get("files"), Some(&Value::Map(IndexMap::new())));
    }

    #[test]
    fn test_file_maps() {
        let data = RequestData::new().with_parts(vec![
            Part::file("photo", "a.png", "one"),
            Part::text("caption", "hello"),
            Part::file("photo", "b.png", "two"),
            Part::file("doc", "", "skipped"),
        ]);
        let params = [
            ParamSpec::new("single", ParamKind::FileMap),
            ParamSpec::new("multi", ParamKind::MultiFileMap),
        ];
        let args = bind(&params, &PathVariables::new(), &data, None).unwrap();

        let single = args.get("single").and_then(Value::as_map).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(
            single.get("photo").and_then(Value::as_bytes).map(|b| &b[..]),
            Some(&b"two"[..])
        );

        let multi = args.get("multi").and_then(Value::as_map).unwrap();
        let photos = multi.get("photo").and_then(Value::as_list).unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].as_bytes().map(|b| &b[..]), Some(&b"one"[..]));
        assert!(multi.get("doc").is_none());
        assert!(multi.get("caption").is_none());
    }

    #[test]
    fn test_value_map_coerces() {
        let data = RequestData::from_query("n=1&n=x&ok=true").unwrap();
        let params = [ParamSpec::new("all", ParamKind::ValueMap)];
        let args = bind(&params, &PathVariables::new(), &data, None).unwrap();

        let all = args.get("all").and_then(Value::as_map).unwrap();
        assert_eq!(
            all.get("n"),
            Some(&Value::List(vec![Value::Int(1), Value::from("x")]))
        );
        assert_eq!(all.get("ok"), Some(&Value::List(vec![Value::Bool(true)])));
    }

    fn employee() -> std::sync::Arc<ObjectSchema> {
        ObjectSchema::builder("Employee")
            .field("name", FieldShape::Text)
            .field("age", FieldShape::Primitive(ScalarType::Int))
            .build()
    }

    #[test]
    fn test_object_binding_uses_declared_name() {
        let params = [ParamSpec::object("e", &employee())];
        let data = RequestData::new()
            .with_param("e.name", "Ada")
            .with_param("e.age", "nope");
        let args = bind(&params, &PathVariables::new(), &data, None).unwrap();

        let obj = args.get("e").and_then(Value::as_object).unwrap();
        assert_eq!(obj.get("name"), Some(&Value::from("Ada")));
        assert_eq!(obj.get("age"), Some(&Value::Int(0)));
        assert_eq!(args.degradations().len(), 1);
        assert_eq!(args.degradations()[0].field.as_deref(), Some("e.age"));
    }

    #[test]
    fn test_object_binding_uses_explicit_prefix() {
        let params = [ParamSpec::object("employee", &employee()).bind_as("emp")];
        let data = RequestData::new().with_param("emp.name", "Grace");
        let args = bind(&params, &PathVariables::new(), &data, None).unwrap();
        let obj = args.get("employee").and_then(Value::as_object).unwrap();
        assert_eq!(obj.get("name"), Some(&Value::from("Grace")));
    }

    #[test]
    fn test_object_without_keys_binds_null() {
        let params = [ParamSpec::object("e", &employee())];
        let args = bind(&params, &PathVariables::new(), &RequestData::new(), None).unwrap();
        assert_eq!(args.get("e"), Some(&Value::Null));
        assert_eq!(args.degradations()[0].kind, DegradationKind::Missing);
    }

    #[test]
    fn test_object_with_plain_value_is_fatal() {
        let params = [ParamSpec::object("e", &employee())];
        let data = RequestData::new().with_param("e", "Ada");
        let err = bind(&params, &PathVariables::new(), &data, None).unwrap_err();
        assert!(matches!(err, CourierError::UnbindableText { .. }));
    }

    #[test]
    fn test_one_argument_per_parameter() {
        let params = [
            ParamSpec::session("s"),
            ParamSpec::new("f", ParamKind::FileMap),
            ParamSpec::object("e", &employee()),
            ParamSpec::wrapper("x", ScalarType::Double),
        ];
        let args = bind(&params, &PathVariables::new(), &RequestData::new(), None).unwrap();
        assert_eq!(args.len(), params.len());
        let names: Vec<_> = args.iter().map(BoundArgument::name).collect();
        assert_eq!(names, vec!["s", "f", "e", "x"]);
    }

    #[test]
    fn test_bind_is_idempotent() {
        let params = [
            ParamSpec::primitive("id", ScalarType::Int),
            ParamSpec::object("e", &employee()),
        ];
        let data = RequestData::new().with_param("e.name", "Ada");
        let v = vars(&[("id", "7")]);
        let a = bind(&params, &v, &data, None).unwrap();
        let b = bind(&params, &v, &data, None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.into_values().len(), 2);
    }
}
