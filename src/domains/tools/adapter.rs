//! Request adapter: turns a tool invocation into one upstream HTTP request.
//!
//! Given a descriptor and the caller's arguments, [`prepare`] substitutes path
//! fields into the template, renames the remaining fields to their wire
//! names and places them in the query string or the JSON body. [`dispatch`]
//! then sends the prepared request through the shared [`ApiClient`].

use serde_json::{Map, Value};
use tracing::{info, instrument};

use super::client::ApiClient;
use super::descriptor::{EndpointDescriptor, FieldLocation, HttpMethod};
use super::error::ToolError;

/// Input key whose object value is unpacked into the body of POST/PATCH
/// requests before any other field is applied.
pub const REQUEST_DATA: &str = "requestData";

/// One tool call: the raw arguments plus the optional caller credential.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub arguments: Map<String, Value>,
    /// Bearer token supplied by the caller, without the `Bearer ` prefix.
    pub credential: Option<String>,
}

impl Invocation {
    pub fn new(arguments: Map<String, Value>) -> Self {
        Self {
            arguments,
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: Option<String>) -> Self {
        self.credential = credential;
        self
    }
}

/// A fully resolved request, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    /// Decoded path segments; percent-encoding happens when the URL is built.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    /// JSON body; always present for POST/PATCH, never for GET/DELETE.
    pub body: Option<Value>,
}

impl PreparedRequest {
    /// The request path, for logging.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// The encoded query string, for logging.
    pub fn query_string(&self) -> String {
        serde_urlencoded::to_string(&self.query).unwrap_or_default()
    }

    /// Value of the first query parameter with the given name.
    #[cfg(test)]
    pub(crate) fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn push_query(query: &mut Vec<(String, String)>, name: &str, value: &Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                if let Some(text) = scalar_text(item) {
                    query.push((name.to_string(), text));
                }
            }
        }
        other => {
            if let Some(text) = scalar_text(other) {
                query.push((name.to_string(), text));
            }
        }
    }
}

fn path_value(name: &str, arguments: &Map<String, Value>) -> Result<String, ToolError> {
    match arguments.get(name) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::String(_)) => Err(ToolError::invalid_arguments(format!(
            "'{name}' must not be empty"
        ))),
        Some(Value::Null) | None => Err(ToolError::invalid_arguments(format!(
            "Missing required argument: {name}"
        ))),
        Some(_) => Err(ToolError::invalid_arguments(format!(
            "'{name}' must be a string"
        ))),
    }
}

/// Resolve the request for `descriptor` from the caller's `arguments`.
///
/// Path fields are consumed by the template and never repeated in the query
/// or body, even when the caller also sends their wire name. Declared fields
/// are renamed to their wire names; undeclared keys are forwarded unchanged
/// to the method's default location. Absent optional fields are omitted.
pub fn prepare(
    descriptor: &EndpointDescriptor,
    arguments: &Map<String, Value>,
) -> Result<PreparedRequest, ToolError> {
    let segments = descriptor
        .path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => path_value(name, arguments),
            None => Ok(segment.to_string()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let has_body = descriptor.method.has_body();
    let consumed_by_path = |key: &str| {
        descriptor
            .fields
            .iter()
            .any(|f| f.location == FieldLocation::Path && f.wire_name == key)
    };

    let mut query = Vec::new();
    let mut body = Map::new();

    if has_body {
        if let Some(Value::Object(bundle)) = arguments.get(REQUEST_DATA) {
            body.extend(
                bundle
                    .iter()
                    .filter(|(key, _)| !consumed_by_path(key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone())),
            );
        }
    }

    // Undeclared keys first, so declared fields win on a wire-name clash.
    for (key, value) in arguments {
        if descriptor.field(key).is_some() || consumed_by_path(key.as_str()) {
            continue;
        }
        if has_body && key == REQUEST_DATA && value.is_object() {
            continue;
        }
        match descriptor.method.default_location() {
            FieldLocation::Body => {
                body.insert(key.clone(), value.clone());
            }
            _ => push_query(&mut query, key, value),
        }
    }

    for field in descriptor.fields {
        let Some(value) = arguments.get(field.name) else {
            continue;
        };
        match field.location {
            FieldLocation::Path => {}
            FieldLocation::Query => {
                query.retain(|(name, _)| name != field.wire_name);
                push_query(&mut query, field.wire_name, value);
            }
            FieldLocation::Body => {
                body.insert(field.wire_name.to_string(), value.clone());
            }
        }
    }

    // Checked on the assembled request so wire-named keys, direct or from
    // `requestData`, satisfy a requirement too.
    let missing = descriptor.fields.iter().find(|f| {
        f.required
            && match f.location {
                FieldLocation::Path => false,
                FieldLocation::Query => !query.iter().any(|(name, _)| name == f.wire_name),
                FieldLocation::Body => body.get(f.wire_name).is_none_or(Value::is_null),
            }
    });
    if let Some(missing) = missing {
        return Err(ToolError::invalid_arguments(format!(
            "Missing required argument: {}",
            missing.name
        )));
    }

    Ok(PreparedRequest {
        method: descriptor.method,
        segments,
        query,
        body: has_body.then_some(Value::Object(body)),
    })
}

/// Prepare and send the request for one invocation.
#[instrument(skip_all, fields(tool = descriptor.name))]
pub async fn dispatch(
    client: &ApiClient,
    descriptor: &EndpointDescriptor,
    invocation: &Invocation,
) -> Result<Value, ToolError> {
    let request = prepare(descriptor, &invocation.arguments)?;
    info!(
        "{} {}{}",
        request.method,
        request.path(),
        if invocation.credential.is_some() {
            " (caller credential)"
        } else {
            ""
        }
    );
    client
        .send(&request, invocation.credential.as_deref())
        .await
}
