//! Endpoint descriptors: the static, declarative description of one tool.
//!
//! A descriptor carries everything needed to expose one REST endpoint as a
//! tool: its name and description, the HTTP method and path template, and
//! the ordered list of input fields with their types, locations and wire
//! names. Descriptors are plain `const` data; see `definitions/`.

use std::fmt;
use std::sync::Arc;

use rmcp::model::Tool;
use serde_json::{Map, Value, json};

use super::error::ToolError;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Whether remaining fields travel in a JSON body (POST/PATCH)
    /// rather than in the query string (GET/DELETE).
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }

    /// Convert to the reqwest method type.
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }

    /// The location undeclared input keys default to.
    pub const fn default_location(self) -> FieldLocation {
        if self.has_body() {
            FieldLocation::Body
        } else {
            FieldLocation::Query
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// Where a field is placed in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation {
    /// Substituted into the path template.
    Path,
    /// Sent as a query-string parameter.
    Query,
    /// Sent as a member of the JSON body.
    Body,
}

/// Declared JSON type of a field, as advertised in the input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    Object,
    Array,
    /// Opaque structured value, forwarded untouched.
    Any,
}

impl FieldKind {
    fn schema_type(self) -> Option<&'static str> {
        match self {
            Self::String => Some("string"),
            Self::Integer => Some("integer"),
            Self::Boolean => Some("boolean"),
            Self::Object => Some("object"),
            Self::Array => Some("array"),
            Self::Any => None,
        }
    }
}

/// One input field of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Caller-facing (camelCase) name.
    pub name: &'static str,
    /// Name expected by the upstream API.
    pub wire_name: &'static str,
    pub kind: FieldKind,
    pub location: FieldLocation,
    pub required: bool,
    pub description: &'static str,
}

impl FieldSpec {
    const fn new(name: &'static str, wire_name: &'static str, location: FieldLocation) -> Self {
        Self {
            name,
            wire_name,
            kind: FieldKind::String,
            location,
            required: false,
            description: "",
        }
    }

    /// A required string path parameter.
    pub const fn path(name: &'static str, wire_name: &'static str) -> Self {
        Self::new(name, wire_name, FieldLocation::Path).required()
    }

    /// An optional string query parameter.
    pub const fn query(name: &'static str, wire_name: &'static str) -> Self {
        Self::new(name, wire_name, FieldLocation::Query)
    }

    /// An optional string body member.
    pub const fn body(name: &'static str, wire_name: &'static str) -> Self {
        Self::new(name, wire_name, FieldLocation::Body)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Whether the caller-facing name differs from the wire name.
    pub fn is_renamed(&self) -> bool {
        self.name != self.wire_name
    }

    fn schema(&self) -> Value {
        let mut schema = Map::new();
        if let Some(ty) = self.kind.schema_type() {
            schema.insert("type".into(), json!(ty));
        }
        if !self.description.is_empty() {
            schema.insert("description".into(), json!(self.description));
        }
        Value::Object(schema)
    }
}

/// Static description of one REST endpoint exposed as a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Unique tool identifier.
    pub name: &'static str,
    pub description: &'static str,
    pub method: HttpMethod,
    /// Path template; placeholders use the caller-facing field name,
    /// e.g. `/v1/pages/{pageId}`.
    pub path: &'static str,
    pub fields: &'static [FieldSpec],
}

impl EndpointDescriptor {
    /// Look up a declared field by its caller-facing name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Rename table: caller-facing name to wire name, where they differ.
    pub fn renames(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.fields
            .iter()
            .filter(|f| f.location != FieldLocation::Path && f.is_renamed())
            .map(|f| (f.name, f.wire_name))
    }

    /// Placeholder names embedded in the path template.
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
    }

    /// Check the descriptor's internal consistency.
    ///
    /// Every placeholder must be a declared path field and every path field
    /// must appear in the template. Body fields are only legal on methods
    /// that carry a body, and field names must be unique.
    pub fn validate(&self) -> Result<(), ToolError> {
        for placeholder in self.placeholders() {
            match self.field(placeholder) {
                Some(f) if f.location == FieldLocation::Path => {}
                _ => {
                    return Err(ToolError::invalid_descriptor(
                        self.name,
                        format!("placeholder '{{{placeholder}}}' is not a declared path field"),
                    ));
                }
            }
        }

        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(ToolError::invalid_descriptor(
                    self.name,
                    format!("field '{}' declared twice", field.name),
                ));
            }
            match field.location {
                FieldLocation::Path if !self.placeholders().any(|p| p == field.name) => {
                    return Err(ToolError::invalid_descriptor(
                        self.name,
                        format!("path field '{}' missing from template", field.name),
                    ));
                }
                FieldLocation::Body if !self.method.has_body() => {
                    return Err(ToolError::invalid_descriptor(
                        self.name,
                        format!("body field '{}' on {} endpoint", field.name, self.method),
                    ));
                }
                FieldLocation::Query if self.method.has_body() => {
                    return Err(ToolError::invalid_descriptor(
                        self.name,
                        format!("query field '{}' on {} endpoint", field.name, self.method),
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// JSON schema of the tool's input object.
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), json!(required));
        }
        schema
    }

    /// Create a Tool model for this descriptor (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: Arc::new(self.input_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
