//! Database endpoints.

use super::super::descriptor::{EndpointDescriptor, FieldKind, FieldSpec, HttpMethod};
use super::{PAGE_SIZE_BODY, START_CURSOR_BODY};

const DATABASE_ID: FieldSpec = FieldSpec::path("databaseId", "database_id");

pub const POST_DATABASE_QUERY: EndpointDescriptor = EndpointDescriptor {
    name: "post-database-query",
    description: "Query a database",
    method: HttpMethod::Post,
    path: "/v1/databases/{databaseId}/query",
    fields: &[
        DATABASE_ID,
        FieldSpec::body("filterProperties", "filter_properties")
            .kind(FieldKind::Any)
            .describe("Property ID, or list of IDs, to include in the results"),
        FieldSpec::body("filter", "filter").kind(FieldKind::Object),
        FieldSpec::body("sorts", "sorts").kind(FieldKind::Array),
        START_CURSOR_BODY,
        PAGE_SIZE_BODY,
    ],
};

pub const CREATE_A_DATABASE: EndpointDescriptor = EndpointDescriptor {
    name: "create-a-database",
    description: "Create a database",
    method: HttpMethod::Post,
    path: "/v1/databases",
    fields: &[
        FieldSpec::body("parent", "parent")
            .kind(FieldKind::Object)
            .required()
            .describe("Parent page, e.g. {\"type\":\"page_id\",\"page_id\":\"...\"}"),
        FieldSpec::body("title", "title").kind(FieldKind::Array),
        FieldSpec::body("properties", "properties")
            .kind(FieldKind::Object)
            .required()
            .describe("Property schema of the new database"),
        FieldSpec::body("isInline", "is_inline").kind(FieldKind::Boolean),
    ],
};

pub const UPDATE_A_DATABASE: EndpointDescriptor = EndpointDescriptor {
    name: "update-a-database",
    description: "Update a database",
    method: HttpMethod::Patch,
    path: "/v1/databases/{databaseId}",
    fields: &[
        DATABASE_ID,
        FieldSpec::body("title", "title").kind(FieldKind::Array),
        FieldSpec::body("description", "description").kind(FieldKind::Array),
        FieldSpec::body("properties", "properties").kind(FieldKind::Object),
    ],
};

pub const RETRIEVE_A_DATABASE: EndpointDescriptor = EndpointDescriptor {
    name: "retrieve-a-database",
    description: "Retrieve a database",
    method: HttpMethod::Get,
    path: "/v1/databases/{databaseId}",
    fields: &[DATABASE_ID],
};
