//! Page endpoints.

use super::super::descriptor::{EndpointDescriptor, FieldKind, FieldSpec, HttpMethod};
use super::{PAGE_SIZE_QUERY, START_CURSOR_QUERY};

const PAGE_ID: FieldSpec = FieldSpec::path("pageId", "page_id");

const FILTER_PROPERTIES: FieldSpec = FieldSpec::query("filterProperties", "filter_properties")
    .kind(FieldKind::Any)
    .describe("Property ID, or list of IDs, to include in the response");

const ICON: FieldSpec = FieldSpec::body("icon", "icon").kind(FieldKind::Any);
const COVER: FieldSpec = FieldSpec::body("cover", "cover").kind(FieldKind::Any);

pub const RETRIEVE_A_PAGE: EndpointDescriptor = EndpointDescriptor {
    name: "retrieve-a-page",
    description: "Retrieve a page",
    method: HttpMethod::Get,
    path: "/v1/pages/{pageId}",
    fields: &[PAGE_ID, FILTER_PROPERTIES],
};

pub const PATCH_PAGE: EndpointDescriptor = EndpointDescriptor {
    name: "patch-page",
    description: "Update page properties",
    method: HttpMethod::Patch,
    path: "/v1/pages/{pageId}",
    fields: &[
        PAGE_ID,
        FieldSpec::body("properties", "properties").kind(FieldKind::Object),
        FieldSpec::body("archived", "archived").kind(FieldKind::Boolean),
        FieldSpec::body("inTrash", "in_trash").kind(FieldKind::Boolean),
        ICON,
        COVER,
    ],
};

pub const POST_PAGE: EndpointDescriptor = EndpointDescriptor {
    name: "post-page",
    description: "Create a page",
    method: HttpMethod::Post,
    path: "/v1/pages",
    fields: &[
        FieldSpec::body("parent", "parent")
            .kind(FieldKind::Object)
            .required()
            .describe("Parent page or database, e.g. {\"database_id\":\"...\"}"),
        FieldSpec::body("properties", "properties").kind(FieldKind::Object),
        FieldSpec::body("children", "children").kind(FieldKind::Array),
        ICON,
        COVER,
    ],
};

pub const RETRIEVE_A_PAGE_PROPERTY: EndpointDescriptor = EndpointDescriptor {
    name: "retrieve-a-page-property",
    description: "Retrieve a page property item",
    method: HttpMethod::Get,
    path: "/v1/pages/{pageId}/properties/{propertyId}",
    fields: &[
        PAGE_ID,
        FieldSpec::path("propertyId", "property_id"),
        PAGE_SIZE_QUERY,
        START_CURSOR_QUERY,
    ],
};
