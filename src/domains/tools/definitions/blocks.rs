//! Block endpoints.
//!
//! Block content is type-specific (`paragraph`, `heading_1`, `to_do`, ...);
//! such keys are not declared and reach the body unchanged.

use super::super::descriptor::{EndpointDescriptor, FieldKind, FieldSpec, HttpMethod};
use super::{PAGE_SIZE_QUERY, START_CURSOR_QUERY};

const BLOCK_ID: FieldSpec = FieldSpec::path("blockId", "block_id");

pub const GET_BLOCK_CHILDREN: EndpointDescriptor = EndpointDescriptor {
    name: "get-block-children",
    description: "Retrieve block children",
    method: HttpMethod::Get,
    path: "/v1/blocks/{blockId}/children",
    fields: &[BLOCK_ID, START_CURSOR_QUERY, PAGE_SIZE_QUERY],
};

pub const PATCH_BLOCK_CHILDREN: EndpointDescriptor = EndpointDescriptor {
    name: "patch-block-children",
    description: "Append block children",
    method: HttpMethod::Patch,
    path: "/v1/blocks/{blockId}/children",
    fields: &[
        BLOCK_ID,
        FieldSpec::body("children", "children")
            .kind(FieldKind::Array)
            .required()
            .describe("Block objects to append"),
        FieldSpec::body("after", "after").describe("Append after this child block"),
    ],
};

pub const RETRIEVE_A_BLOCK: EndpointDescriptor = EndpointDescriptor {
    name: "retrieve-a-block",
    description: "Retrieve a block",
    method: HttpMethod::Get,
    path: "/v1/blocks/{blockId}",
    fields: &[BLOCK_ID],
};

pub const UPDATE_A_BLOCK: EndpointDescriptor = EndpointDescriptor {
    name: "update-a-block",
    description: "Update a block",
    method: HttpMethod::Patch,
    path: "/v1/blocks/{blockId}",
    fields: &[
        BLOCK_ID,
        FieldSpec::body("archived", "archived").kind(FieldKind::Boolean),
        FieldSpec::body("inTrash", "in_trash").kind(FieldKind::Boolean),
    ],
};

pub const DELETE_A_BLOCK: EndpointDescriptor = EndpointDescriptor {
    name: "delete-a-block",
    description: "Delete a block",
    method: HttpMethod::Delete,
    path: "/v1/blocks/{blockId}",
    fields: &[BLOCK_ID],
};
