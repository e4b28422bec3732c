//! Endpoint definitions.
//!
//! The complete, declarative table of Notion endpoints exposed as tools.
//! Each file groups the endpoints of one Notion object family; [`ENDPOINTS`]
//! lists them all in registration order.

pub mod blocks;
pub mod comments;
pub mod databases;
pub mod file_uploads;
pub mod pages;
pub mod search;
pub mod users;

use super::descriptor::{EndpointDescriptor, FieldKind, FieldSpec};

/// Pagination cursor sent as a query parameter.
pub(crate) const START_CURSOR_QUERY: FieldSpec = FieldSpec::query("startCursor", "start_cursor")
    .describe("Cursor returned by a previous response as next_cursor");

/// Page size sent as a query parameter.
pub(crate) const PAGE_SIZE_QUERY: FieldSpec = FieldSpec::query("pageSize", "page_size")
    .kind(FieldKind::Integer)
    .describe("Number of items to return (max 100)");

/// Pagination cursor sent in the request body.
pub(crate) const START_CURSOR_BODY: FieldSpec = FieldSpec::body("startCursor", "start_cursor")
    .describe("Cursor returned by a previous response as next_cursor");

/// Page size sent in the request body.
pub(crate) const PAGE_SIZE_BODY: FieldSpec = FieldSpec::body("pageSize", "page_size")
    .kind(FieldKind::Integer)
    .describe("Number of items to return (max 100)");

/// Every endpoint exposed by the server.
pub const ENDPOINTS: &[EndpointDescriptor] = &[
    users::GET_USER,
    users::GET_USERS,
    users::GET_SELF,
    databases::POST_DATABASE_QUERY,
    search::POST_SEARCH,
    blocks::GET_BLOCK_CHILDREN,
    blocks::PATCH_BLOCK_CHILDREN,
    blocks::RETRIEVE_A_BLOCK,
    blocks::UPDATE_A_BLOCK,
    blocks::DELETE_A_BLOCK,
    pages::RETRIEVE_A_PAGE,
    pages::PATCH_PAGE,
    pages::POST_PAGE,
    databases::CREATE_A_DATABASE,
    databases::UPDATE_A_DATABASE,
    databases::RETRIEVE_A_DATABASE,
    pages::RETRIEVE_A_PAGE_PROPERTY,
    comments::RETRIEVE_A_COMMENT,
    comments::CREATE_A_COMMENT,
    file_uploads::RETRIEVE_A_FILE_UPLOAD,
];
