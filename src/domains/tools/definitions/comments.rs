//! Comment endpoints.

use super::super::descriptor::{EndpointDescriptor, FieldKind, FieldSpec, HttpMethod};
use super::{PAGE_SIZE_QUERY, START_CURSOR_QUERY};

/// Lists the unresolved comments of a page or block.
pub const RETRIEVE_A_COMMENT: EndpointDescriptor = EndpointDescriptor {
    name: "retrieve-a-comment",
    description: "Retrieve comments",
    method: HttpMethod::Get,
    path: "/v1/comments",
    fields: &[
        FieldSpec::query("blockId", "block_id")
            .required()
            .describe("Identifier of the page or block whose comments are listed"),
        START_CURSOR_QUERY,
        PAGE_SIZE_QUERY,
    ],
};

/// Either `parent` (new discussion) or `discussionId` (reply) must be given.
pub const CREATE_A_COMMENT: EndpointDescriptor = EndpointDescriptor {
    name: "create-a-comment",
    description: "Create comment",
    method: HttpMethod::Post,
    path: "/v1/comments",
    fields: &[
        FieldSpec::body("parent", "parent")
            .kind(FieldKind::Object)
            .describe("Page to start a new discussion on, e.g. {\"page_id\":\"...\"}"),
        FieldSpec::body("discussionId", "discussion_id")
            .describe("Existing discussion thread to reply to"),
        FieldSpec::body("richText", "rich_text")
            .kind(FieldKind::Array)
            .required()
            .describe("Rich text objects forming the comment"),
    ],
};
