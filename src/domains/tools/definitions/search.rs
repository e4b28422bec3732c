//! Search endpoint.

use super::super::descriptor::{EndpointDescriptor, FieldKind, FieldSpec, HttpMethod};
use super::{PAGE_SIZE_BODY, START_CURSOR_BODY};

pub const POST_SEARCH: EndpointDescriptor = EndpointDescriptor {
    name: "post-search",
    description: "Search by title",
    method: HttpMethod::Post,
    path: "/v1/search",
    fields: &[
        FieldSpec::body("query", "query").describe("Text matched against page and database titles"),
        FieldSpec::body("filter", "filter")
            .kind(FieldKind::Object)
            .describe("Limit results to pages or databases, e.g. {\"property\":\"object\",\"value\":\"page\"}"),
        FieldSpec::body("sort", "sort").kind(FieldKind::Object),
        START_CURSOR_BODY,
        PAGE_SIZE_BODY,
    ],
};
