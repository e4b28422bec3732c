//! User endpoints.

use super::super::descriptor::{EndpointDescriptor, FieldSpec, HttpMethod};
use super::{PAGE_SIZE_QUERY, START_CURSOR_QUERY};

pub const GET_USER: EndpointDescriptor = EndpointDescriptor {
    name: "get-user",
    description: "Retrieve a user",
    method: HttpMethod::Get,
    path: "/v1/users/{userId}",
    fields: &[FieldSpec::path("userId", "user_id")],
};

pub const GET_USERS: EndpointDescriptor = EndpointDescriptor {
    name: "get-users",
    description: "List all users",
    method: HttpMethod::Get,
    path: "/v1/users",
    fields: &[START_CURSOR_QUERY, PAGE_SIZE_QUERY],
};

pub const GET_SELF: EndpointDescriptor = EndpointDescriptor {
    name: "get-self",
    description: "Retrieve your token's bot user",
    method: HttpMethod::Get,
    path: "/v1/users/me",
    fields: &[],
};
