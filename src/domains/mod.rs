//! Domains module containing business logic organized by bounded contexts.
//!
//! The server has a single domain: the Notion API tools.

pub mod tools;
