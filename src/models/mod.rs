//! Data models for the family tree backend.
//!
//! Field names serialize in camelCase for the web client.

mod comment;
mod edit_request;
mod person;
mod profile;
mod relationship;
mod tree;

pub use comment::*;
pub use edit_request::*;
pub use person::*;
pub use profile::*;
pub use relationship::*;
pub use tree::*;
