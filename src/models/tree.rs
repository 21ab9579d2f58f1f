//! Tree view payload returned to the diagram, mindmap and list views.

use serde::{Deserialize, Serialize};

use super::{Person, Relationship};

/// Everything a client needs to render the family tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeView {
    pub root_id: Option<String>,
    pub generations: u32,
    pub total_members: usize,
    pub persons: Vec<Person>,
    pub relationships: Vec<Relationship>,
}

/// Query parameters for the tree endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeQuery {
    #[serde(default)]
    pub root_id: Option<String>,
}
