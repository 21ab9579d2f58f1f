//! Relationship model: a typed edge between two persons.

use serde::{Deserialize, Serialize};

/// Kind of relationship between `person_a` and `person_b`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Marriage,
    BiologicalChild,
    AdoptedChild,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Marriage => "marriage",
            RelationshipType::BiologicalChild => "biological_child",
            RelationshipType::AdoptedChild => "adopted_child",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "marriage" => Some(RelationshipType::Marriage),
            "biological_child" => Some(RelationshipType::BiologicalChild),
            "adopted_child" => Some(RelationshipType::AdoptedChild),
            _ => None,
        }
    }

    /// Child-type edges point from parent (`person_a`) to child (`person_b`).
    pub fn is_child(&self) -> bool {
        matches!(
            self,
            RelationshipType::BiologicalChild | RelationshipType::AdoptedChild
        )
    }
}

/// A relationship between two persons.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RelationshipType,
    pub person_a: String,
    pub person_b: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    pub created_at: String,
}

impl Relationship {
    /// Returns `(parent, child)` for child-type edges.
    pub fn parent_child(&self) -> Option<(&str, &str)> {
        self.kind
            .is_child()
            .then(|| (self.person_a.as_str(), self.person_b.as_str()))
    }
}

/// Request body for creating a relationship.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationshipRequest {
    #[serde(rename = "type")]
    pub kind: RelationshipType,
    pub person_a: String,
    pub person_b: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}
