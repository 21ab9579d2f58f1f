//! Edit requests submitted by members for administrator review.

use serde::{Deserialize, Serialize};

/// Review state of an edit request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EditRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl EditRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditRequestStatus::Pending => "pending",
            EditRequestStatus::Approved => "approved",
            EditRequestStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(EditRequestStatus::Pending),
            "approved" => Some(EditRequestStatus::Approved),
            "rejected" => Some(EditRequestStatus::Rejected),
            _ => None,
        }
    }
}

/// A request to change a person's record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub id: String,
    pub person_id: String,
    pub user_id: String,
    pub content: String,
    pub status: EditRequestStatus,
    pub admin_note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Request body for submitting an edit request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEditRequestRequest {
    pub content: String,
}

/// Request body for approving or rejecting.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEditRequest {
    #[serde(default)]
    pub admin_note: Option<String>,
}

/// Query parameters for the administrator list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditRequestListQuery {
    #[serde(default)]
    pub status: Option<EditRequestStatus>,
    #[serde(default)]
    pub search: Option<String>,
}
