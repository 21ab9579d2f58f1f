//! Comments left by users on a person's profile.

use serde::{Deserialize, Serialize};

/// A stored comment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserComment {
    pub id: String,
    /// Person the comment is about.
    pub member_id: String,
    /// Author.
    pub user_id: String,
    pub content: String,
    pub parent_id: Option<String>,
    /// Author of the reply this comment answered, when it was flattened
    /// under the thread root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_user_id: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_name: Option<String>,
}

/// A comment together with its nested replies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: UserComment,
    /// Content with the reply attribution prepended, if any.
    pub display_content: String,
    pub replies: Vec<CommentThread>,
}

/// Request body for posting a comment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}
