//! Comment API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{non_blank, success, ApiResult};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::{CommentThread, CreateCommentRequest};
use crate::tree::{place_reply, thread_comments};
use crate::AppState;

/// GET /api/persons/:id/comments - Comment threads about a person.
pub async fn list_comments(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(person_id): Path<String>,
) -> ApiResult<Vec<CommentThread>> {
    let comments = state.repo.list_comments(&person_id).await?;
    success(thread_comments(comments))
}

/// POST /api/persons/:id/comments - Comment on a person or reply to a comment.
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(person_id): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<CommentThread> {
    let Some(content) = non_blank(&request.content) else {
        return Err(AppError::Validation("Comment cannot be empty".to_string()));
    };
    state.repo.require_person(&person_id).await?;

    let target = match request.parent_id.as_deref() {
        Some(parent_id) => {
            let parent = state
                .repo
                .get_comment(parent_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", parent_id)))?;
            if parent.member_id != person_id {
                return Err(AppError::Validation(
                    "Replies must stay on the same person".to_string(),
                ));
            }
            Some(parent)
        }
        None => None,
    };

    let placement = place_reply(target.as_ref());
    let comment = state
        .repo
        .create_comment(&person_id, &user.id, content, &placement)
        .await?;

    tracing::info!(
        comment_id = %comment.id,
        person_id = %person_id,
        parent_id = ?comment.parent_id,
        "comment added"
    );
    success(CommentThread::from(comment))
}

/// DELETE /api/comments/:id - Delete one's own comment, or any as admin.
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let comment = state
        .repo
        .get_comment(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", id)))?;

    if comment.user_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only the author or an administrator may delete this comment".to_string(),
        ));
    }

    state.repo.delete_comment(&id).await?;
    success(())
}
