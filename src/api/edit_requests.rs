//! Edit request API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{matches_search, non_blank, success, ApiResult};
use crate::auth::{ActiveMember, AdminUser, CurrentUser};
use crate::errors::AppError;
use crate::models::{
    CreateEditRequestRequest, EditRequest, EditRequestListQuery, EditRequestStatus,
    ReviewEditRequest,
};
use crate::AppState;

/// POST /api/persons/:id/edit-requests - Ask administrators to change a person.
pub async fn submit_edit_request(
    State(state): State<AppState>,
    ActiveMember(member): ActiveMember,
    Path(person_id): Path<String>,
    Json(request): Json<CreateEditRequestRequest>,
) -> ApiResult<EditRequest> {
    let Some(content) = non_blank(&request.content) else {
        return Err(AppError::Validation(
            "Describe the change you are requesting".to_string(),
        ));
    };
    state.repo.require_person(&person_id).await?;

    success(
        state
            .repo
            .create_edit_request(&person_id, &member.id, content)
            .await?,
    )
}

/// GET /api/me/edit-requests - Requests submitted by the caller.
pub async fn list_own_edit_requests(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Vec<EditRequest>> {
    success(state.repo.list_edit_requests_for_user(&user.id).await?)
}

/// GET /api/edit-requests - All requests, filterable by status and name.
pub async fn list_edit_requests(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<EditRequestListQuery>,
) -> ApiResult<Vec<EditRequest>> {
    let requests = state.repo.list_edit_requests(query.status).await?;

    match query.search.as_deref().and_then(non_blank) {
        Some(term) => {
            let term = term.to_lowercase();
            success(
                requests
                    .into_iter()
                    .filter(|r| {
                        matches_search(r.person_name.as_deref(), &term)
                            || matches_search(r.user_name.as_deref(), &term)
                    })
                    .collect(),
            )
        }
        None => success(requests),
    }
}

/// PUT /api/edit-requests/:id/approve - Approve a pending request.
pub async fn approve_edit_request(
    state: State<AppState>,
    admin: AdminUser,
    id: Path<String>,
    request: Json<ReviewEditRequest>,
) -> ApiResult<EditRequest> {
    review(state, admin, id, request, EditRequestStatus::Approved).await
}

/// PUT /api/edit-requests/:id/reject - Reject a pending request.
pub async fn reject_edit_request(
    state: State<AppState>,
    admin: AdminUser,
    id: Path<String>,
    request: Json<ReviewEditRequest>,
) -> ApiResult<EditRequest> {
    review(state, admin, id, request, EditRequestStatus::Rejected).await
}

async fn review(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    Json(request): Json<ReviewEditRequest>,
    status: EditRequestStatus,
) -> ApiResult<EditRequest> {
    let admin_note = request.admin_note.as_deref().and_then(non_blank);
    let reviewed = state
        .repo
        .review_edit_request(&id, status, admin_note)
        .await?;

    tracing::info!(admin_id = %admin.id, request_id = %id, status = status.as_str(), "edit request reviewed");
    success(reviewed)
}
