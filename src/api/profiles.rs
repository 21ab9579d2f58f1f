//! Profile and personal-settings API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{non_blank, success, ApiResult};
use crate::auth::{AdminUser, CurrentUser};
use crate::errors::AppError;
use crate::models::{
    Profile, SetRootNodeRequest, UpdateOwnProfileRequest, UpdateProfileRequest, UserRootNode,
};
use crate::AppState;

/// GET /api/me - The caller's profile.
pub async fn get_me(CurrentUser(user): CurrentUser) -> ApiResult<Profile> {
    success(user)
}

/// PUT /api/me - Change the caller's display name.
pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<UpdateOwnProfileRequest>,
) -> ApiResult<Profile> {
    let Some(full_name) = non_blank(&request.full_name) else {
        return Err(AppError::Validation(
            "Display name cannot be empty".to_string(),
        ));
    };

    success(state.repo.rename_profile(&user.id, full_name).await?)
}

/// GET /api/me/root-node - The caller's personal tree root, if set.
pub async fn get_my_root_node(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Option<UserRootNode>> {
    success(state.repo.get_user_root(&user.id).await?)
}

/// PUT /api/me/root-node - Choose the caller's personal tree root.
pub async fn set_my_root_node(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<SetRootNodeRequest>,
) -> ApiResult<UserRootNode> {
    success(state.repo.set_user_root(&user.id, &request.person_id).await?)
}

/// DELETE /api/me/root-node - Go back to the shared default root.
pub async fn clear_my_root_node(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<()> {
    state.repo.clear_user_root(&user.id).await?;
    success(())
}

/// GET /api/profiles - All user profiles.
pub async fn list_profiles(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Vec<Profile>> {
    success(state.repo.list_profiles().await?)
}

/// PUT /api/profiles/:id - Change a user's role or activation.
pub async fn update_profile(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<Profile> {
    success(state.repo.update_profile(&id, &request).await?)
}
