//! Relationship API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::auth::{ActiveMember, AdminUser};
use crate::models::{CreateRelationshipRequest, Relationship};
use crate::AppState;

/// GET /api/relationships - List all relationships.
pub async fn list_relationships(
    State(state): State<AppState>,
    _member: ActiveMember,
) -> ApiResult<Vec<Relationship>> {
    success(state.repo.list_relationships().await?)
}

/// POST /api/relationships - Link two persons.
pub async fn create_relationship(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(request): Json<CreateRelationshipRequest>,
) -> ApiResult<Relationship> {
    success(state.repo.create_relationship(&request).await?)
}

/// DELETE /api/relationships/:id - Remove a relationship.
pub async fn delete_relationship(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_relationship(&id).await?;
    success(())
}
