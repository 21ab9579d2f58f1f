//! Person API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{matches_search, non_blank, success, ApiResult};
use crate::auth::{ActiveMember, AdminUser};
use crate::errors::AppError;
use crate::models::{
    CreatePersonRequest, Person, PersonListQuery, UpdateNoteRequest, UpdatePersonRequest,
};
use crate::AppState;

/// GET /api/persons - List persons, optionally filtered by name.
pub async fn list_persons(
    State(state): State<AppState>,
    _member: ActiveMember,
    Query(query): Query<PersonListQuery>,
) -> ApiResult<Vec<Person>> {
    let persons = state.repo.list_persons().await?;

    match query.search.as_deref().and_then(non_blank) {
        Some(term) => {
            let term = term.to_lowercase();
            success(
                persons
                    .into_iter()
                    .filter(|p| matches_search(Some(p.full_name.as_str()), &term))
                    .collect(),
            )
        }
        None => success(persons),
    }
}

/// GET /api/persons/:id - Get a single person.
pub async fn get_person(
    State(state): State<AppState>,
    _member: ActiveMember,
    Path(id): Path<String>,
) -> ApiResult<Person> {
    match state.repo.get_person(&id).await? {
        Some(person) => success(person),
        None => Err(AppError::NotFound(format!("Person {} not found", id))),
    }
}

/// POST /api/persons - Create a new person.
pub async fn create_person(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(request): Json<CreatePersonRequest>,
) -> ApiResult<Person> {
    if non_blank(&request.full_name).is_none() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }

    success(state.repo.create_person(&request).await?)
}

/// PUT /api/persons/:id - Update a person.
pub async fn update_person(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(request): Json<UpdatePersonRequest>,
) -> ApiResult<Person> {
    if request
        .full_name
        .as_deref()
        .is_some_and(|name| non_blank(name).is_none())
    {
        return Err(AppError::Validation("Full name cannot be blank".to_string()));
    }

    success(state.repo.update_person(&id, &request).await?)
}

/// DELETE /api/persons/:id - Delete a person without relationships.
pub async fn delete_person(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_person(&id).await?;
    success(())
}

/// PUT /api/persons/:id/note - Replace the note on a person.
pub async fn update_person_note(
    State(state): State<AppState>,
    _member: ActiveMember,
    Path(id): Path<String>,
    Json(request): Json<UpdateNoteRequest>,
) -> ApiResult<Person> {
    success(state.repo.update_note(&id, non_blank(&request.note)).await?)
}

/// PUT /api/persons/:id/default-root - Make this person the default tree root.
pub async fn set_default_root(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Person> {
    let person = state.repo.set_default_root(&id).await?;
    tracing::info!(admin_id = %admin.id, person_id = %id, "default root set");
    success(person)
}
