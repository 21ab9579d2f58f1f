//! Family tree endpoint feeding the diagram, mindmap and list views.

use axum::extract::{Query, State};

use super::{success, ApiResult};
use crate::auth::MaybeUser;
use crate::models::{Person, TreeQuery, TreeView};
use crate::tree::{count_generations, resolve_root, sort_by_birth_year, RootHints};
use crate::AppState;

/// GET /api/tree - Persons, relationships, resolved root and generation count.
///
/// Guests get the public person fields only.
pub async fn get_tree(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<TreeQuery>,
) -> ApiResult<TreeView> {
    let mut persons = state.repo.list_persons().await?;
    sort_by_birth_year(&mut persons);
    let relationships = state.repo.list_relationships().await?;

    let user_root = match &user {
        Some(profile) => state.repo.get_user_root(&profile.id).await?,
        None => None,
    };

    let hints = RootHints {
        explicit: query.root_id.as_deref().filter(|id| !id.is_empty()),
        user_preferred: user_root.as_ref().map(|r| r.root_node_id.as_str()),
    };
    let root_id = resolve_root(&persons, &relationships, &hints).map(|root| {
        tracing::debug!(source = ?root.source, "tree root chosen");
        root.id.to_string()
    });
    let generations = count_generations(&persons, &relationships);

    let persons: Vec<Person> = if user.is_some() {
        persons
    } else {
        persons.into_iter().map(Person::into_public).collect()
    };

    success(TreeView {
        root_id,
        generations,
        total_members: persons.len(),
        persons,
        relationships,
    })
}
