//! Resolution of the person the tree is drawn from.

use crate::models::{Gender, Person, Relationship};

use super::topological_roots;

/// Optional caller-supplied root candidates, highest priority first.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootHints<'a> {
    /// Id requested explicitly, e.g. from the `rootId` query parameter.
    pub explicit: Option<&'a str>,
    /// Root the signed-in user saved for themselves.
    pub user_preferred: Option<&'a str>,
}

/// Which tier of the hint chain produced the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    Explicit,
    UserPreferred,
    SystemDefault,
    MaleTopologicalRoot,
    TopologicalRoot,
    FirstPerson,
}

/// Outcome of [`resolve_root`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRoot<'a> {
    pub id: &'a str,
    pub source: RootSource,
}

/// Pick the person to anchor the tree on.
///
/// Tiers are tried in order: explicit id, per-user root, the person flagged
/// as system default, the first male person without parents, the first person
/// without parents, and finally the first person. Hint ids that match no
/// person are skipped. `persons` must already be ordered by birth year
/// ascending with unknown years last (see [`super::sort_by_birth_year`]).
///
/// Returns `None` only when `persons` is empty.
pub fn resolve_root<'a>(
    persons: &'a [Person],
    relationships: &[Relationship],
    hints: &RootHints<'_>,
) -> Option<ResolvedRoot<'a>> {
    let find = |id: Option<&str>| id.and_then(|id| persons.iter().find(|p| p.id == id));

    let hinted = [
        (hints.explicit, RootSource::Explicit),
        (hints.user_preferred, RootSource::UserPreferred),
    ];
    for (id, source) in hinted {
        if let Some(person) = find(id) {
            return Some(resolved(person, source));
        }
    }

    if let Some(person) = persons
        .iter()
        .find(|p| p.is_default_root_node == Some(true))
    {
        return Some(resolved(person, RootSource::SystemDefault));
    }

    let roots = topological_roots(persons, relationships);
    if let Some(person) = roots.iter().copied().find(|p| p.gender == Gender::Male) {
        return Some(resolved(person, RootSource::MaleTopologicalRoot));
    }
    if let Some(person) = roots.first().copied() {
        return Some(resolved(person, RootSource::TopologicalRoot));
    }

    persons
        .first()
        .map(|person| resolved(person, RootSource::FirstPerson))
}

fn resolved(person: &Person, source: RootSource) -> ResolvedRoot<'_> {
    ResolvedRoot {
        id: &person.id,
        source,
    }
}
