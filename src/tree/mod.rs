//! Pure tree-shaping logic over rows loaded from storage.
//!
//! Nothing in here performs I/O. Each function takes the rows a request
//! loaded and returns a fresh derived value, so handlers can call them freely.

mod comments;
mod generations;
mod root;

pub use comments::*;
pub use generations::*;
pub use root::*;

use std::collections::HashSet;

use crate::models::{Person, Relationship};

/// Ids that appear as the child end of a child-type relationship.
pub fn child_ids(relationships: &[Relationship]) -> HashSet<&str> {
    relationships
        .iter()
        .filter_map(Relationship::parent_child)
        .map(|(_, child)| child)
        .collect()
}

/// Persons with no recorded parent, in input order.
pub fn topological_roots<'a>(
    persons: &'a [Person],
    relationships: &[Relationship],
) -> Vec<&'a Person> {
    let children = child_ids(relationships);
    persons
        .iter()
        .filter(|p| !children.contains(p.id.as_str()))
        .collect()
}

/// Order persons by birth year ascending with unknown years last.
///
/// The sort is stable, so persons sharing a year keep their relative order.
/// [`resolve_root`] relies on this ordering for its fallback tie-break.
pub fn sort_by_birth_year(persons: &mut [Person]) {
    persons.sort_by_key(|p| (p.birth_year.is_none(), p.birth_year));
}
