//! Generation depth of the whole forest.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::models::{Person, Relationship};

use super::topological_roots;

/// Deepest generation reachable from any person without parents.
///
/// Every parentless person starts at generation 1 and the forest is walked
/// breadth-first along child-type edges. Persons reached more than once are
/// counted on their first visit only. Cycles that no parentless person leads
/// into are not counted. Returns 0 when there are no persons.
pub fn count_generations(persons: &[Person], relationships: &[Relationship]) -> u32 {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for (parent, child) in relationships.iter().filter_map(Relationship::parent_child) {
        children.entry(parent).or_default().push(child);
    }

    let mut queue: VecDeque<(&str, u32)> = topological_roots(persons, relationships)
        .into_iter()
        .map(|p| (p.id.as_str(), 1))
        .collect();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut max_generation = 0;

    while let Some((id, generation)) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        max_generation = max_generation.max(generation);
        if let Some(kids) = children.get(id) {
            queue.extend(kids.iter().map(|kid| (*kid, generation + 1)));
        }
    }

    tracing::debug!(generations = max_generation, "counted generations");
    max_generation
}
