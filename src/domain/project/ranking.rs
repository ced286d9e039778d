//! Ranking of candidate projects

use std::collections::{HashMap, HashSet};

use super::entity::{ProjectId, ProjectSummary};
use super::page::{Page, PageRequest};
use super::sort::SortKey;

/// Deduplicate, order and paginate candidates
///
/// The result depends only on the candidate set, so the same inputs always
/// give the same page.
pub fn rank(
    candidates: Vec<ProjectSummary>,
    sort: SortKey,
    request: PageRequest,
) -> Page<ProjectSummary> {
    let mut seen = HashSet::with_capacity(candidates.len());
    let mut ordered: Vec<ProjectSummary> = candidates
        .into_iter()
        .filter(|p| seen.insert(p.id()))
        .collect();

    ordered.sort_by(|a, b| sort.compare(a, b));

    Page::from_ordered(ordered, request)
}

/// Count how often each project appears alongside `target`
///
/// Returns `(project, shared)` pairs ordered by shared count descending then
/// id ascending, excluding `target`, cut to `limit`.
pub fn co_occurrence(
    target: ProjectId,
    neighbours: impl IntoIterator<Item = ProjectId>,
    limit: usize,
) -> Vec<(ProjectId, usize)> {
    let mut counts: HashMap<ProjectId, usize> = HashMap::new();
    for id in neighbours.into_iter().filter(|id| *id != target) {
        *counts.entry(id).or_default() += 1;
    }

    let mut ranked: Vec<(ProjectId, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}
