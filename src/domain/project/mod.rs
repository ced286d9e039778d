//! Project domain
//!
//! Project summaries, the sort and pagination rules for listings, and the
//! co-occurrence ranking behind similar-project suggestions.

mod candidate;
mod entity;
mod page;
mod ranking;
mod repository;
mod sort;

pub use candidate::{CandidateSource, IdList};
pub use entity::{Manage, ProjectId, ProjectSummary, StackEntry, Tagging};
pub use page::{Page, PageLimits, PageRequest, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use ranking::{co_occurrence, rank};
pub use repository::ProjectRepository;
pub use sort::SortKey;

#[cfg(test)]
pub use repository::MockProjectRepository;
