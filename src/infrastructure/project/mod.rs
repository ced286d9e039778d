//! Project infrastructure
//!
//! In-memory project storage plus the listing and similarity services
//! built on it.

mod ranker;
mod repository;
mod similarity;

pub use ranker::{ListProjectsRequest, ProjectRanker};
pub use repository::InMemoryProjectRepository;
pub use similarity::{
    SimilarProject, SimilarProjects, SimilarProjectsService, DEFAULT_SIMILAR_LIMIT,
};
