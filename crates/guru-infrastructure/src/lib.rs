//! In-memory implementations of the guru-core backend traits.
//!
//! These back the local development mode and the test suites. Real
//! deployments substitute network-backed implementations behind the
//! same traits.

mod memory_session_archive;
mod memory_user_context;
mod memory_vector_store;
mod noop_web_search;
mod scoring;
mod static_course_catalog;

pub use memory_session_archive::MemorySessionArchive;
pub use memory_user_context::MemoryUserContext;
pub use memory_vector_store::{ArtifactEntry, MemoryVectorStore};
pub use noop_web_search::NoopWebSearch;
pub use static_course_catalog::{CourseEntry, StaticCourseCatalog};
