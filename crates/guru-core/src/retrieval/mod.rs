//! Grounded retrieval subsystem.
//!
//! Four specialized agents (discoverer, researcher, archivist,
//! thinker) sequenced by `RetrievalPipeline` into a single call that
//! either responds with grounded evidence, asks for clarification, or
//! refuses.

pub mod archivist;
pub mod discoverer;
pub mod model;
pub mod pipeline;
pub mod researcher;
pub mod store;
pub mod thinker;

pub use archivist::ArchivistAgent;
pub use discoverer::DiscovererAgent;
pub use model::{
    ChunkKind, ContentKind, GroundingContext, InquiryHistory, NextAction, PipelineOutput,
    PipelineStatus, RetrievalBuckets, RetrievalResult, SessionChunk, SourceOrigin, SourceSignal,
    Synthesis, SynthesisStrategy, UserProfile,
};
pub use pipeline::RetrievalPipeline;
pub use researcher::ResearcherAgent;
pub use store::{CourseCatalog, SessionArchive, UserContextStore, VectorStore, WebSearch};
pub use thinker::ThinkerAgent;
