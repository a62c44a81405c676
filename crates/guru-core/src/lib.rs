//! Guru diagnostic core.
//!
//! Two coupled subsystems with all the real control flow:
//!
//! - the **mentor loop** ([`mentor::MentorLoopOrchestrator`]): a
//!   six-phase diagnostic conversation state machine over
//!   [`session::DiagnosticSession`];
//! - the **retrieval pipeline** ([`retrieval::RetrievalPipeline`]):
//!   four specialized agents producing a confidence-gated, grounded
//!   answer/ask/refuse decision.
//!
//! Everything external — model inference, vector storage, web search,
//! user context — is consumed through the capability traits in
//! [`diagnostic`] and [`retrieval::store`]; the HTTP layer lives in a
//! host application, not here.

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod mentor;
pub mod retrieval;
pub mod session;

// Re-export common error type
pub use config::GuruConfig;
pub use error::{GuruError, Result};
