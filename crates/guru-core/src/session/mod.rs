//! Session domain: the `DiagnosticSession` entity, its stage enum and
//! the in-memory store.

pub mod model;
pub mod store;

pub use model::{DiagnosticSession, MentorStage};
pub use store::{SessionHandle, SessionStore};
