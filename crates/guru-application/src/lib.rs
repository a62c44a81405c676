//! Application layer: the process-level composition root.
//!
//! A host (HTTP router, CLI, desktop shell) constructs one
//! [`GuruUseCase`] with its collaborators and drives everything
//! through it.

mod usecase;

pub use usecase::{GuruUseCase, SessionCreated};
