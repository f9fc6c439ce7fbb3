// src/batch/mod.rs
pub mod models;
pub mod router;

// Re-export key batch types for convenience
pub use models::{BatchResult, DocumentOutcome, DocumentStatus, Manifest};
pub use router::Router;
