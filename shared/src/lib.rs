//! Shared types for the RestoPOS core
//!
//! Common types used across the workspace: data models, status state
//! machines, and the error taxonomy.

pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{PosError, PosResult, SubmitStage};
