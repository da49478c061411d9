//! Unified error types for the RestoPOS core
//!
//! Local precondition failures (`InvalidSelection`, `NoActiveTable`,
//! `EmptyOrder`, `ItemUnavailable`, `Validation`) are detected before
//! any collaborator call and are never retried. Remote failures carry
//! enough context for the caller to offer a manual retry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Submission pipeline stage, reported when a submit fails mid-flight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmitStage {
    CreateOrder,
    CreateLines,
    SetTableStatus,
}

impl std::fmt::Display for SubmitStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CreateOrder => "CREATE_ORDER",
            Self::CreateLines => "CREATE_LINES",
            Self::SetTableStatus => "SET_TABLE_STATUS",
        };
        write!(f, "{}", s)
    }
}

/// Unified error type for the core
#[derive(Debug, Error)]
pub enum PosError {
    /// Table cannot start a session
    #[error("Invalid selection: {message}")]
    InvalidSelection { message: String },

    /// Builder mutation without a selected table
    #[error("No active table selected")]
    NoActiveTable,

    /// Submission attempted with zero lines
    #[error("Order has no lines")]
    EmptyOrder,

    /// Menu item is flagged unavailable
    #[error("Menu item is not available: {name}")]
    ItemUnavailable { name: String },

    /// Collaborator lookup miss
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Transport or constraint failure from the storage collaborator
    #[error("Persistence error: {detail}")]
    Persistence { detail: String },

    /// Submission failed at an identified stage
    #[error("Submission failed at {stage}: {detail}")]
    Submission { stage: SubmitStage, detail: String },

    /// The submit pipeline exceeded its deadline
    #[error("Submission timed out")]
    SubmissionTimedOut,

    /// A submission is already outstanding for this session
    #[error("Submission already in flight")]
    SubmissionInFlight,

    /// Status state machine violation (table or order)
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Payload validation failure
    #[error("{message}")]
    Validation { message: String },
}

impl PosError {
    // ========== Convenient constructors ==========

    pub fn invalid_selection(message: impl Into<String>) -> Self {
        Self::InvalidSelection {
            message: message.into(),
        }
    }

    pub fn item_unavailable(name: impl Into<String>) -> Self {
        Self::ItemUnavailable { name: name.into() }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn persistence(detail: impl Into<String>) -> Self {
        Self::Persistence {
            detail: detail.into(),
        }
    }

    pub fn submission(stage: SubmitStage, detail: impl Into<String>) -> Self {
        Self::Submission {
            stage,
            detail: detail.into(),
        }
    }

    pub fn invalid_transition(
        from: impl std::fmt::Display,
        to: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    // ========== Error inspection methods ==========

    /// Local precondition violation, raised before any remote call
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidSelection { .. }
                | Self::NoActiveTable
                | Self::EmptyOrder
                | Self::ItemUnavailable { .. }
                | Self::Validation { .. }
        )
    }

    /// Remote failure where the caller may offer a manual retry
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Persistence { .. } | Self::Submission { .. } | Self::SubmissionTimedOut
        )
    }
}

/// Result type for core operations
pub type PosResult<T> = Result<T, PosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = PosError::not_found("Table");
        assert_eq!(format!("{}", err), "Table not found");

        let err = PosError::submission(SubmitStage::CreateLines, "connection reset");
        assert_eq!(
            format!("{}", err),
            "Submission failed at CREATE_LINES: connection reset"
        );
    }

    #[test]
    fn test_precondition_classification() {
        assert!(PosError::NoActiveTable.is_precondition());
        assert!(PosError::EmptyOrder.is_precondition());
        assert!(PosError::invalid_selection("occupied").is_precondition());
        assert!(!PosError::persistence("boom").is_precondition());
        assert!(!PosError::SubmissionTimedOut.is_precondition());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(PosError::persistence("boom").is_retryable());
        assert!(PosError::SubmissionTimedOut.is_retryable());
        assert!(!PosError::EmptyOrder.is_retryable());
        assert!(!PosError::SubmissionInFlight.is_retryable());
    }

    #[test]
    fn test_submit_stage_serialization() {
        let json = serde_json::to_string(&SubmitStage::SetTableStatus).unwrap();
        assert_eq!(json, "\"SET_TABLE_STATUS\"");
    }
}
