//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table status
///
/// `Available -> Occupied` happens only through order submission, and
/// `Occupied -> Available` only when the last open order on the table
/// terminates. Reserved/Cleaning are externally driven and reachable
/// only from Available.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Cleaning,
}

impl TableStatus {
    /// Whether a direct transition to `next` is permitted
    pub fn can_transition_to(self, next: TableStatus) -> bool {
        use TableStatus::*;
        matches!(
            (self, next),
            (Available, Occupied)
                | (Occupied, Available)
                | (Available, Reserved)
                | (Reserved, Available)
                | (Available, Cleaning)
                | (Cleaning, Available)
        )
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Available => "AVAILABLE",
            Self::Occupied => "OCCUPIED",
            Self::Reserved => "RESERVED",
            Self::Cleaning => "CLEANING",
        };
        write!(f, "{}", s)
    }
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    pub table_number: i32,
    pub seats: i32,
    pub status: TableStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
