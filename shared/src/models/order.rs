//! Order Model

use serde::{Deserialize, Serialize};

/// Order status
///
/// Forward-only: Pending -> Preparing -> Ready -> Served. Any
/// non-terminal state may cancel. Served and Cancelled are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Served | Self::Cancelled)
    }

    /// An open order still holds its table
    pub fn is_open(self) -> bool {
        !self.is_terminal()
    }

    /// Whether a direct transition to `next` is permitted
    ///
    /// Skipping forward (e.g. Pending -> Served) is rejected.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (Pending, Preparing) | (Preparing, Ready) | (Ready, Served) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Served => "SERVED",
            Self::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Order entity (persisted header)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Table reference (String ID)
    pub table_id: String,
    pub customer_name: Option<String>,
    pub status: OrderStatus,
    /// Total amount in cents, frozen at submission time
    pub total_amount: i64,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order header payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_id: String,
    pub customer_name: Option<String>,
    /// Total amount in cents, computed by the session at submit time
    pub total_amount: i64,
    pub notes: Option<String>,
    /// Client-generated key; a store that has already honored this key
    /// returns the previously created order instead of inserting again
    pub idempotency_key: String,
}

/// Persisted order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    /// Order reference (String ID)
    pub order_id: String,
    /// Menu item reference (String ID)
    pub menu_item_id: String,
    pub quantity: i32,
    /// Unit price in cents, captured when the item entered the session
    pub unit_price: i64,
    pub note: Option<String>,
}

/// Create order line payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineCreate {
    pub menu_item_id: String,
    pub quantity: i32,
    /// Unit price in cents
    pub unit_price: i64,
    pub note: Option<String>,
}

/// Order with its lines (read model for the orders page)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithLines {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_only_sequence() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Served));
        // No skipping
        assert!(!Pending.can_transition_to(Ready));
        assert!(!Pending.can_transition_to(Served));
        assert!(!Preparing.can_transition_to(Served));
        // No going back
        assert!(!Ready.can_transition_to(Preparing));
        assert!(!Served.can_transition_to(Pending));
    }

    #[test]
    fn test_cancel_from_any_open_state() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Preparing.can_transition_to(Cancelled));
        assert!(Ready.can_transition_to(Cancelled));
        assert!(!Served.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Served.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Pending.is_open());
        assert!(OrderStatus::Preparing.is_open());
        assert!(OrderStatus::Ready.is_open());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"PREPARING\"");
    }
}
