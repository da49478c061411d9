//! Order session
//!
//! The client-local builder that accumulates menu selections for one
//! table. Nothing here touches the store: a session is either
//! discarded (no server effect) or handed to [`OrderSubmitter`] for
//! the atomic-intent write.
//!
//! Mutations are synchronous; the UI serializes them through
//! single-threaded event dispatch.

mod submit;

pub use submit::OrderSubmitter;

use shared::models::{DiningTable, MenuItem, OrderLineCreate, TableStatus};
use shared::{PosError, PosResult};
use uuid::Uuid;

/// One (menu item, quantity) aggregation within a session
///
/// `unit_price` is the catalog price at the moment the item was first
/// added; a mid-session catalog price change does not move an
/// in-progress order's total.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLine {
    pub menu_item_id: String,
    pub name: String,
    /// Unit price in cents, captured at add time
    pub unit_price: i64,
    pub quantity: i32,
    /// Prep estimate in minutes, captured at add time
    pub prep_time: i32,
    pub note: Option<String>,
}

/// Client-local order builder for one selected table
#[derive(Debug, Default)]
pub struct OrderSession {
    table: Option<DiningTable>,
    lines: Vec<SessionLine>,
    customer_name: Option<String>,
    order_note: Option<String>,
    /// Stable across manual retries of a failed submit, so the store
    /// can deduplicate; rotated when the session restarts
    submission_key: Option<String>,
}

impl OrderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_table(&self) -> Option<&DiningTable> {
        self.table.as_ref()
    }

    pub fn lines(&self) -> &[SessionLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    pub fn order_note(&self) -> Option<&str> {
        self.order_note.as_deref()
    }

    pub(crate) fn submission_key(&self) -> Option<&str> {
        self.submission_key.as_deref()
    }

    /// Start a session on `table`
    ///
    /// Fails with `InvalidSelection` unless the table is Available; on
    /// failure the previous active table and lines are untouched.
    pub fn select_table(&mut self, table: &DiningTable) -> PosResult<()> {
        if table.status != TableStatus::Available {
            return Err(PosError::invalid_selection(format!(
                "table {} is {}",
                table.table_number, table.status
            )));
        }
        tracing::debug!(table_id = %table.id, table_number = table.table_number, "Session started");
        self.table = Some(table.clone());
        self.lines.clear();
        self.customer_name = None;
        self.order_note = None;
        self.submission_key = Some(Uuid::new_v4().to_string());
        Ok(())
    }

    /// Add one unit of `item`, merging into an existing line
    pub fn add_item(&mut self, item: &MenuItem) -> PosResult<()> {
        self.add_item_with_note(item, None)
    }

    /// Add one unit of `item` with a free-text note on its line
    pub fn add_item_with_note(&mut self, item: &MenuItem, note: Option<String>) -> PosResult<()> {
        if self.table.is_none() {
            // UI should prevent this; the builder still guards it
            return Err(PosError::NoActiveTable);
        }
        if !item.is_available {
            return Err(PosError::item_unavailable(&item.name));
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.menu_item_id == item.id) {
            line.quantity += 1;
            if note.is_some() {
                line.note = note;
            }
        } else {
            self.lines.push(SessionLine {
                menu_item_id: item.id.clone(),
                name: item.name.clone(),
                unit_price: item.price,
                quantity: 1,
                prep_time: item.prep_time,
                note,
            });
        }
        Ok(())
    }

    /// Remove one unit of the matching line; drops the line at zero.
    /// No-op when the item is not present.
    pub fn remove_item(&mut self, menu_item_id: &str) {
        if let Some(idx) = self.lines.iter().position(|l| l.menu_item_id == menu_item_id) {
            self.lines[idx].quantity -= 1;
            if self.lines[idx].quantity == 0 {
                self.lines.remove(idx);
            }
        }
    }

    /// Sum of `unit_price * quantity` over lines, in cents
    pub fn total(&self) -> i64 {
        self.lines
            .iter()
            .map(|l| l.unit_price * l.quantity as i64)
            .sum()
    }

    /// Sum of quantities, for display
    pub fn item_count(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Max prep estimate over lines in minutes, 0 when empty (ETA signal)
    pub fn max_prep_time(&self) -> i32 {
        self.lines.iter().map(|l| l.prep_time).max().unwrap_or(0)
    }

    pub fn set_customer_name(&mut self, name: Option<String>) {
        self.customer_name = name;
    }

    pub fn set_order_note(&mut self, note: Option<String>) {
        self.order_note = note;
    }

    /// Abandon the session: no server effect
    pub fn discard(&mut self) {
        self.table = None;
        self.lines.clear();
        self.customer_name = None;
        self.order_note = None;
        self.submission_key = None;
    }

    /// Line payloads for persistence, with frozen unit prices
    pub fn line_payloads(&self) -> Vec<OrderLineCreate> {
        self.lines
            .iter()
            .map(|l| OrderLineCreate {
                menu_item_id: l.menu_item_id.clone(),
                quantity: l.quantity,
                unit_price: l.unit_price,
                note: l.note.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(status: TableStatus) -> DiningTable {
        DiningTable {
            id: "table-7".to_string(),
            table_number: 7,
            seats: 4,
            status,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn menu_item(id: &str, name: &str, price: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            price,
            category_id: "cat-1".to_string(),
            image_url: None,
            prep_time: 10,
            is_popular: false,
            is_available: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_aggregation_scenario() {
        // A at 10.00, B at 5.00
        let mut session = OrderSession::new();
        session.select_table(&table(TableStatus::Available)).unwrap();

        let a = menu_item("item-a", "Pad Thai", 1000);
        let b = menu_item("item-b", "Iced Tea", 500);

        session.add_item(&a).unwrap();
        session.add_item(&a).unwrap();
        session.add_item(&b).unwrap();
        assert_eq!(session.item_count(), 3);
        assert_eq!(session.total(), 2500);
        assert_eq!(session.lines().len(), 2);

        session.remove_item("item-a");
        assert_eq!(session.item_count(), 2);
        assert_eq!(session.total(), 1500);
    }

    #[test]
    fn test_remove_drops_line_at_zero() {
        let mut session = OrderSession::new();
        session.select_table(&table(TableStatus::Available)).unwrap();
        let a = menu_item("item-a", "Pad Thai", 1000);

        session.add_item(&a).unwrap();
        session.remove_item("item-a");
        assert!(session.is_empty());
        assert_eq!(session.item_count(), 0);

        // Absent item is a silent no-op
        session.remove_item("item-a");
        assert_eq!(session.item_count(), 0);
    }

    #[test]
    fn test_select_occupied_table_preserves_session() {
        let mut session = OrderSession::new();
        session.select_table(&table(TableStatus::Available)).unwrap();
        let a = menu_item("item-a", "Pad Thai", 1000);
        session.add_item(&a).unwrap();

        let occupied = DiningTable {
            id: "table-9".to_string(),
            table_number: 9,
            ..table(TableStatus::Occupied)
        };
        let err = session.select_table(&occupied).unwrap_err();
        assert!(matches!(err, PosError::InvalidSelection { .. }));

        // Previous table and lines untouched
        assert_eq!(session.active_table().unwrap().id, "table-7");
        assert_eq!(session.item_count(), 1);
    }

    #[test]
    fn test_add_without_table_fails() {
        let mut session = OrderSession::new();
        let a = menu_item("item-a", "Pad Thai", 1000);
        let err = session.add_item(&a).unwrap_err();
        assert!(matches!(err, PosError::NoActiveTable));
        assert!(session.is_empty());
    }

    #[test]
    fn test_unavailable_item_rejected() {
        let mut session = OrderSession::new();
        session.select_table(&table(TableStatus::Available)).unwrap();
        let mut a = menu_item("item-a", "Pad Thai", 1000);
        a.is_available = false;

        let err = session.add_item(&a).unwrap_err();
        assert!(matches!(err, PosError::ItemUnavailable { .. }));
    }

    #[test]
    fn test_total_uses_captured_price() {
        let mut session = OrderSession::new();
        session.select_table(&table(TableStatus::Available)).unwrap();
        let mut a = menu_item("item-a", "Pad Thai", 1000);
        session.add_item(&a).unwrap();

        // Catalog price changes mid-session; merged add keeps the
        // captured price
        a.price = 9900;
        session.add_item(&a).unwrap();
        assert_eq!(session.total(), 2000);
    }

    #[test]
    fn test_max_prep_time() {
        let mut session = OrderSession::new();
        assert_eq!(session.max_prep_time(), 0);

        session.select_table(&table(TableStatus::Available)).unwrap();
        let mut a = menu_item("item-a", "Pad Thai", 1000);
        a.prep_time = 15;
        let mut b = menu_item("item-b", "Iced Tea", 500);
        b.prep_time = 3;
        session.add_item(&a).unwrap();
        session.add_item(&b).unwrap();
        assert_eq!(session.max_prep_time(), 15);
    }

    #[test]
    fn test_reselect_clears_lines_and_rotates_key() {
        let mut session = OrderSession::new();
        session.select_table(&table(TableStatus::Available)).unwrap();
        let first_key = session.submission_key().unwrap().to_string();
        session.add_item(&menu_item("item-a", "Pad Thai", 1000)).unwrap();

        session.select_table(&table(TableStatus::Available)).unwrap();
        assert!(session.is_empty());
        assert_ne!(session.submission_key().unwrap(), first_key);
    }

    #[test]
    fn test_item_count_never_negative() {
        let mut session = OrderSession::new();
        session.select_table(&table(TableStatus::Available)).unwrap();
        session.remove_item("ghost");
        session.remove_item("ghost");
        assert_eq!(session.item_count(), 0);
        assert_eq!(session.total(), 0);
    }
}
