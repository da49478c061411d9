//! Storage collaborator
//!
//! The hosted database is an external collaborator: the core only sees
//! the operation surface below. [`MemoryStore`] is the in-process
//! implementation used by tests and demos.
//!
//! The store performs direct writes only; business validation (status
//! state machines, payload checks) belongs to the services on top.

mod memory;

pub use memory::{MemoryStore, StoreOp};

use async_trait::async_trait;
use shared::PosResult;
use shared::models::{
    Category, DiningTable, InventoryItem, InventoryItemCreate, InventoryItemUpdate, MenuItem,
    MenuItemCreate, MenuItemFilter, MenuItemUpdate, Order, OrderCreate, OrderLine,
    OrderLineCreate, OrderStatus, TableStatus,
};

/// Hosted-database client surface consumed by the core
#[async_trait]
pub trait PosStore: Send + Sync {
    // ========== Tables ==========

    /// All tables, ordered by table number
    async fn list_tables(&self) -> PosResult<Vec<DiningTable>>;

    /// Fails with `NotFound` on an unknown id
    async fn get_table(&self, id: &str) -> PosResult<DiningTable>;

    /// Direct status write; fails with `NotFound` on an unknown id
    async fn set_table_status(&self, id: &str, status: TableStatus) -> PosResult<DiningTable>;

    // ========== Catalog ==========

    async fn list_categories(&self) -> PosResult<Vec<Category>>;

    /// Filter resolution is the collaborator's responsibility
    async fn list_menu_items(&self, filter: &MenuItemFilter) -> PosResult<Vec<MenuItem>>;

    async fn create_menu_item(&self, payload: MenuItemCreate) -> PosResult<MenuItem>;

    async fn update_menu_item(&self, id: &str, payload: MenuItemUpdate) -> PosResult<MenuItem>;

    async fn delete_menu_item(&self, id: &str) -> PosResult<()>;

    // ========== Orders ==========

    /// Create the order header
    ///
    /// A store that has already honored `payload.idempotency_key`
    /// returns the previously created order instead of inserting again.
    async fn create_order(&self, payload: OrderCreate) -> PosResult<Order>;

    /// Create one persisted line per builder line, referencing the header
    async fn create_order_lines(
        &self,
        order_id: &str,
        lines: Vec<OrderLineCreate>,
    ) -> PosResult<Vec<OrderLine>>;

    async fn get_order(&self, id: &str) -> PosResult<Order>;

    async fn get_order_lines(&self, order_id: &str) -> PosResult<Vec<OrderLine>>;

    /// All orders, newest first
    async fn list_orders(&self) -> PosResult<Vec<Order>>;

    async fn list_orders_by_status(&self, status: OrderStatus) -> PosResult<Vec<Order>>;

    async fn list_orders_by_table(&self, table_id: &str) -> PosResult<Vec<Order>>;

    /// Direct status write; transition validation happens in `OrderService`
    async fn update_order_status(&self, id: &str, status: OrderStatus) -> PosResult<Order>;

    /// Delete header and lines (cascade)
    async fn delete_order(&self, id: &str) -> PosResult<()>;

    // ========== Inventory ==========

    /// All inventory items, ordered by name
    async fn list_inventory_items(&self) -> PosResult<Vec<InventoryItem>>;

    async fn create_inventory_item(&self, payload: InventoryItemCreate)
    -> PosResult<InventoryItem>;

    async fn update_inventory_item(
        &self,
        id: &str,
        payload: InventoryItemUpdate,
    ) -> PosResult<InventoryItem>;

    async fn delete_inventory_item(&self, id: &str) -> PosResult<()>;
}
