//! In-memory store
//!
//! Backs tests and demos. Honors the idempotency-key contract of
//! [`PosStore::create_order`] and supports one-shot fault injection so
//! partial-failure submission paths can be exercised.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared::models::{
    Category, DiningTable, InventoryItem, InventoryItemCreate, InventoryItemUpdate, MenuItem,
    MenuItemCreate, MenuItemFilter, MenuItemUpdate, Order, OrderCreate, OrderLine,
    OrderLineCreate, OrderStatus, TableStatus,
};
use shared::{PosError, PosResult};
use uuid::Uuid;

use super::PosStore;

/// Store operations targetable by fault injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    ListTables,
    GetTable,
    SetTableStatus,
    ListCategories,
    ListMenuItems,
    CreateMenuItem,
    UpdateMenuItem,
    DeleteMenuItem,
    CreateOrder,
    CreateOrderLines,
    GetOrder,
    GetOrderLines,
    ListOrders,
    UpdateOrderStatus,
    DeleteOrder,
    ListInventory,
    CreateInventoryItem,
    UpdateInventoryItem,
    DeleteInventoryItem,
}

#[derive(Default)]
struct Inner {
    tables: Vec<DiningTable>,
    categories: Vec<Category>,
    menu_items: Vec<MenuItem>,
    /// Insertion order preserved; listed newest first
    orders: Vec<Order>,
    order_lines: HashMap<String, Vec<OrderLine>>,
    inventory: Vec<InventoryItem>,
    /// idempotency_key -> order id
    processed_keys: HashMap<String, String>,
}

/// In-memory [`PosStore`] implementation
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    fail_next: Mutex<HashSet<StoreOp>>,
    latency: Mutex<Option<Duration>>,
    calls: AtomicU64,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Test support ==========

    /// Fail the next call of `op` with a persistence error
    pub fn fail_next(&self, op: StoreOp) {
        self.fail_next.lock().insert(op);
    }

    /// Delay every operation by `latency` (timeout and guard tests)
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = Some(latency);
    }

    /// Number of store operations issued so far
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Seed a table directly (tables have no create API in the core)
    pub fn insert_table(&self, table_number: i32, seats: i32, status: TableStatus) -> DiningTable {
        let now = now_millis();
        let table = DiningTable {
            id: new_id(),
            table_number,
            seats,
            status,
            created_at: now,
            updated_at: now,
        };
        let mut inner = self.inner.write();
        inner.tables.push(table.clone());
        inner.tables.sort_by_key(|t| t.table_number);
        table
    }

    /// Seed a category directly
    pub fn insert_category(&self, name: &str, description: Option<&str>) -> Category {
        let category = Category {
            id: new_id(),
            name: name.to_string(),
            description: description.map(String::from),
        };
        self.inner.write().categories.push(category.clone());
        category
    }

    async fn begin(&self, op: StoreOp) -> PosResult<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail_next.lock().remove(&op) {
            return Err(PosError::persistence(format!("injected failure: {:?}", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl PosStore for MemoryStore {
    // ========== Tables ==========

    async fn list_tables(&self) -> PosResult<Vec<DiningTable>> {
        self.begin(StoreOp::ListTables).await?;
        Ok(self.inner.read().tables.clone())
    }

    async fn get_table(&self, id: &str) -> PosResult<DiningTable> {
        self.begin(StoreOp::GetTable).await?;
        self.inner
            .read()
            .tables
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| PosError::not_found("Table"))
    }

    async fn set_table_status(&self, id: &str, status: TableStatus) -> PosResult<DiningTable> {
        self.begin(StoreOp::SetTableStatus).await?;
        let mut inner = self.inner.write();
        let table = inner
            .tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PosError::not_found("Table"))?;
        table.status = status;
        table.updated_at = now_millis();
        Ok(table.clone())
    }

    // ========== Catalog ==========

    async fn list_categories(&self) -> PosResult<Vec<Category>> {
        self.begin(StoreOp::ListCategories).await?;
        let mut categories = self.inner.read().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_menu_items(&self, filter: &MenuItemFilter) -> PosResult<Vec<MenuItem>> {
        self.begin(StoreOp::ListMenuItems).await?;
        let mut items: Vec<MenuItem> = self
            .inner
            .read()
            .menu_items
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn create_menu_item(&self, payload: MenuItemCreate) -> PosResult<MenuItem> {
        self.begin(StoreOp::CreateMenuItem).await?;
        let mut inner = self.inner.write();
        if !inner.categories.iter().any(|c| c.id == payload.category_id) {
            return Err(PosError::persistence(format!(
                "category {} violates foreign key",
                payload.category_id
            )));
        }
        let now = now_millis();
        let item = MenuItem {
            id: new_id(),
            name: payload.name,
            description: payload.description,
            price: payload.price,
            category_id: payload.category_id,
            image_url: payload.image_url,
            prep_time: payload.prep_time.unwrap_or(0),
            is_popular: payload.is_popular.unwrap_or(false),
            is_available: payload.is_available.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        inner.menu_items.push(item.clone());
        Ok(item)
    }

    async fn update_menu_item(&self, id: &str, payload: MenuItemUpdate) -> PosResult<MenuItem> {
        self.begin(StoreOp::UpdateMenuItem).await?;
        let mut inner = self.inner.write();
        let item = inner
            .menu_items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| PosError::not_found("Menu item"))?;
        if let Some(name) = payload.name {
            item.name = name;
        }
        if let Some(description) = payload.description {
            item.description = Some(description);
        }
        if let Some(price) = payload.price {
            item.price = price;
        }
        if let Some(category_id) = payload.category_id {
            item.category_id = category_id;
        }
        if let Some(image_url) = payload.image_url {
            item.image_url = Some(image_url);
        }
        if let Some(prep_time) = payload.prep_time {
            item.prep_time = prep_time;
        }
        if let Some(is_popular) = payload.is_popular {
            item.is_popular = is_popular;
        }
        if let Some(is_available) = payload.is_available {
            item.is_available = is_available;
        }
        item.updated_at = now_millis();
        Ok(item.clone())
    }

    async fn delete_menu_item(&self, id: &str) -> PosResult<()> {
        self.begin(StoreOp::DeleteMenuItem).await?;
        let mut inner = self.inner.write();
        let before = inner.menu_items.len();
        inner.menu_items.retain(|i| i.id != id);
        if inner.menu_items.len() == before {
            return Err(PosError::not_found("Menu item"));
        }
        Ok(())
    }

    // ========== Orders ==========

    async fn create_order(&self, payload: OrderCreate) -> PosResult<Order> {
        self.begin(StoreOp::CreateOrder).await?;
        let mut inner = self.inner.write();

        // Idempotency: a key we have already honored returns the original
        if let Some(existing_id) = inner.processed_keys.get(&payload.idempotency_key)
            && let Some(existing) = inner.orders.iter().find(|o| o.id == *existing_id)
        {
            return Ok(existing.clone());
        }

        if !inner.tables.iter().any(|t| t.id == payload.table_id) {
            return Err(PosError::persistence(format!(
                "table {} violates foreign key",
                payload.table_id
            )));
        }

        let now = now_millis();
        let order = Order {
            id: new_id(),
            table_id: payload.table_id,
            customer_name: payload.customer_name,
            status: OrderStatus::Pending,
            total_amount: payload.total_amount,
            notes: payload.notes,
            created_at: now,
            updated_at: now,
        };
        inner
            .processed_keys
            .insert(payload.idempotency_key, order.id.clone());
        inner.orders.push(order.clone());
        Ok(order)
    }

    async fn create_order_lines(
        &self,
        order_id: &str,
        lines: Vec<OrderLineCreate>,
    ) -> PosResult<Vec<OrderLine>> {
        self.begin(StoreOp::CreateOrderLines).await?;
        let mut inner = self.inner.write();
        if !inner.orders.iter().any(|o| o.id == order_id) {
            return Err(PosError::persistence(format!(
                "order {} violates foreign key",
                order_id
            )));
        }
        let created: Vec<OrderLine> = lines
            .into_iter()
            .map(|line| OrderLine {
                id: new_id(),
                order_id: order_id.to_string(),
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                note: line.note,
            })
            .collect();
        inner
            .order_lines
            .entry(order_id.to_string())
            .or_default()
            .extend(created.clone());
        Ok(created)
    }

    async fn get_order(&self, id: &str) -> PosResult<Order> {
        self.begin(StoreOp::GetOrder).await?;
        self.inner
            .read()
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| PosError::not_found("Order"))
    }

    async fn get_order_lines(&self, order_id: &str) -> PosResult<Vec<OrderLine>> {
        self.begin(StoreOp::GetOrderLines).await?;
        Ok(self
            .inner
            .read()
            .order_lines
            .get(order_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_orders(&self) -> PosResult<Vec<Order>> {
        self.begin(StoreOp::ListOrders).await?;
        let mut orders = self.inner.read().orders.clone();
        orders.reverse();
        Ok(orders)
    }

    async fn list_orders_by_status(&self, status: OrderStatus) -> PosResult<Vec<Order>> {
        self.begin(StoreOp::ListOrders).await?;
        let mut orders: Vec<Order> = self
            .inner
            .read()
            .orders
            .iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect();
        orders.reverse();
        Ok(orders)
    }

    async fn list_orders_by_table(&self, table_id: &str) -> PosResult<Vec<Order>> {
        self.begin(StoreOp::ListOrders).await?;
        let mut orders: Vec<Order> = self
            .inner
            .read()
            .orders
            .iter()
            .filter(|o| o.table_id == table_id)
            .cloned()
            .collect();
        orders.reverse();
        Ok(orders)
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> PosResult<Order> {
        self.begin(StoreOp::UpdateOrderStatus).await?;
        let mut inner = self.inner.write();
        let order = inner
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| PosError::not_found("Order"))?;
        order.status = status;
        order.updated_at = now_millis();
        Ok(order.clone())
    }

    async fn delete_order(&self, id: &str) -> PosResult<()> {
        self.begin(StoreOp::DeleteOrder).await?;
        let mut inner = self.inner.write();
        let before = inner.orders.len();
        inner.orders.retain(|o| o.id != id);
        if inner.orders.len() == before {
            return Err(PosError::not_found("Order"));
        }
        inner.order_lines.remove(id);
        // Drop the idempotency mapping with the header, otherwise a
        // retry after compensation would resolve to a deleted order
        inner.processed_keys.retain(|_, order_id| order_id != id);
        Ok(())
    }

    // ========== Inventory ==========

    async fn list_inventory_items(&self) -> PosResult<Vec<InventoryItem>> {
        self.begin(StoreOp::ListInventory).await?;
        let mut items = self.inner.read().inventory.clone();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn create_inventory_item(
        &self,
        payload: InventoryItemCreate,
    ) -> PosResult<InventoryItem> {
        self.begin(StoreOp::CreateInventoryItem).await?;
        let now = now_millis();
        let item = InventoryItem {
            id: new_id(),
            name: payload.name,
            description: payload.description,
            category: payload.category,
            current_stock: payload.current_stock,
            min_stock: payload.min_stock,
            max_stock: payload.max_stock,
            unit: payload.unit,
            unit_price: payload.unit_price,
            supplier: payload.supplier,
            last_restocked: None,
            created_at: now,
            updated_at: now,
        };
        self.inner.write().inventory.push(item.clone());
        Ok(item)
    }

    async fn update_inventory_item(
        &self,
        id: &str,
        payload: InventoryItemUpdate,
    ) -> PosResult<InventoryItem> {
        self.begin(StoreOp::UpdateInventoryItem).await?;
        let mut inner = self.inner.write();
        let item = inner
            .inventory
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| PosError::not_found("Inventory item"))?;
        if let Some(name) = payload.name {
            item.name = name;
        }
        if let Some(description) = payload.description {
            item.description = Some(description);
        }
        if let Some(category) = payload.category {
            item.category = category;
        }
        if let Some(current_stock) = payload.current_stock {
            item.current_stock = current_stock;
        }
        if let Some(min_stock) = payload.min_stock {
            item.min_stock = min_stock;
        }
        if let Some(max_stock) = payload.max_stock {
            item.max_stock = max_stock;
        }
        if let Some(unit) = payload.unit {
            item.unit = unit;
        }
        if let Some(unit_price) = payload.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(supplier) = payload.supplier {
            item.supplier = Some(supplier);
        }
        if let Some(last_restocked) = payload.last_restocked {
            item.last_restocked = Some(last_restocked);
        }
        item.updated_at = now_millis();
        Ok(item.clone())
    }

    async fn delete_inventory_item(&self, id: &str) -> PosResult<()> {
        self.begin(StoreOp::DeleteInventoryItem).await?;
        let mut inner = self.inner.write();
        let before = inner.inventory.len();
        inner.inventory.retain(|i| i.id != id);
        if inner.inventory.len() == before {
            return Err(PosError::not_found("Inventory item"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_create(table_id: &str, key: &str) -> OrderCreate {
        OrderCreate {
            table_id: table_id.to_string(),
            customer_name: None,
            total_amount: 2500,
            notes: None,
            idempotency_key: key.to_string(),
        }
    }

    #[tokio::test]
    async fn test_idempotency_key_dedup() {
        let store = MemoryStore::new();
        let table = store.insert_table(7, 4, TableStatus::Available);

        let first = store.create_order(order_create(&table.id, "key-1")).await.unwrap();
        let second = store.create_order(order_create(&table.id, "key-1")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.list_orders().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_order_releases_idempotency_key() {
        let store = MemoryStore::new();
        let table = store.insert_table(1, 2, TableStatus::Available);

        let order = store.create_order(order_create(&table.id, "key-1")).await.unwrap();
        store.delete_order(&order.id).await.unwrap();

        // Same key now creates a fresh header
        let retried = store.create_order(order_create(&table.id, "key-1")).await.unwrap();
        assert_ne!(order.id, retried.id);
    }

    #[tokio::test]
    async fn test_fault_injection_is_one_shot() {
        let store = MemoryStore::new();
        store.fail_next(StoreOp::ListTables);

        let err = store.list_tables().await.unwrap_err();
        assert!(matches!(err, PosError::Persistence { .. }));
        assert!(store.list_tables().await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_table_fails_fk() {
        let store = MemoryStore::new();
        let err = store
            .create_order(order_create("missing", "key-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, PosError::Persistence { .. }));
    }

    #[tokio::test]
    async fn test_set_table_status_not_found() {
        let store = MemoryStore::new();
        let err = store
            .set_table_status("missing", TableStatus::Occupied)
            .await
            .unwrap_err();
        assert!(matches!(err, PosError::NotFound { .. }));
    }
}
