//! Dashboard page load
//!
//! Every remote read the page needs is issued concurrently and awaited
//! jointly before rendering. This is a latency optimization: each read
//! is independent and the joint await is not correctness-critical.

use std::sync::Arc;

use serde::Serialize;
use shared::PosResult;
use shared::models::{MenuItem, OrderWithLines};

use crate::catalog::CatalogService;
use crate::inventory::{InventoryService, InventoryStats};
use crate::orders::{OrderService, OrderStats};
use crate::store::PosStore;
use crate::tables::{TableService, TableStats};

/// How many recent orders the dashboard shows
const RECENT_ORDERS_LIMIT: usize = 5;

/// How many popular items the dashboard shows
const POPULAR_ITEMS_LIMIT: usize = 6;

/// Everything the dashboard renders, fetched in one fan-out
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub table_stats: TableStats,
    pub order_stats: OrderStats,
    pub inventory_stats: InventoryStats,
    pub popular_items: Vec<MenuItem>,
    pub recent_orders: Vec<OrderWithLines>,
}

/// Load the dashboard with all reads in flight concurrently
pub async fn load_dashboard(store: Arc<dyn PosStore>) -> PosResult<DashboardSnapshot> {
    let tables = TableService::new(store.clone());
    let orders = OrderService::new(store.clone());
    let inventory = InventoryService::new(store.clone());
    let catalog = CatalogService::new(store.clone());

    let (table_stats, order_stats, inventory_stats, mut recent_orders, ()) = tokio::try_join!(
        tables.stats(),
        orders.stats(),
        inventory.stats(),
        orders.list_with_lines(),
        catalog.refresh(),
    )?;
    recent_orders.truncate(RECENT_ORDERS_LIMIT);

    Ok(DashboardSnapshot {
        table_stats,
        order_stats,
        inventory_stats,
        popular_items: catalog.popular_items(POPULAR_ITEMS_LIMIT),
        recent_orders,
    })
}
