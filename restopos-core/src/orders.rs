//! Order lifecycle
//!
//! Status advancement with state-machine validation, and the table
//! side-effect rule: a table returns to Available only when its last
//! open order terminates.

use std::sync::Arc;

use futures::future::try_join_all;
use serde::Serialize;
use shared::models::{Order, OrderStatus, OrderWithLines, TableStatus};
use shared::{PosError, PosResult};
use tracing::info;

use crate::store::PosStore;

/// Today's order counters for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
    pub served: usize,
    pub cancelled: usize,
    /// Revenue from served orders, in cents
    pub today_revenue: i64,
}

/// Aggregate counters over orders created at or after `since` (millis)
pub fn compute_order_stats(orders: &[Order], since: i64) -> OrderStats {
    let mut stats = OrderStats::default();
    for order in orders.iter().filter(|o| o.created_at >= since) {
        stats.total += 1;
        match order.status {
            OrderStatus::Pending => stats.pending += 1,
            OrderStatus::Preparing => stats.preparing += 1,
            OrderStatus::Ready => stats.ready += 1,
            OrderStatus::Served => {
                stats.served += 1;
                stats.today_revenue += order.total_amount;
            }
            OrderStatus::Cancelled => stats.cancelled += 1,
        }
    }
    stats
}

fn start_of_today_millis() -> i64 {
    chrono::Utc::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

pub struct OrderService {
    store: Arc<dyn PosStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn PosStore>) -> Self {
        Self { store }
    }

    /// All orders with their lines, newest first
    pub async fn list_with_lines(&self) -> PosResult<Vec<OrderWithLines>> {
        let orders = self.store.list_orders().await?;
        let lines =
            try_join_all(orders.iter().map(|o| self.store.get_order_lines(&o.id))).await?;
        Ok(orders
            .into_iter()
            .zip(lines)
            .map(|(order, lines)| OrderWithLines { order, lines })
            .collect())
    }

    pub async fn list_by_status(&self, status: OrderStatus) -> PosResult<Vec<Order>> {
        self.store.list_orders_by_status(status).await
    }

    pub async fn list_by_table(&self, table_id: &str) -> PosResult<Vec<Order>> {
        self.store.list_orders_by_table(table_id).await
    }

    /// Advance an order, enforcing the forward-only sequence
    ///
    /// Reaching a terminal state triggers the conditional table
    /// release.
    pub async fn update_status(&self, id: &str, next: OrderStatus) -> PosResult<Order> {
        let order = self.store.get_order(id).await?;
        if !order.status.can_transition_to(next) {
            return Err(PosError::invalid_transition(order.status, next));
        }
        let updated = self.store.update_order_status(id, next).await?;
        info!(order_id = %id, from = %order.status, to = %next, "Order status changed");
        if next.is_terminal() {
            self.release_table_if_idle(&updated.table_id).await?;
        }
        Ok(updated)
    }

    /// Remove an order (header + lines), releasing its table when no
    /// other open order remains
    pub async fn delete(&self, id: &str) -> PosResult<()> {
        let order = self.store.get_order(id).await?;
        self.store.delete_order(id).await?;
        self.release_table_if_idle(&order.table_id).await?;
        Ok(())
    }

    pub async fn stats(&self) -> PosResult<OrderStats> {
        let orders = self.store.list_orders().await?;
        Ok(compute_order_stats(&orders, start_of_today_millis()))
    }

    /// Side-effect rule: only the last open order frees the table
    async fn release_table_if_idle(&self, table_id: &str) -> PosResult<()> {
        let still_open = self
            .store
            .list_orders_by_table(table_id)
            .await?
            .iter()
            .any(|o| o.status.is_open());
        if still_open {
            return Ok(());
        }
        let table = self.store.get_table(table_id).await?;
        if table.status == TableStatus::Occupied {
            self.store
                .set_table_status(table_id, TableStatus::Available)
                .await?;
            info!(table_id = %table_id, "Table released");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: OrderStatus, total: i64, created_at: i64) -> Order {
        Order {
            id: "order-1".to_string(),
            table_id: "table-1".to_string(),
            customer_name: None,
            status,
            total_amount: total,
            notes: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_compute_order_stats() {
        let orders = vec![
            order(OrderStatus::Pending, 1000, 100),
            order(OrderStatus::Served, 2500, 100),
            order(OrderStatus::Served, 1500, 100),
            order(OrderStatus::Cancelled, 900, 100),
        ];
        let stats = compute_order_stats(&orders, 0);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.served, 2);
        assert_eq!(stats.cancelled, 1);
        // Only served orders count toward revenue
        assert_eq!(stats.today_revenue, 4000);
    }

    #[test]
    fn test_stats_respect_since_cutoff() {
        let orders = vec![
            order(OrderStatus::Served, 2500, 50),
            order(OrderStatus::Served, 1000, 200),
        ];
        let stats = compute_order_stats(&orders, 100);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.today_revenue, 1000);
    }
}
