//! Table registry
//!
//! Reads plus the externally driven status writes (reserve, cleaning).
//! The Available<->Occupied edges belong to submission and the order
//! lifecycle; this service still validates every write against the
//! table state machine.

use std::sync::Arc;

use serde::Serialize;
use shared::models::{DiningTable, TableStatus};
use shared::{PosError, PosResult};
use tracing::info;

use crate::store::PosStore;

/// Table status breakdown for the tables page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub reserved: usize,
    pub cleaning: usize,
}

/// Aggregate status counts over one fetched table list
pub fn compute_table_stats(tables: &[DiningTable]) -> TableStats {
    let mut stats = TableStats {
        total: tables.len(),
        ..TableStats::default()
    };
    for table in tables {
        match table.status {
            TableStatus::Available => stats.available += 1,
            TableStatus::Occupied => stats.occupied += 1,
            TableStatus::Reserved => stats.reserved += 1,
            TableStatus::Cleaning => stats.cleaning += 1,
        }
    }
    stats
}

pub struct TableService {
    store: Arc<dyn PosStore>,
}

impl TableService {
    pub fn new(store: Arc<dyn PosStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> PosResult<Vec<DiningTable>> {
        self.store.list_tables().await
    }

    pub async fn get(&self, id: &str) -> PosResult<DiningTable> {
        self.store.get_table(id).await
    }

    pub async fn list_by_status(&self, status: TableStatus) -> PosResult<Vec<DiningTable>> {
        let tables = self.store.list_tables().await?;
        Ok(tables.into_iter().filter(|t| t.status == status).collect())
    }

    /// Validated status write
    ///
    /// Writing the current status again is an idempotent no-op.
    pub async fn set_status(&self, id: &str, next: TableStatus) -> PosResult<DiningTable> {
        let table = self.store.get_table(id).await?;
        if table.status == next {
            return Ok(table);
        }
        if !table.status.can_transition_to(next) {
            return Err(PosError::invalid_transition(table.status, next));
        }
        let updated = self.store.set_table_status(id, next).await?;
        info!(table_id = %id, from = %table.status, to = %next, "Table status changed");
        Ok(updated)
    }

    pub async fn stats(&self) -> PosResult<TableStats> {
        let tables = self.store.list_tables().await?;
        Ok(compute_table_stats(&tables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_compute_table_stats() {
        let store = MemoryStore::new();
        store.insert_table(1, 2, TableStatus::Available);
        store.insert_table(2, 4, TableStatus::Occupied);
        store.insert_table(3, 4, TableStatus::Occupied);
        store.insert_table(4, 6, TableStatus::Cleaning);

        let tables = store.list_tables().await.unwrap();
        let stats = compute_table_stats(&tables);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.available, 1);
        assert_eq!(stats.occupied, 2);
        assert_eq!(stats.reserved, 0);
        assert_eq!(stats.cleaning, 1);
    }

    #[tokio::test]
    async fn test_set_status_validates_transition() {
        let store = Arc::new(MemoryStore::new());
        let table = store.insert_table(1, 2, TableStatus::Occupied);
        let service = TableService::new(store.clone());

        let err = service
            .set_status(&table.id, TableStatus::Reserved)
            .await
            .unwrap_err();
        assert!(matches!(err, PosError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_set_status_same_state_is_noop() {
        let store = Arc::new(MemoryStore::new());
        let table = store.insert_table(1, 2, TableStatus::Available);
        let service = TableService::new(store.clone());

        let result = service
            .set_status(&table.id, TableStatus::Available)
            .await
            .unwrap();
        assert_eq!(result.status, TableStatus::Available);
    }

    #[tokio::test]
    async fn test_reserve_and_release() {
        let store = Arc::new(MemoryStore::new());
        let table = store.insert_table(1, 2, TableStatus::Available);
        let service = TableService::new(store.clone());

        service.set_status(&table.id, TableStatus::Reserved).await.unwrap();
        let reserved = service.list_by_status(TableStatus::Reserved).await.unwrap();
        assert_eq!(reserved.len(), 1);

        service.set_status(&table.id, TableStatus::Available).await.unwrap();
        assert_eq!(service.stats().await.unwrap().available, 1);
    }
}
