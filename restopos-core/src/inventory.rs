//! Inventory
//!
//! Stock CRUD, threshold queries, and the inventory page aggregation.

use std::sync::Arc;

use serde::Serialize;
use shared::PosResult;
use shared::models::{
    InventoryCategory, InventoryItem, InventoryItemCreate, InventoryItemUpdate,
};
use tracing::info;

use crate::store::PosStore;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative,
    validate_optional_text, validate_required_text,
};

/// Per-category item counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub ingredients: usize,
    pub beverages: usize,
    pub supplies: usize,
    pub equipment: usize,
}

/// Inventory page aggregation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total_items: usize,
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
    /// Stock valuation (stock x unit price), in cents
    pub total_value: i64,
    pub categories: CategoryBreakdown,
}

/// Aggregate counters over one fetched item list
pub fn compute_inventory_stats(items: &[InventoryItem]) -> InventoryStats {
    let mut stats = InventoryStats {
        total_items: items.len(),
        ..InventoryStats::default()
    };
    for item in items {
        match item.category {
            InventoryCategory::Ingredients => stats.categories.ingredients += 1,
            InventoryCategory::Beverages => stats.categories.beverages += 1,
            InventoryCategory::Supplies => stats.categories.supplies += 1,
            InventoryCategory::Equipment => stats.categories.equipment += 1,
        }
        if item.is_out_of_stock() {
            stats.out_of_stock_items += 1;
        } else if item.is_low_stock() {
            stats.low_stock_items += 1;
        }
        stats.total_value += item.current_stock as i64 * item.unit_price;
    }
    stats
}

pub struct InventoryService {
    store: Arc<dyn PosStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn PosStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> PosResult<Vec<InventoryItem>> {
        self.store.list_inventory_items().await
    }

    pub async fn list_by_category(
        &self,
        category: InventoryCategory,
    ) -> PosResult<Vec<InventoryItem>> {
        let items = self.store.list_inventory_items().await?;
        Ok(items.into_iter().filter(|i| i.category == category).collect())
    }

    /// Items at or below their reorder threshold (but not empty)
    pub async fn low_stock(&self) -> PosResult<Vec<InventoryItem>> {
        let items = self.store.list_inventory_items().await?;
        Ok(items.into_iter().filter(|i| i.is_low_stock()).collect())
    }

    pub async fn out_of_stock(&self) -> PosResult<Vec<InventoryItem>> {
        let items = self.store.list_inventory_items().await?;
        Ok(items.into_iter().filter(|i| i.is_out_of_stock()).collect())
    }

    /// Case-insensitive search over name, description, and supplier
    pub async fn search(&self, query: &str) -> PosResult<Vec<InventoryItem>> {
        let needle = query.to_lowercase();
        let items = self.store.list_inventory_items().await?;
        Ok(items
            .into_iter()
            .filter(|i| {
                i.name.to_lowercase().contains(&needle)
                    || i.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
                    || i.supplier
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Set the stock level and stamp the restock time
    pub async fn update_stock(&self, id: &str, new_stock: i32) -> PosResult<InventoryItem> {
        validate_non_negative(new_stock as i64, "current_stock")?;
        let updated = self
            .store
            .update_inventory_item(
                id,
                InventoryItemUpdate {
                    current_stock: Some(new_stock),
                    last_restocked: Some(chrono::Utc::now().timestamp_millis()),
                    ..InventoryItemUpdate::default()
                },
            )
            .await?;
        info!(item_id = %id, new_stock, "Stock updated");
        Ok(updated)
    }

    pub async fn create(&self, payload: InventoryItemCreate) -> PosResult<InventoryItem> {
        validate_create(&payload)?;
        self.store.create_inventory_item(payload).await
    }

    pub async fn update(
        &self,
        id: &str,
        payload: InventoryItemUpdate,
    ) -> PosResult<InventoryItem> {
        validate_update(&payload)?;
        self.store.update_inventory_item(id, payload).await
    }

    pub async fn delete(&self, id: &str) -> PosResult<()> {
        self.store.delete_inventory_item(id).await
    }

    pub async fn stats(&self) -> PosResult<InventoryStats> {
        let items = self.store.list_inventory_items().await?;
        Ok(compute_inventory_stats(&items))
    }
}

fn validate_create(payload: &InventoryItemCreate) -> PosResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.supplier, "supplier", MAX_SHORT_TEXT_LEN)?;
    validate_non_negative(payload.current_stock as i64, "current_stock")?;
    validate_non_negative(payload.min_stock as i64, "min_stock")?;
    validate_non_negative(payload.max_stock as i64, "max_stock")?;
    validate_non_negative(payload.unit_price, "unit_price")?;
    if payload.max_stock < payload.min_stock {
        return Err(shared::PosError::validation(
            "max_stock must not be below min_stock",
        ));
    }
    Ok(())
}

fn validate_update(payload: &InventoryItemUpdate) -> PosResult<()> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref unit) = payload.unit {
        validate_required_text(unit, "unit", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.supplier, "supplier", MAX_SHORT_TEXT_LEN)?;
    if let Some(stock) = payload.current_stock {
        validate_non_negative(stock as i64, "current_stock")?;
    }
    if let Some(price) = payload.unit_price {
        validate_non_negative(price, "unit_price")?;
    }
    Ok(())
}
