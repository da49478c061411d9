//! Inventory Model

use serde::{Deserialize, Serialize};

/// Inventory item category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryCategory {
    Ingredients,
    Beverages,
    Supplies,
    Equipment,
}

impl InventoryCategory {
    pub const ALL: [InventoryCategory; 4] = [
        Self::Ingredients,
        Self::Beverages,
        Self::Supplies,
        Self::Equipment,
    ];
}

/// Inventory item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: InventoryCategory,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    /// Measurement unit, e.g. "kg" or "bottle"
    pub unit: String,
    /// Unit price in cents
    pub unit_price: i64,
    pub supplier: Option<String>,
    pub last_restocked: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl InventoryItem {
    pub fn is_out_of_stock(&self) -> bool {
        self.current_stock == 0
    }

    /// Low means at or below the reorder threshold, but not empty
    pub fn is_low_stock(&self) -> bool {
        !self.is_out_of_stock() && self.current_stock <= self.min_stock
    }
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub category: InventoryCategory,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    pub unit: String,
    /// Unit price in cents
    pub unit_price: i64,
    pub supplier: Option<String>,
}

/// Update inventory item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<InventoryCategory>,
    pub current_stock: Option<i32>,
    pub min_stock: Option<i32>,
    pub max_stock: Option<i32>,
    pub unit: Option<String>,
    /// Unit price in cents
    pub unit_price: Option<i64>,
    pub supplier: Option<String>,
    pub last_restocked: Option<i64>,
}
