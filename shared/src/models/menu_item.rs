//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Price in cents
    pub price: i64,
    /// Category reference (String ID, required)
    pub category_id: String,
    pub image_url: Option<String>,
    /// Estimated preparation time in minutes
    pub prep_time: i32,
    pub is_popular: bool,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    /// Price in cents
    pub price: i64,
    pub category_id: String,
    pub image_url: Option<String>,
    pub prep_time: Option<i32>,
    pub is_popular: Option<bool>,
    pub is_available: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Price in cents
    pub price: Option<i64>,
    pub category_id: Option<String>,
    pub image_url: Option<String>,
    pub prep_time: Option<i32>,
    pub is_popular: Option<bool>,
    pub is_available: Option<bool>,
}

/// Catalog read filter (resolved by the storage collaborator)
#[derive(Debug, Clone, Default)]
pub struct MenuItemFilter {
    pub category_id: Option<String>,
    pub only_available: bool,
    pub only_popular: bool,
}

impl MenuItemFilter {
    /// Filter for the order-entry page: available items only
    pub fn available() -> Self {
        Self {
            only_available: true,
            ..Self::default()
        }
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        if self.only_available && !item.is_available {
            return false;
        }
        if self.only_popular && !item.is_popular {
            return false;
        }
        if let Some(ref category_id) = self.category_id
            && item.category_id != *category_id
        {
            return false;
        }
        true
    }
}
