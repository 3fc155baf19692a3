//! Inventory items and stock levels

use crate::error::Error;
use hushold_model::{find_by_name, InventoryItem, ShoppingListEntry};
use hushold_store::Store;
use hushold_units::{convert_to_base_unit, ItemFacts, Unit};
use log::warn;
use serde_json::json;

pub(crate) const COLLECTION: &str = "inventory";

/// Service client for the inventory collection.
pub struct InventoryService {
    store: Store,
}

impl InventoryService {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// All inventory items.
    pub async fn list(&self) -> Result<Vec<InventoryItem>, Error> {
        Ok(self.store.collection(COLLECTION).fetch().await?)
    }

    /// Finds an item by name or alias, case-insensitively.
    ///
    /// Alias matching happens client-side: the store cannot search inside
    /// the alias array without case pitfalls around Danish letters.
    pub async fn find(&self, name: &str) -> Result<Option<InventoryItem>, Error> {
        let items = self.list().await?;
        Ok(find_by_name(&items, name).cloned())
    }

    pub async fn create(&self, item: &InventoryItem) -> Result<(), Error> {
        self.store.collection(COLLECTION).insert(item).await?;
        Ok(())
    }

    /// Manual stock edit from the inventory page.
    pub async fn set_stock(&self, id: &str, quantity: f64) -> Result<(), Error> {
        self.store
            .collection(COLLECTION)
            .eq("id", id)
            .update(&json!({ "currentStock": quantity }))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.store.collection(COLLECTION).eq("id", id).delete().await?;
        Ok(())
    }
}

/// Stock gained by purchasing a shopping-list entry, in the item's
/// stock-tracking unit.
///
/// Whole-unit purchases ("2 stk") add `count × per-unit content`; other
/// units are converted with the item's conversion facts. When no conversion
/// path exists the purchase is confirmed without a stock adjustment rather
/// than recording a quantity in the wrong unit.
pub fn purchase_gain(item: &InventoryItem, entry: &ShoppingListEntry) -> f64 {
    let stock_unit = Unit::parse(&item.unit);
    let bought_unit = Unit::parse(&entry.unit);

    if bought_unit == Unit::Piece && stock_unit != Unit::Piece {
        if let Some(content) = item.per_unit_content() {
            return entry.quantity_to_buy * content;
        }
    }

    let facts = ItemFacts {
        grams_per_unit: item.grams_per_unit,
        weight_per_piece: item.weight_per_piece,
    };
    match convert_to_base_unit(entry.quantity_to_buy, &entry.unit, &stock_unit, Some(&facts)) {
        Ok(converted) => converted.amount,
        Err(err) => {
            warn!("{err}; confirming '{}' without stock adjustment", entry.name);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(quantity: f64, unit: &str) -> ShoppingListEntry {
        ShoppingListEntry {
            name: "hakkede tomater".to_string(),
            quantity_to_buy: quantity,
            unit: unit.to_string(),
            store_section: "Konserves".to_string(),
        }
    }

    fn item(unit: &str, stock: f64) -> InventoryItem {
        InventoryItem {
            id: "i-1".to_string(),
            name: "Hakkede tomater".to_string(),
            aliases: vec![],
            unit: unit.to_string(),
            grams_per_unit: None,
            weight_per_piece: None,
            current_stock: stock,
            buy_as_whole_unit: false,
            purchase_unit: None,
            category: String::new(),
            price_per_kg: None,
            price_per_unit: None,
        }
    }

    #[test]
    fn whole_unit_purchase_adds_per_unit_content() {
        let mut tomatoes = item("g", 100.0);
        tomatoes.grams_per_unit = Some(400.0);
        assert_eq!(purchase_gain(&tomatoes, &entry(2.0, "stk")), 800.0);
    }

    #[test]
    fn same_unit_purchase_adds_directly() {
        let milk = item("l", 0.5);
        assert_eq!(purchase_gain(&milk, &entry(1.0, "l")), 1.0);
    }

    #[test]
    fn convertible_unit_purchase_is_converted() {
        let milk = item("l", 0.5);
        assert_eq!(purchase_gain(&milk, &entry(500.0, "ml")), 0.5);
    }

    #[test]
    fn unconvertible_purchase_adjusts_nothing() {
        let spices = item("g", 10.0);
        assert_eq!(purchase_gain(&spices, &entry(2.0, "spsk")), 0.0);
    }
}
