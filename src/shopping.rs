//! Shopping list: generation, manual edits and purchase confirmation

use crate::config::ClientOptions;
use crate::error::Error;
use crate::{inventory, meal_plan, recipes};
use chrono::{Duration, NaiveDate};
use hushold_model::{
    find_by_name, name_key, InventoryItem, MealPlanEntry, Recipe, ShoppingListEntry,
};
use hushold_planner::{generate_shopping_list, merge_line};
use hushold_store::Store;
use log::debug;
use serde_json::json;

pub(crate) const COLLECTION: &str = "shopping_list";

/// Service client for the shopping-list collection.
///
/// The list is keyed by lowercased item name; all writes normalize entry
/// names through [`name_key`]. Whole-list writes are read-modify-write
/// against the store, resolved last-write-wins at that boundary.
pub struct ShoppingService {
    store: Store,
    options: ClientOptions,
}

impl ShoppingService {
    pub(crate) fn new(store: Store, options: ClientOptions) -> Self {
        Self { store, options }
    }

    /// The current shopping list.
    pub async fn list(&self) -> Result<Vec<ShoppingListEntry>, Error> {
        Ok(self.store.collection(COLLECTION).fetch().await?)
    }

    /// Generates the list for the default planning window starting at
    /// `from` and persists the result.
    pub async fn generate_for_week(
        &self,
        from: NaiveDate,
    ) -> Result<Vec<ShoppingListEntry>, Error> {
        self.generate_for_window(from, self.options.planning_window_days)
            .await
    }

    /// Generates the list for `from..from + days` and persists the result.
    ///
    /// Fetches fresh snapshots of the meal plan, recipes, inventory and the
    /// existing list, runs the consolidator, and writes the merged list
    /// back. Quantities accumulate across calls; clearing and purchase
    /// confirmation are the deduplicating operations. When the window
    /// produces no demand, nothing is written and the existing list is
    /// returned.
    pub async fn generate_for_window(
        &self,
        from: NaiveDate,
        days: i64,
    ) -> Result<Vec<ShoppingListEntry>, Error> {
        let until = from + Duration::days(days);
        let window: Vec<MealPlanEntry> = self
            .store
            .collection(meal_plan::COLLECTION)
            .gte("date", &from.to_string())
            .lt("date", &until.to_string())
            .fetch()
            .await?;
        let recipes: Vec<Recipe> = self.store.collection(recipes::COLLECTION).fetch().await?;
        let inventory: Vec<InventoryItem> =
            self.store.collection(inventory::COLLECTION).fetch().await?;
        let existing = self.list().await?;

        let list = generate_shopping_list(
            &window,
            &recipes,
            &inventory,
            &existing,
            self.options.conversion_policy,
        );

        if list == existing {
            debug!("no demand in window starting {from}; shopping list unchanged");
            return Ok(list);
        }

        self.replace_all(&list).await?;
        Ok(list)
    }

    /// Manually adds an entry, merging with an existing entry of the same
    /// name key.
    pub async fn add(&self, mut entry: ShoppingListEntry) -> Result<Vec<ShoppingListEntry>, Error> {
        entry.name = name_key(&entry.name);
        let mut list = self.list().await?;
        merge_line(&mut list, entry);
        self.replace_all(&list).await?;
        Ok(list)
    }

    /// Removes one entry by name.
    pub async fn remove(&self, name: &str) -> Result<(), Error> {
        self.store
            .collection(COLLECTION)
            .eq("name", &name_key(name))
            .delete()
            .await?;
        Ok(())
    }

    /// Empties the whole list.
    pub async fn clear(&self) -> Result<(), Error> {
        self.store.collection(COLLECTION).delete().await?;
        Ok(())
    }

    /// Confirms that one entry was bought: the matching inventory item's
    /// stock goes up by the purchased amount and the entry leaves the list.
    ///
    /// Confirming a name that is no longer on the list is a no-op. An entry
    /// without a matching inventory item is simply removed.
    pub async fn confirm_purchase(&self, name: &str) -> Result<(), Error> {
        let key = name_key(name);
        let entries: Vec<ShoppingListEntry> = self
            .store
            .collection(COLLECTION)
            .eq("name", &key)
            .fetch()
            .await?;
        let Some(entry) = entries.into_iter().next() else {
            return Ok(());
        };

        let items: Vec<InventoryItem> =
            self.store.collection(inventory::COLLECTION).fetch().await?;
        if let Some(item) = find_by_name(&items, &entry.name) {
            let gained = inventory::purchase_gain(item, &entry);
            if gained > 0.0 {
                self.store
                    .collection(inventory::COLLECTION)
                    .eq("id", &item.id)
                    .update(&json!({ "currentStock": item.current_stock + gained }))
                    .await?;
            }
        }

        self.store
            .collection(COLLECTION)
            .eq("name", &key)
            .delete()
            .await?;
        Ok(())
    }

    /// Replaces the persisted list wholesale.
    async fn replace_all(&self, list: &[ShoppingListEntry]) -> Result<(), Error> {
        self.store.collection(COLLECTION).delete().await?;
        if !list.is_empty() {
            self.store.collection(COLLECTION).insert(list).await?;
        }
        Ok(())
    }
}
