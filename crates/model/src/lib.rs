//! Document shapes for the hushold household store
//!
//! These structs mirror the JSON documents persisted by the hosted document
//! store: recipes, inventory items, meal-plan entries, shopping-list entries,
//! budget entries and maintenance tasks. Field names are pinned to the wire
//! format via serde attributes.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Lookup key used wherever documents are matched by name: trimmed and
/// lower-cased via Unicode case mapping, so Danish "Æ/Ø/Å" fold correctly.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Finds an inventory item by name or alias, case-insensitively.
pub fn find_by_name<'a>(items: &'a [InventoryItem], name: &str) -> Option<&'a InventoryItem> {
    let key = name_key(name);
    items
        .iter()
        .find(|item| name_key(&item.name) == key || item.aliases.iter().any(|a| name_key(a) == key))
}

/// A stored recipe. Ingredients are re-read live from the current recipe
/// whenever a meal plan is expanded; plan entries reference recipes only by
/// id and portion count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    pub title: String,
    /// Portions the ingredient quantities are written for. Treated as 1
    /// when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portions: Option<f64>,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
}

/// An item tracked on the inventory page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Stock-tracking unit (raw label, normalized on use).
    #[serde(default)]
    pub unit: String,
    /// Grams contained in one purchase unit, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grams_per_unit: Option<f64>,
    /// Weight in grams of a single piece, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_per_piece: Option<f64>,
    #[serde(default)]
    pub current_stock: f64,
    /// Whether the item is bought as indivisible whole units.
    #[serde(default)]
    pub buy_as_whole_unit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_unit: Option<PurchaseUnit>,
    /// Store section used to group shopping-list entries.
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseUnit {
    /// Content of one purchase unit, in the item's stock-tracking unit.
    pub quantity: f64,
}

impl InventoryItem {
    /// Content of one purchasable whole unit in the stock-tracking unit,
    /// preferring the explicit purchase-unit quantity over grams-per-unit.
    pub fn per_unit_content(&self) -> Option<f64> {
        self.purchase_unit
            .as_ref()
            .map(|p| p.quantity)
            .or(self.grams_per_unit)
            .filter(|content| *content > 0.0)
    }
}

/// Meal slot within a planned day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    /// Wire value of the slot, as stored in plan documents.
    pub fn code(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }
}

/// What a meal-plan entry points at.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    #[default]
    Recipe,
    /// Leftovers from an earlier meal; contributes no ingredient demand.
    Leftovers,
}

/// One planned meal: a date, a slot, and a recipe reference with the number
/// of portions to cook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEntry {
    pub date: NaiveDate,
    pub slot: MealSlot,
    #[serde(rename = "type", default)]
    pub kind: PlanKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    #[serde(default = "default_portions")]
    pub portions: f64,
}

fn default_portions() -> f64 {
    1.0
}

/// An entry on the shopping list, unique per lowercased name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingListEntry {
    pub name: String,
    pub quantity_to_buy: f64,
    pub unit: String,
    pub store_section: String,
}

impl ShoppingListEntry {
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// A single household expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetEntry {
    #[serde(default)]
    pub id: String,
    pub date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
}

/// A recurring home-maintenance task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub area: String,
    pub interval_days: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_done: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl MaintenanceTask {
    /// Next date the task should be done, or `None` if it was never done.
    pub fn next_due(&self) -> Option<NaiveDate> {
        self.last_done
            .map(|done| done + Duration::days(self.interval_days))
    }

    /// A task that was never completed counts as due.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_due().map_or(true, |due| due <= today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_key_folds_danish_letters() {
        assert_eq!(name_key("  MÆLK "), "mælk");
        assert_eq!(name_key("Rødløg"), "rødløg");
        assert_eq!(name_key("Hvidløg"), name_key("HVIDLØG"));
    }

    #[test]
    fn find_by_name_matches_aliases_case_insensitively() {
        let items = vec![InventoryItem {
            id: "1".to_string(),
            name: "Pasta".to_string(),
            aliases: vec!["Pasta skruer".to_string(), "Fusilli".to_string()],
            unit: "g".to_string(),
            grams_per_unit: None,
            weight_per_piece: None,
            current_stock: 500.0,
            buy_as_whole_unit: false,
            purchase_unit: None,
            category: "Kolonial".to_string(),
            price_per_kg: None,
            price_per_unit: None,
        }];
        assert!(find_by_name(&items, "pasta").is_some());
        assert!(find_by_name(&items, "FUSILLI").is_some());
        assert!(find_by_name(&items, "ris").is_none());
    }

    #[test]
    fn inventory_item_deserializes_wire_shape() {
        let doc = json!({
            "id": "abc",
            "name": "Hakkede tomater",
            "aliases": ["tomater"],
            "unit": "g",
            "gramsPerUnit": 400.0,
            "currentStock": 800.0,
            "buyAsWholeUnit": true,
            "purchaseUnit": { "quantity": 400.0 },
            "category": "Konserves"
        });
        let item: InventoryItem = serde_json::from_value(doc).unwrap();
        assert_eq!(item.grams_per_unit, Some(400.0));
        assert!(item.buy_as_whole_unit);
        assert_eq!(item.per_unit_content(), Some(400.0));
    }

    #[test]
    fn per_unit_content_prefers_purchase_unit_quantity() {
        let mut item = InventoryItem {
            id: String::new(),
            name: "Mel".to_string(),
            aliases: vec![],
            unit: "g".to_string(),
            grams_per_unit: Some(1000.0),
            weight_per_piece: None,
            current_stock: 0.0,
            buy_as_whole_unit: true,
            purchase_unit: Some(PurchaseUnit { quantity: 2000.0 }),
            category: String::new(),
            price_per_kg: None,
            price_per_unit: None,
        };
        assert_eq!(item.per_unit_content(), Some(2000.0));
        item.purchase_unit = None;
        assert_eq!(item.per_unit_content(), Some(1000.0));
        item.grams_per_unit = Some(0.0);
        assert_eq!(item.per_unit_content(), None);
    }

    #[test]
    fn meal_plan_entry_round_trips_wire_shape() {
        let doc = json!({
            "date": "2025-03-10",
            "slot": "dinner",
            "type": "recipe",
            "recipeId": "r-42",
            "portions": 2.0
        });
        let entry: MealPlanEntry = serde_json::from_value(doc).unwrap();
        assert_eq!(entry.kind, PlanKind::Recipe);
        assert_eq!(entry.recipe_id.as_deref(), Some("r-42"));

        let leftovers = json!({ "date": "2025-03-11", "slot": "lunch", "type": "leftovers" });
        let entry: MealPlanEntry = serde_json::from_value(leftovers).unwrap();
        assert_eq!(entry.kind, PlanKind::Leftovers);
        assert_eq!(entry.portions, 1.0);
    }

    #[test]
    fn maintenance_due_dates() {
        let date = |s: &str| s.parse::<NaiveDate>().unwrap();
        let task = MaintenanceTask {
            id: String::new(),
            name: "Skift filter".to_string(),
            area: "Emhætte".to_string(),
            interval_days: 90,
            last_done: Some(date("2025-01-01")),
            notes: String::new(),
        };
        assert_eq!(task.next_due(), Some(date("2025-04-01")));
        assert!(!task.is_due(date("2025-03-31")));
        assert!(task.is_due(date("2025-04-01")));

        let never_done = MaintenanceTask {
            last_done: None,
            ..task
        };
        assert!(never_done.is_due(date("2025-01-01")));
    }
}
