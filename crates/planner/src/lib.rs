//! Shopping-list consolidation for hushold
//!
//! Expands a meal-plan window into raw ingredient demand, aggregates demand
//! by normalized (name, unit) key, nets it against inventory stock and
//! merges the shortfall into an existing shopping list.
//!
//! Everything here is pure, synchronous computation over in-memory
//! snapshots: no I/O, no shared state, safe to call repeatedly with fresh
//! data. Persistence races around the resulting list are the caller's
//! concern (last-write-wins at the store boundary).

use std::collections::BTreeMap;

use hushold_model::{
    find_by_name, name_key, InventoryItem, MealPlanEntry, PlanKind, Recipe, ShoppingListEntry,
};
use hushold_units::{convert_to_base_unit, normalize, ItemFacts, Unit};
use log::{debug, warn};

/// Store section for ingredients without a matching inventory item.
pub const DEFAULT_SECTION: &str = "Andet";

/// What to do when no conversion path exists between an ingredient's unit
/// and the inventory item's stock unit.
///
/// [`ConversionPolicy::FailOpen`] treats the full raw demand as needed,
/// preferring a possibly-too-large list over silently dropping an
/// ingredient. [`ConversionPolicy::FailClosed`] skips the line instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversionPolicy {
    #[default]
    FailOpen,
    FailClosed,
}

/// One expanded ingredient requirement, scaled to the planned portions.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandLine {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// Expands every meal-plan entry in the window into scaled ingredient
/// demand lines.
///
/// Leftovers entries contribute nothing. Entries referencing a missing
/// recipe are skipped rather than failing: a deleted recipe must not block
/// list generation. Quantities are scaled by planned portions over the
/// recipe's own portion count (1 when unset), and non-finite quantities are
/// coerced to zero.
pub fn expand_demand(window: &[MealPlanEntry], recipes: &[Recipe]) -> Vec<DemandLine> {
    let mut lines = Vec::new();
    for entry in window {
        if entry.kind != PlanKind::Recipe {
            continue;
        }
        let Some(recipe_id) = entry.recipe_id.as_deref() else {
            continue;
        };
        let Some(recipe) = recipes.iter().find(|r| r.id == recipe_id) else {
            debug!("meal plan entry references missing recipe '{recipe_id}', skipping");
            continue;
        };
        let base_portions = recipe.portions.filter(|p| *p > 0.0).unwrap_or(1.0);
        let planned = if entry.portions.is_finite() {
            entry.portions
        } else {
            0.0
        };
        let scale = planned / base_portions;
        for ingredient in &recipe.ingredients {
            if ingredient.name.trim().is_empty() {
                continue;
            }
            let quantity = if ingredient.quantity.is_finite() {
                ingredient.quantity
            } else {
                0.0
            };
            lines.push(DemandLine {
                name: ingredient.name.clone(),
                quantity: quantity * scale,
                unit: ingredient.unit.clone(),
            });
        }
    }
    lines
}

/// Sums demand lines by (resolved name, normalized unit) key.
///
/// Name resolution prefers a matching inventory item's canonical name
/// (including alias matches) over the raw ingredient string, so spelling
/// variants converge on one inventory identity. The map is ordered, which
/// makes downstream output deterministic regardless of plan-entry order.
pub fn aggregate_demand(
    lines: &[DemandLine],
    inventory: &[InventoryItem],
) -> BTreeMap<(String, String), f64> {
    let mut totals = BTreeMap::new();
    for line in lines {
        let resolved = match find_by_name(inventory, &line.name) {
            Some(item) => name_key(&item.name),
            None => name_key(&line.name),
        };
        let key = (resolved, normalize(&line.unit));
        *totals.entry(key).or_insert(0.0) += line.quantity;
    }
    totals
}

/// Generates the consolidated shopping list for a meal-plan window.
///
/// Runs the full pipeline: expand demand, aggregate, net against stock,
/// merge into `existing`. The merge accumulates quantities per lowercased
/// name, so generating twice without an intervening purchase doubles the
/// listed quantities by design; deduplication belongs to the clear and
/// confirm-purchase operations. With zero eligible plan entries the
/// existing list is returned unchanged.
pub fn generate_shopping_list(
    window: &[MealPlanEntry],
    recipes: &[Recipe],
    inventory: &[InventoryItem],
    existing: &[ShoppingListEntry],
    policy: ConversionPolicy,
) -> Vec<ShoppingListEntry> {
    let demand = expand_demand(window, recipes);
    let totals = aggregate_demand(&demand, inventory);

    let mut list = existing.to_vec();
    for ((name, unit), quantity) in totals {
        if let Some(line) = net_against_stock(&name, &unit, quantity, inventory, policy) {
            merge_line(&mut list, line);
        }
    }
    list
}

/// Nets one aggregated demand line against inventory stock and returns the
/// buy line, if anything needs buying.
fn net_against_stock(
    name: &str,
    unit: &str,
    demand: f64,
    inventory: &[InventoryItem],
    policy: ConversionPolicy,
) -> Option<ShoppingListEntry> {
    let Some(item) = find_by_name(inventory, name) else {
        return buy_line(name, demand, unit, DEFAULT_SECTION);
    };

    let section = if item.category.trim().is_empty() {
        DEFAULT_SECTION
    } else {
        item.category.as_str()
    };
    let stock_unit = Unit::parse(&item.unit);
    let facts = ItemFacts {
        grams_per_unit: item.grams_per_unit,
        weight_per_piece: item.weight_per_piece,
    };

    match convert_to_base_unit(demand, unit, &stock_unit, Some(&facts)) {
        Ok(converted) => {
            let shortfall = (converted.amount - item.current_stock).max(0.0);
            if shortfall <= 0.0 {
                return None;
            }
            if item.buy_as_whole_unit {
                if let Some(content) = item.per_unit_content() {
                    // Partial units are not purchasable.
                    let units_to_buy = (shortfall / content).ceil();
                    return buy_line(name, units_to_buy, Unit::Piece.code(), section);
                }
            }
            buy_line(name, shortfall, stock_unit.code(), section)
        }
        Err(err) => match policy {
            ConversionPolicy::FailOpen => {
                warn!("{err}; adding full demand for '{name}' as-is");
                buy_line(name, demand, unit, section)
            }
            ConversionPolicy::FailClosed => {
                warn!("{err}; skipping '{name}'");
                None
            }
        },
    }
}

fn buy_line(name: &str, quantity: f64, unit: &str, section: &str) -> Option<ShoppingListEntry> {
    if quantity <= 0.0 {
        return None;
    }
    Some(ShoppingListEntry {
        name: name.to_string(),
        quantity_to_buy: quantity,
        unit: unit.to_string(),
        store_section: section.to_string(),
    })
}

/// Merges one buy line into a list keyed by lowercased name.
///
/// If an entry with the same name key exists and its unit matches after
/// normalization, quantities accumulate; on a unit mismatch the entry is
/// replaced. Otherwise the line is appended.
pub fn merge_line(list: &mut Vec<ShoppingListEntry>, line: ShoppingListEntry) {
    match list.iter_mut().find(|e| e.name_key() == name_key(&line.name)) {
        Some(existing) if normalize(&existing.unit) == normalize(&line.unit) => {
            existing.quantity_to_buy += line.quantity_to_buy;
        }
        Some(existing) => *existing = line,
        None => list.push(line),
    }
}
