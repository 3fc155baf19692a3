//! Planned meals

use crate::error::Error;
use chrono::{Duration, NaiveDate};
use hushold_model::{MealPlanEntry, MealSlot};
use hushold_store::Store;

pub(crate) const COLLECTION: &str = "meal_plan";

/// Service client for the meal-plan collection.
pub struct MealPlanService {
    store: Store,
}

impl MealPlanService {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Plan entries with `from <= date < from + days`.
    pub async fn window(&self, from: NaiveDate, days: i64) -> Result<Vec<MealPlanEntry>, Error> {
        let until = from + Duration::days(days);
        Ok(self
            .store
            .collection(COLLECTION)
            .gte("date", &from.to_string())
            .lt("date", &until.to_string())
            .fetch()
            .await?)
    }

    /// Plans a meal. One slot holds one entry; planning over an occupied
    /// slot replaces it.
    pub async fn add(&self, entry: &MealPlanEntry) -> Result<(), Error> {
        self.remove(entry.date, entry.slot).await?;
        self.store.collection(COLLECTION).insert(entry).await?;
        Ok(())
    }

    /// Removes the entry in one slot, if any.
    pub async fn remove(&self, date: NaiveDate, slot: MealSlot) -> Result<(), Error> {
        self.store
            .collection(COLLECTION)
            .eq("date", &date.to_string())
            .eq("slot", slot.code())
            .delete()
            .await?;
        Ok(())
    }

    /// Clears every entry in a window.
    pub async fn clear_window(&self, from: NaiveDate, days: i64) -> Result<(), Error> {
        let until = from + Duration::days(days);
        self.store
            .collection(COLLECTION)
            .gte("date", &from.to_string())
            .lt("date", &until.to_string())
            .delete()
            .await?;
        Ok(())
    }
}
