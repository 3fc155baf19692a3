//! Household expenses

use crate::error::Error;
use chrono::NaiveDate;
use hushold_model::BudgetEntry;
use hushold_store::Store;
use std::collections::BTreeMap;

pub(crate) const COLLECTION: &str = "budget";

/// Per-category totals for one month of expenses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BudgetSummary {
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
}

/// Sums expenses per category. Categories are taken as stored; empty
/// categories group under "Andet".
pub fn summarize(entries: &[BudgetEntry]) -> BudgetSummary {
    let mut summary = BudgetSummary::default();
    for entry in entries {
        let category = if entry.category.trim().is_empty() {
            "Andet".to_string()
        } else {
            entry.category.clone()
        };
        *summary.by_category.entry(category).or_insert(0.0) += entry.amount;
        summary.total += entry.amount;
    }
    summary
}

/// Service client for the budget collection.
pub struct BudgetService {
    store: Store,
}

impl BudgetService {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn add(&self, entry: &BudgetEntry) -> Result<(), Error> {
        self.store.collection(COLLECTION).insert(entry).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.store.collection(COLLECTION).eq("id", id).delete().await?;
        Ok(())
    }

    /// Expenses within one calendar month.
    pub async fn month(&self, year: i32, month: u32) -> Result<Vec<BudgetEntry>, Error> {
        let from = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::general(format!("invalid month: {year}-{month:02}")))?;
        let until = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| Error::general(format!("invalid month: {year}-{month:02}")))?;

        Ok(self
            .store
            .collection(COLLECTION)
            .gte("date", &from.to_string())
            .lt("date", &until.to_string())
            .fetch()
            .await?)
    }

    /// Per-category summary for one calendar month.
    pub async fn month_summary(&self, year: i32, month: u32) -> Result<BudgetSummary, Error> {
        let entries = self.month(year, month).await?;
        Ok(summarize(&entries))
    }
}
