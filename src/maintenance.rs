//! Recurring home-maintenance tasks

use crate::error::Error;
use chrono::NaiveDate;
use hushold_model::MaintenanceTask;
use hushold_store::Store;
use serde_json::json;

pub(crate) const COLLECTION: &str = "maintenance";

/// Tasks that are due on or before `today`, soonest first. Tasks never
/// done sort ahead of everything.
pub fn due_tasks(tasks: &[MaintenanceTask], today: NaiveDate) -> Vec<MaintenanceTask> {
    let mut due: Vec<MaintenanceTask> = tasks
        .iter()
        .filter(|task| task.is_due(today))
        .cloned()
        .collect();
    due.sort_by_key(|task| task.next_due());
    due
}

/// Service client for the maintenance collection.
pub struct MaintenanceService {
    store: Store,
}

impl MaintenanceService {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<MaintenanceTask>, Error> {
        Ok(self.store.collection(COLLECTION).fetch().await?)
    }

    /// Tasks due on or before `today`.
    pub async fn due(&self, today: NaiveDate) -> Result<Vec<MaintenanceTask>, Error> {
        let tasks = self.list().await?;
        Ok(due_tasks(&tasks, today))
    }

    pub async fn add(&self, task: &MaintenanceTask) -> Result<(), Error> {
        self.store.collection(COLLECTION).insert(task).await?;
        Ok(())
    }

    /// Marks a task done on `date`, restarting its interval.
    pub async fn complete(&self, id: &str, date: NaiveDate) -> Result<(), Error> {
        self.store
            .collection(COLLECTION)
            .eq("id", id)
            .update(&json!({ "lastDone": date.to_string() }))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.store.collection(COLLECTION).eq("id", id).delete().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn task(name: &str, interval_days: i64, last_done: Option<&str>) -> MaintenanceTask {
        MaintenanceTask {
            id: name.to_string(),
            name: name.to_string(),
            area: String::new(),
            interval_days,
            last_done: last_done.map(date),
            notes: String::new(),
        }
    }

    #[test]
    fn due_tasks_filters_and_sorts() {
        let tasks = vec![
            task("Afkalk kaffemaskine", 30, Some("2025-02-25")),
            task("Skift batterier i røgalarm", 365, Some("2024-12-01")),
            task("Rens tagrender", 180, None),
            task("Støvsug radiator", 90, Some("2025-03-01")),
        ];
        let due = due_tasks(&tasks, date("2025-03-28"));
        let names: Vec<&str> = due.iter().map(|t| t.name.as_str()).collect();
        // Never-done sorts first, then by next-due date.
        assert_eq!(
            names,
            vec!["Rens tagrender", "Afkalk kaffemaskine"]
        );
    }
}
