//! hushold Rust client
//!
//! A Rust client for a household-management backend: recipes, inventory,
//! meal planning, shopping lists, budget and home maintenance, persisted in
//! a hosted document store. The numeric core (unit conversion and
//! shopping-list consolidation) lives in the `hushold-units` and
//! `hushold-planner` crates; this crate wires it to the store.

pub mod budget;
pub mod config;
pub mod error;
pub mod inventory;
pub mod maintenance;
pub mod meal_plan;
pub mod recipes;
pub mod shopping;

pub use hushold_model as model;
pub use hushold_planner as planner;
pub use hushold_units as units;

use reqwest::Client;

use crate::budget::BudgetService;
use crate::config::ClientOptions;
use crate::inventory::InventoryService;
use crate::maintenance::MaintenanceService;
use crate::meal_plan::MealPlanService;
use crate::recipes::RecipesService;
use crate::shopping::ShoppingService;
use hushold_store::Store;

/// The main entry point for the hushold client
pub struct Hushold {
    /// The base URL of the household store
    pub url: String,
    /// The API key for the household store
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    store: Store,
}

impl Hushold {
    /// Create a new hushold client
    ///
    /// # Example
    ///
    /// ```
    /// use hushold::Hushold;
    ///
    /// let hushold = Hushold::new("https://store.example.com", "your-api-key");
    /// ```
    pub fn new(store_url: &str, api_key: &str) -> Self {
        Self::new_with_options(store_url, api_key, ClientOptions::default())
    }

    /// Create a new hushold client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use hushold::{config::ClientOptions, Hushold};
    ///
    /// let options = ClientOptions::default().with_planning_window_days(14);
    /// let hushold = Hushold::new_with_options("https://store.example.com", "your-api-key", options);
    /// ```
    pub fn new_with_options(store_url: &str, api_key: &str, options: ClientOptions) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_default();

        let store = Store::new(store_url, api_key, http_client.clone());

        Self {
            url: store_url.to_string(),
            key: api_key.to_string(),
            http_client,
            options,
            store,
        }
    }

    /// Get a handle on the underlying document store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Recipe documents
    pub fn recipes(&self) -> RecipesService {
        RecipesService::new(self.store.clone())
    }

    /// Inventory items and stock levels
    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(self.store.clone())
    }

    /// Planned meals
    pub fn meal_plan(&self) -> MealPlanService {
        MealPlanService::new(self.store.clone())
    }

    /// Shopping list: generation, manual edits and purchase confirmation
    pub fn shopping(&self) -> ShoppingService {
        ShoppingService::new(self.store.clone(), self.options.clone())
    }

    /// Household expenses
    pub fn budget(&self) -> BudgetService {
        BudgetService::new(self.store.clone())
    }

    /// Recurring home-maintenance tasks
    pub fn maintenance(&self) -> MaintenanceService {
        MaintenanceService::new(self.store.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::Hushold;
    pub use hushold_planner::ConversionPolicy;
}
