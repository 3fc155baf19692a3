//! Recipe documents

use crate::error::Error;
use hushold_model::Recipe;
use hushold_store::Store;

pub(crate) const COLLECTION: &str = "recipes";

/// Service client for the recipes collection.
pub struct RecipesService {
    store: Store,
}

impl RecipesService {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// All recipes.
    pub async fn list(&self) -> Result<Vec<Recipe>, Error> {
        Ok(self.store.collection(COLLECTION).fetch().await?)
    }

    /// A single recipe by id, or `None` if it was deleted.
    pub async fn get(&self, id: &str) -> Result<Option<Recipe>, Error> {
        let recipes: Vec<Recipe> = self.store.collection(COLLECTION).eq("id", id).fetch().await?;
        Ok(recipes.into_iter().next())
    }

    pub async fn create(&self, recipe: &Recipe) -> Result<(), Error> {
        self.store.collection(COLLECTION).insert(recipe).await?;
        Ok(())
    }

    pub async fn update(&self, recipe: &Recipe) -> Result<(), Error> {
        self.store
            .collection(COLLECTION)
            .eq("id", &recipe.id)
            .update(recipe)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.store.collection(COLLECTION).eq("id", id).delete().await?;
        Ok(())
    }
}
