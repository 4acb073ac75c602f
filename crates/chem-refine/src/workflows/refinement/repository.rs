use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::{CollectionStatus, Ingredient, IngredientId, Product};

/// A raw product row with its ingredient rows, as the store returns them
/// before evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product: Product,
    pub ingredients: Vec<Ingredient>,
}

/// Page request handed to the store. An empty status list means no filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub limit: usize,
    pub offset: usize,
    pub statuses: Vec<CollectionStatus>,
}

/// Partial update for the patchable ingredient columns. `None` leaves the
/// column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_ingredient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cas_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chemical_formula: Option<String>,
}

impl IngredientPatch {
    pub fn is_empty(&self) -> bool {
        self.main_ingredient.is_none()
            && self.cas_number.is_none()
            && self.content_percentage.is_none()
            && self.chemical_formula.is_none()
    }
}

/// Storage abstraction so the refinement engine can be exercised against any
/// backend. These are the engine's only suspension points.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn products(&self, query: ProductQuery) -> Result<Vec<ProductRecord>, StoreError>;
    async fn update_ingredient(
        &self,
        id: &IngredientId,
        patch: IngredientPatch,
    ) -> Result<Ingredient, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
