//! Data-refinement engine for collected product/ingredient records.
//!
//! The engine inspects ingredient rows against a fixed rule battery, rolls
//! per-ingredient findings up into a product status, aggregates dashboard
//! stats, and applies deterministic corrections through the record store.
//! Evaluation is pure and recomputed on every fetch, so findings can never
//! go stale relative to the record they describe.

pub(crate) mod autofix;
pub mod domain;
pub(crate) mod evaluation;
pub mod repository;
pub mod rollup;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CollectionStatus, EvaluatedIngredient, Ingredient, IngredientId, IssueField, IssueSeverity,
    Product, ProductId, ProductRollup, ProductWithIngredients, RefinementIssue, RefinementStats,
    RefinementStatus,
};
pub use evaluation::{evaluate_ingredient, evaluate_product, evaluate_record};
pub use repository::{IngredientPatch, ProductQuery, ProductRecord, RecordStore, StoreError};
pub use rollup::{compute_stats, determine_product_status};
pub use router::refinement_router;
pub use service::{AutoFixOutcome, RefinementService, RefinementServiceError};
