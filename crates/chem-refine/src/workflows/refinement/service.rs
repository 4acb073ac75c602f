use std::sync::Arc;

use super::autofix;
use super::domain::{
    CollectionStatus, Ingredient, IngredientId, ProductWithIngredients, RefinementIssue,
    RefinementStats,
};
use super::evaluation;
use super::repository::{IngredientPatch, ProductQuery, RecordStore, StoreError};
use super::rollup;

const DEFAULT_STATS_PAGE_SIZE: usize = 500;

/// Stateless facade orchestrating evaluation, rollup, and auto-fixes against
/// the record store. Holds no state between calls; everything lives behind
/// the store trait.
pub struct RefinementService<S> {
    store: Arc<S>,
    stats_page_size: usize,
}

impl<S> RefinementService<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_stats_page_size(store, DEFAULT_STATS_PAGE_SIZE)
    }

    pub fn with_stats_page_size(store: Arc<S>, stats_page_size: usize) -> Self {
        Self {
            store,
            stats_page_size: stats_page_size.max(1),
        }
    }

    /// Sweeps the full product set page by page, evaluates, and aggregates
    /// the dashboard snapshot.
    pub async fn refinement_stats(&self) -> Result<RefinementStats, RefinementServiceError> {
        let mut products = Vec::new();
        let mut offset = 0;

        loop {
            let page = self
                .store
                .products(ProductQuery {
                    limit: self.stats_page_size,
                    offset,
                    statuses: Vec::new(),
                })
                .await?;
            let fetched = page.len();
            products.extend(page.into_iter().map(evaluation::evaluate_record));
            if fetched < self.stats_page_size {
                break;
            }
            offset += fetched;
        }

        Ok(rollup::compute_stats(&products))
    }

    /// One store page with the evaluator run inline over every ingredient,
    /// so the issues handed to the grid are always fresh.
    pub async fn products_for_refinement(
        &self,
        limit: usize,
        offset: usize,
        statuses: &[CollectionStatus],
    ) -> Result<Vec<ProductWithIngredients>, RefinementServiceError> {
        let records = self
            .store
            .products(ProductQuery {
                limit,
                offset,
                statuses: statuses.to_vec(),
            })
            .await?;
        Ok(records.into_iter().map(evaluation::evaluate_record).collect())
    }

    /// Thin passthrough to the store's update primitive. Re-evaluation is
    /// the caller's responsibility via a refetch.
    pub async fn update_ingredient(
        &self,
        id: &IngredientId,
        patch: IngredientPatch,
    ) -> Result<Ingredient, RefinementServiceError> {
        Ok(self.store.update_ingredient(id, patch).await?)
    }

    /// Applies the fixable subset of a previously-detected issue batch. An
    /// empty plan never touches the store, so re-applying an already-fixed
    /// batch is a no-op as long as the caller re-evaluated in between.
    pub async fn apply_auto_refinement(
        &self,
        id: &IngredientId,
        issues: &[RefinementIssue],
    ) -> Result<AutoFixOutcome, RefinementServiceError> {
        let plan = autofix::plan_auto_fixes(issues);
        if plan.patch.is_empty() {
            return Ok(AutoFixOutcome {
                applied: 0,
                skipped: plan.skipped,
                ingredient: None,
            });
        }

        let ingredient = self.store.update_ingredient(id, plan.patch).await?;
        Ok(AutoFixOutcome {
            applied: plan.applied.len(),
            skipped: plan.skipped,
            ingredient: Some(ingredient),
        })
    }
}

/// Result of one auto-fix application.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoFixOutcome {
    /// Number of issue suggestions that made it into the persisted patch.
    pub applied: usize,
    /// Issues passed over (not fixable or carrying no usable suggestion).
    pub skipped: usize,
    /// The persisted row, when a patch was written.
    pub ingredient: Option<Ingredient>,
}

/// Error raised by the refinement service. Store errors propagate exactly
/// one level and stop here; the engine does not retry.
#[derive(Debug, thiserror::Error)]
pub enum RefinementServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
