use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::refinement::domain::{
    CollectionStatus, Ingredient, IngredientId, Product, ProductId,
};
use crate::workflows::refinement::repository::{
    IngredientPatch, ProductQuery, ProductRecord, RecordStore, StoreError,
};
use crate::workflows::refinement::service::RefinementService;

pub(super) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn ingredient(
    id: &str,
    name: &str,
    cas: Option<&str>,
    content: Option<f64>,
) -> Ingredient {
    Ingredient {
        id: IngredientId(id.to_string()),
        product_id: ProductId("prod-demo".to_string()),
        main_ingredient: name.to_string(),
        cas_number: cas.map(str::to_string),
        content_percentage: content,
        chemical_formula: None,
        status: CollectionStatus::Refining,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub(super) fn product(id: &str, name: &str, status: CollectionStatus) -> Product {
    Product {
        id: ProductId(id.to_string()),
        name: name.to_string(),
        category: Some("세정제".to_string()),
        status,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

pub(super) fn record(
    product_id: &str,
    name: &str,
    status: CollectionStatus,
    mut ingredients: Vec<Ingredient>,
) -> ProductRecord {
    for row in &mut ingredients {
        row.product_id = ProductId(product_id.to_string());
    }
    ProductRecord {
        product: product(product_id, name, status),
        ingredients,
    }
}

/// Three-product catalog covering the interesting cases: one clean row set,
/// one with auto-fixable findings, one needing human review.
pub(super) fn sample_catalog() -> Vec<ProductRecord> {
    vec![
        record(
            "prod-sanitizer",
            "손소독제 클린겔",
            CollectionStatus::Completed,
            vec![
                ingredient("ing-ethanol", "에탄올", Some("64-17-5"), Some(70.0)),
                ingredient("ing-water", "정제수", Some("7732-18-5"), Some(29.0)),
                ingredient("ing-glycerin", "글리세린", Some("56-81-5"), Some(1.0)),
            ],
        ),
        record(
            "prod-cleaner",
            "주방 세정제 스파클",
            CollectionStatus::Refining,
            vec![
                ingredient("ing-salt", "NaCl", Some("7647145"), None),
                ingredient("ing-base", "정제수", Some("7732-18-5"), Some(95.0)),
            ],
        ),
        record(
            "prod-degreaser",
            "욕실 곰팡이 제거제",
            CollectionStatus::Refining,
            vec![ingredient("ing-mystery", "12345", None, Some(-13.2))],
        ),
    ]
}

#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<Vec<ProductRecord>>,
}

impl MemoryStore {
    pub(super) fn seeded(records: Vec<ProductRecord>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
        })
    }

    pub(super) fn ingredient(&self, id: &IngredientId) -> Option<Ingredient> {
        let guard = self.records.lock().expect("store mutex poisoned");
        guard
            .iter()
            .flat_map(|record| record.ingredients.iter())
            .find(|row| &row.id == id)
            .cloned()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn products(&self, query: ProductQuery) -> Result<Vec<ProductRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| {
                query.statuses.is_empty() || query.statuses.contains(&record.product.status)
            })
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn update_ingredient(
        &self,
        id: &IngredientId,
        patch: IngredientPatch,
    ) -> Result<Ingredient, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        for record in guard.iter_mut() {
            if let Some(row) = record.ingredients.iter_mut().find(|row| &row.id == id) {
                if let Some(name) = patch.main_ingredient {
                    row.main_ingredient = name;
                }
                if let Some(cas) = patch.cas_number {
                    row.cas_number = Some(cas);
                }
                if let Some(content) = patch.content_percentage {
                    row.content_percentage = Some(content);
                }
                if let Some(formula) = patch.chemical_formula {
                    row.chemical_formula = Some(formula);
                }
                row.updated_at = Utc::now();
                return Ok(row.clone());
            }
        }
        Err(StoreError::NotFound)
    }
}

pub(super) struct UnavailableStore;

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn products(&self, _query: ProductQuery) -> Result<Vec<ProductRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    async fn update_ingredient(
        &self,
        _id: &IngredientId,
        _patch: IngredientPatch,
    ) -> Result<Ingredient, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<RefinementService<MemoryStore>>, Arc<MemoryStore>) {
    let store = MemoryStore::seeded(sample_catalog());
    let service = Arc::new(RefinementService::new(store.clone()));
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
