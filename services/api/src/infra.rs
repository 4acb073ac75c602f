use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chem_refine::workflows::refinement::{
    CollectionStatus, Ingredient, IngredientId, IngredientPatch, Product, ProductId, ProductQuery,
    ProductRecord, RecordStore, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory record store standing in for the managed backend. Paging is
/// deterministic (insertion order) so repeated fetches line up with the
/// refinement queue shown in the UI.
#[derive(Default)]
pub(crate) struct InMemoryRecordStore {
    records: Mutex<Vec<ProductRecord>>,
}

impl InMemoryRecordStore {
    pub(crate) fn seeded(records: Vec<ProductRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
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

fn seed_product(
    id: &str,
    name: &str,
    category: &str,
    status: CollectionStatus,
    ingredients: Vec<(&str, &str, Option<&str>, Option<f64>, Option<&str>)>,
) -> ProductRecord {
    let seeded_at = Utc
        .with_ymd_and_hms(2025, 6, 12, 8, 30, 0)
        .single()
        .expect("valid seed timestamp");

    let rows = ingredients
        .into_iter()
        .map(
            |(ingredient_id, ingredient_name, cas, content, formula)| Ingredient {
                id: IngredientId(ingredient_id.to_string()),
                product_id: ProductId(id.to_string()),
                main_ingredient: ingredient_name.to_string(),
                cas_number: cas.map(str::to_string),
                content_percentage: content,
                chemical_formula: formula.map(str::to_string),
                status,
                created_at: seeded_at,
                updated_at: seeded_at,
            },
        )
        .collect();

    ProductRecord {
        product: Product {
            id: ProductId(id.to_string()),
            name: name.to_string(),
            category: Some(category.to_string()),
            status,
            created_at: seeded_at,
            updated_at: seeded_at,
        },
        ingredients: rows,
    }
}

/// Demo catalog exercising every rule: a clean product, one with fixable
/// findings, one oversubscribed on content, and one needing human review.
pub(crate) fn demo_catalog() -> Vec<ProductRecord> {
    vec![
        seed_product(
            "prod-0001",
            "손소독제 클린겔",
            "살균소독제",
            CollectionStatus::Completed,
            vec![
                ("ing-0001", "에탄올", Some("64-17-5"), Some(70.0), Some("C2H5OH")),
                ("ing-0002", "정제수", Some("7732-18-5"), Some(29.0), Some("H2O")),
                ("ing-0003", "글리세린", Some("56-81-5"), Some(1.0), Some("C3H8O3")),
            ],
        ),
        seed_product(
            "prod-0002",
            "주방 세정제 스파클",
            "세정제",
            CollectionStatus::Refining,
            vec![
                ("ing-0004", "NaCl", Some("7647145"), Some(3.0), None),
                ("ing-0005", "구연산", Some("77-92-9"), None, None),
                ("ing-0006", "정제수", Some("7732-18-5"), Some(90.0), None),
            ],
        ),
        seed_product(
            "prod-0003",
            "욕실 곰팡이 제거제",
            "세정제",
            CollectionStatus::Refining,
            vec![
                ("ing-0007", "수산화나트륨", Some("1310-73-2"), Some(60.0), None),
                ("ing-0008", "정제수", Some("7732-18-5"), Some(55.0), None),
            ],
        ),
        seed_product(
            "prod-0004",
            "다목적 탈지제",
            "세정제",
            CollectionStatus::Collected,
            vec![
                ("ing-0009", "12345", None, Some(-13.2), None),
                ("ing-0010", "이소프로필알코올", Some("67-63-0"), Some(40.0), None),
            ],
        ),
    ]
}

pub(crate) fn parse_status(raw: &str) -> Result<CollectionStatus, String> {
    CollectionStatus::parse(raw)
        .ok_or_else(|| format!("'{raw}' is not one of collected, refining, completed"))
}
