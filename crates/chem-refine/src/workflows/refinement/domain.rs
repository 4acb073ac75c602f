use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for product records (the store's stable external key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

/// Identifier wrapper for ingredient rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IngredientId(pub String);

/// Collection lifecycle of a record as tracked by the acquisition pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionStatus {
    Collected,
    Refining,
    Completed,
}

impl CollectionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CollectionStatus::Collected => "collected",
            CollectionStatus::Refining => "refining",
            CollectionStatus::Completed => "completed",
        }
    }

    /// Lenient parser for query-string filters; unknown tokens yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "collected" => Some(Self::Collected),
            "refining" => Some(Self::Refining),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// One commercial item owning a set of ingredient rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Option<String>,
    pub status: CollectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One constituent substance of a product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub product_id: ProductId,
    pub main_ingredient: String,
    pub cas_number: Option<String>,
    pub content_percentage: Option<f64>,
    pub chemical_formula: Option<String>,
    pub status: CollectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Severity of a detected data-quality finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Suggestion,
}

impl IssueSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
            IssueSeverity::Suggestion => "suggestion",
        }
    }
}

/// Ingredient attribute a finding concerns. Closed so the auto-fix planner
/// can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueField {
    MainIngredient,
    CasNumber,
    ContentPercentage,
    ChemicalFormula,
}

impl IssueField {
    pub const fn column(self) -> &'static str {
        match self {
            IssueField::MainIngredient => "main_ingredient",
            IssueField::CasNumber => "cas_number",
            IssueField::ContentPercentage => "content_percentage",
            IssueField::ChemicalFormula => "chemical_formula",
        }
    }
}

/// One detected data-quality problem. Issues are values recomputed from the
/// current ingredient state on every evaluation pass, never persisted rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementIssue {
    pub id: String,
    pub field: IssueField,
    #[serde(rename = "type")]
    pub severity: IssueSeverity,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_value: Option<String>,
    #[serde(default)]
    pub auto_fixable: bool,
}

impl RefinementIssue {
    /// A finding with no safe deterministic correction.
    pub fn advisory(
        ingredient_id: &IngredientId,
        code: &str,
        field: IssueField,
        severity: IssueSeverity,
        title: impl Into<String>,
        description: impl Into<String>,
        original_value: Option<String>,
    ) -> Self {
        Self {
            id: format!("{}:{}", ingredient_id.0, code),
            field,
            severity,
            title: title.into(),
            description: description.into(),
            original_value,
            suggested_value: None,
            auto_fixable: false,
        }
    }

    /// A finding carrying a correction safe to apply without human review.
    /// The suggested value is required here so `auto_fixable` can never be
    /// set without one.
    pub fn fixable(
        ingredient_id: &IngredientId,
        code: &str,
        field: IssueField,
        severity: IssueSeverity,
        title: impl Into<String>,
        description: impl Into<String>,
        original_value: Option<String>,
        suggested_value: String,
    ) -> Self {
        Self {
            id: format!("{}:{}", ingredient_id.0, code),
            field,
            severity,
            title: title.into(),
            description: description.into(),
            original_value,
            suggested_value: Some(suggested_value),
            auto_fixable: true,
        }
    }
}

/// An ingredient enriched with the issues of the most recent evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedIngredient {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    pub issues: Vec<RefinementIssue>,
}

/// A product with its evaluated ingredient tree, as handed to UI callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithIngredients {
    #[serde(flatten)]
    pub product: Product,
    pub ingredients: Vec<EvaluatedIngredient>,
}

/// Product-level refinement status rolled up from ingredient issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefinementStatus {
    Error,
    Warning,
    Suggestion,
    Completed,
}

impl RefinementStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RefinementStatus::Error => "error",
            RefinementStatus::Warning => "warning",
            RefinementStatus::Suggestion => "suggestion",
            RefinementStatus::Completed => "completed",
        }
    }
}

/// Rolled-up status plus the total issue count across a product's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductRollup {
    pub status: RefinementStatus,
    pub issue_count: usize,
}

/// Aggregate snapshot for the dashboard. All counts are product counts
/// bucketed by rolled-up status, except `total_ingredients` which counts
/// ingredient rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementStats {
    pub total_products: usize,
    pub total_ingredients: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub suggestion_count: usize,
    pub completed_count: usize,
}
