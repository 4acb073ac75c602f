use super::domain::{
    IssueSeverity, ProductRollup, ProductWithIngredients, RefinementStats, RefinementStatus,
};

/// Reduces a product's ingredient issues to one status. Precedence is fixed:
/// any error wins, then any warning, then any suggestion, else completed.
/// New rules must map onto one of the three existing severities.
pub fn determine_product_status(product: &ProductWithIngredients) -> ProductRollup {
    let mut issue_count = 0;
    let mut has_error = false;
    let mut has_warning = false;
    let mut has_suggestion = false;

    for entry in &product.ingredients {
        issue_count += entry.issues.len();
        for issue in &entry.issues {
            match issue.severity {
                IssueSeverity::Error => has_error = true,
                IssueSeverity::Warning => has_warning = true,
                IssueSeverity::Suggestion => has_suggestion = true,
            }
        }
    }

    let status = if has_error {
        RefinementStatus::Error
    } else if has_warning {
        RefinementStatus::Warning
    } else if has_suggestion {
        RefinementStatus::Suggestion
    } else {
        RefinementStatus::Completed
    };

    ProductRollup {
        status,
        issue_count,
    }
}

/// Buckets product counts by rolled-up status and sums ingredient rows.
/// The empty set yields the all-zero snapshot.
pub fn compute_stats(products: &[ProductWithIngredients]) -> RefinementStats {
    let mut stats = RefinementStats {
        total_products: products.len(),
        ..RefinementStats::default()
    };

    for product in products {
        stats.total_ingredients += product.ingredients.len();
        match determine_product_status(product).status {
            RefinementStatus::Error => stats.error_count += 1,
            RefinementStatus::Warning => stats.warning_count += 1,
            RefinementStatus::Suggestion => stats.suggestion_count += 1,
            RefinementStatus::Completed => stats.completed_count += 1,
        }
    }

    stats
}
