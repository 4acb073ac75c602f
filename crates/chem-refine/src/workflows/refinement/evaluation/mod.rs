mod cas;
mod rules;
mod synonyms;

use crate::workflows::refinement::domain::{
    EvaluatedIngredient, Ingredient, ProductWithIngredients, RefinementIssue,
};
use crate::workflows::refinement::repository::ProductRecord;

/// Runs the per-ingredient rule battery. Pure and total: malformed input is
/// reported as issues, never panicked on. Rules run in a fixed order so the
/// issue vector is reproducible for identical input.
pub fn evaluate_ingredient(ingredient: &Ingredient) -> Vec<RefinementIssue> {
    let mut issues = Vec::new();
    issues.extend(rules::cas_number_rule(ingredient));
    issues.extend(rules::content_percentage_rule(ingredient));
    issues.extend(rules::main_ingredient_rule(ingredient));
    issues.extend(rules::synonym_rule(ingredient));
    issues
}

/// Per-ingredient rules for every row, then the product-level content-sum
/// check, which attaches its warning to the largest contributor.
pub fn evaluate_product(ingredients: &[Ingredient]) -> Vec<EvaluatedIngredient> {
    let mut evaluated: Vec<EvaluatedIngredient> = ingredients
        .iter()
        .map(|ingredient| EvaluatedIngredient {
            issues: evaluate_ingredient(ingredient),
            ingredient: ingredient.clone(),
        })
        .collect();

    if let Some((target, issue)) = rules::content_sum_rule(ingredients) {
        if let Some(entry) = evaluated
            .iter_mut()
            .find(|entry| entry.ingredient.id == target)
        {
            entry.issues.push(issue);
        }
    }

    evaluated
}

/// Enriches a raw store record into the tree handed to UI callers.
pub fn evaluate_record(record: ProductRecord) -> ProductWithIngredients {
    let ingredients = evaluate_product(&record.ingredients);
    ProductWithIngredients {
        product: record.product,
        ingredients,
    }
}
