use super::cas::{self, CasCheck};
use super::synonyms;
use crate::workflows::refinement::domain::{
    Ingredient, IngredientId, IssueField, IssueSeverity, RefinementIssue,
};

/// Rule 1: CAS registry number format and check digit.
pub(crate) fn cas_number_rule(ingredient: &Ingredient) -> Option<RefinementIssue> {
    let raw = ingredient.cas_number.as_deref()?.trim();
    if raw.is_empty() {
        return None;
    }

    match cas::check(raw) {
        CasCheck::Valid => None,
        CasCheck::ChecksumMismatch { expected } => Some(RefinementIssue::advisory(
            &ingredient.id,
            "cas_format",
            IssueField::CasNumber,
            IssueSeverity::Error,
            "CAS check digit mismatch",
            format!(
                "'{raw}' is formatted as a CAS number but its check digit should be {expected}; \
                 the source value needs review"
            ),
            Some(raw.to_string()),
        )),
        CasCheck::Reformattable { canonical } => Some(RefinementIssue::fixable(
            &ingredient.id,
            "cas_format",
            IssueField::CasNumber,
            IssueSeverity::Warning,
            "CAS number has wrong separators",
            format!("'{raw}' carries valid registry digits but not the NN-NN-N hyphenation"),
            Some(raw.to_string()),
            canonical,
        )),
        CasCheck::Invalid => Some(RefinementIssue::advisory(
            &ingredient.id,
            "cas_format",
            IssueField::CasNumber,
            IssueSeverity::Error,
            "Unrecognizable CAS number",
            format!("'{raw}' cannot be read as a CAS registry number"),
            Some(raw.to_string()),
        )),
    }
}

/// Rule 2: content percentage must be a finite value in [0, 100]; a missing
/// value on an otherwise-complete row is worth chasing.
pub(crate) fn content_percentage_rule(ingredient: &Ingredient) -> Option<RefinementIssue> {
    match ingredient.content_percentage {
        Some(value) if !value.is_finite() => Some(RefinementIssue::advisory(
            &ingredient.id,
            "content_range",
            IssueField::ContentPercentage,
            IssueSeverity::Error,
            "Content percentage is not a number",
            "the stored content percentage is not a finite numeric value",
            Some(value.to_string()),
        )),
        Some(value) if value < 0.0 => Some(RefinementIssue::advisory(
            &ingredient.id,
            "content_range",
            IssueField::ContentPercentage,
            IssueSeverity::Error,
            "Negative content percentage",
            format!(
                "{value}% is below zero; the sign may be a data-entry mistake but the intended \
                 value is ambiguous"
            ),
            Some(value.to_string()),
        )),
        Some(value) if value > 100.0 => Some(RefinementIssue::advisory(
            &ingredient.id,
            "content_range",
            IssueField::ContentPercentage,
            IssueSeverity::Error,
            "Content percentage above 100",
            format!("{value}% exceeds the physical maximum of 100%"),
            Some(value.to_string()),
        )),
        Some(_) => None,
        None if otherwise_complete(ingredient) => Some(RefinementIssue::advisory(
            &ingredient.id,
            "content_missing",
            IssueField::ContentPercentage,
            IssueSeverity::Suggestion,
            "Content percentage missing",
            "the row is otherwise complete; the content percentage is likely available in the \
             source document",
            None,
        )),
        None => None,
    }
}

/// Rule 3: the display name is required and must not be purely numeric.
pub(crate) fn main_ingredient_rule(ingredient: &Ingredient) -> Option<RefinementIssue> {
    let name = ingredient.main_ingredient.trim();
    if name.is_empty() {
        return Some(RefinementIssue::advisory(
            &ingredient.id,
            "name_required",
            IssueField::MainIngredient,
            IssueSeverity::Error,
            "Ingredient name missing",
            "every ingredient row needs a display name; filling it in requires the source record",
            Some(ingredient.main_ingredient.clone()),
        ));
    }
    if name.chars().all(|c| c.is_ascii_digit()) {
        return Some(RefinementIssue::advisory(
            &ingredient.id,
            "name_required",
            IssueField::MainIngredient,
            IssueSeverity::Error,
            "Ingredient name is numeric",
            format!("'{name}' looks like a stray code rather than a substance name"),
            Some(name.to_string()),
        ));
    }
    None
}

/// Rule 4: names matching a registry alias are normalized to the canonical
/// display form.
pub(crate) fn synonym_rule(ingredient: &Ingredient) -> Option<RefinementIssue> {
    let name = ingredient.main_ingredient.trim();
    let canonical = synonyms::canonical_for(name)?;
    if canonical == name {
        return None;
    }

    Some(RefinementIssue::fixable(
        &ingredient.id,
        "name_synonym",
        IssueField::MainIngredient,
        IssueSeverity::Suggestion,
        "Non-canonical ingredient name",
        format!("'{name}' is a known synonym of the canonical display name '{canonical}'"),
        Some(name.to_string()),
        canonical.to_string(),
    ))
}

/// Rule 5 (product-level): sibling contents summing past 100% flag the
/// largest contributor. Ties resolve to the first maximum in input order so
/// repeated evaluation stays reproducible.
pub(crate) fn content_sum_rule(
    ingredients: &[Ingredient],
) -> Option<(IngredientId, RefinementIssue)> {
    let sum: f64 = ingredients
        .iter()
        .filter_map(|ingredient| ingredient.content_percentage)
        .filter(|value| value.is_finite())
        .sum();
    if sum <= 100.0 {
        return None;
    }

    let mut largest: Option<(&Ingredient, f64)> = None;
    for ingredient in ingredients {
        let Some(value) = ingredient.content_percentage.filter(|v| v.is_finite()) else {
            continue;
        };
        match largest {
            Some((_, current)) if value <= current => {}
            _ => largest = Some((ingredient, value)),
        }
    }
    let (target, value) = largest?;

    let issue = RefinementIssue::advisory(
        &target.id,
        "content_sum",
        IssueField::ContentPercentage,
        IssueSeverity::Warning,
        "Combined content exceeds 100%",
        format!(
            "the product's ingredient contents sum to {sum:.1}%; this row carries the largest \
             share ({value:.1}%)"
        ),
        Some(value.to_string()),
    );
    Some((target.id.clone(), issue))
}

fn otherwise_complete(ingredient: &Ingredient) -> bool {
    let name = ingredient.main_ingredient.trim();
    let name_usable = !name.is_empty() && !name.chars().all(|c| c.is_ascii_digit());
    name_usable
        && ingredient
            .cas_number
            .as_deref()
            .is_some_and(|cas| !cas.trim().is_empty())
}
