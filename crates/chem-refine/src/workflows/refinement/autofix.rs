use super::domain::{IssueField, RefinementIssue};
use super::repository::IngredientPatch;

/// Field mutations implied by a batch of previously-detected issues.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FixPlan {
    pub(crate) patch: IngredientPatch,
    /// Ids of the issues whose suggestion made it into the patch.
    pub(crate) applied: Vec<String>,
    /// Issues passed over: not fixable, missing a usable suggestion, or
    /// carrying a suggestion the field cannot hold.
    pub(crate) skipped: usize,
}

/// Pure planning step for `apply_auto_refinement`. Non-fixable issues are
/// silently skipped, as is any fixable issue whose suggested value is absent
/// or unusable; the issue constructors rule that out for issues we emit, but
/// a caller-supplied batch gets the same guard rather than a corrupted
/// record. When two fixable issues target the same field, the later one in
/// batch order wins.
pub(crate) fn plan_auto_fixes(issues: &[RefinementIssue]) -> FixPlan {
    let mut plan = FixPlan::default();

    for issue in issues {
        if !issue.auto_fixable {
            plan.skipped += 1;
            continue;
        }
        let Some(value) = issue
            .suggested_value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
        else {
            plan.skipped += 1;
            continue;
        };

        match issue.field {
            IssueField::MainIngredient => plan.patch.main_ingredient = Some(value.to_string()),
            IssueField::CasNumber => plan.patch.cas_number = Some(value.to_string()),
            IssueField::ContentPercentage => match value.parse::<f64>() {
                Ok(parsed) => plan.patch.content_percentage = Some(parsed),
                Err(_) => {
                    plan.skipped += 1;
                    continue;
                }
            },
            IssueField::ChemicalFormula => plan.patch.chemical_formula = Some(value.to_string()),
        }
        plan.applied.push(issue.id.clone());
    }

    plan
}
