use super::common::*;
use crate::workflows::refinement::domain::{IssueField, IssueSeverity};
use crate::workflows::refinement::evaluation::{evaluate_ingredient, evaluate_product};

#[test]
fn clean_ingredient_reports_no_issues() {
    let row = ingredient("ing-1", "에탄올", Some("64-17-5"), Some(70.0));
    assert!(evaluate_ingredient(&row).is_empty());
}

#[test]
fn negative_content_is_an_unfixable_error() {
    let row = ingredient("ing-1", "에탄올", Some("64-17-5"), Some(-13.2));
    let issues = evaluate_ingredient(&row);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, IssueField::ContentPercentage);
    assert_eq!(issues[0].severity, IssueSeverity::Error);
    assert!(!issues[0].auto_fixable);
    assert!(issues[0].suggested_value.is_none());
}

#[test]
fn unhyphenated_cas_gets_a_reformat_suggestion() {
    let row = ingredient("ing-1", "도데실황산나트륨", Some("151213"), Some(5.0));
    let issues = evaluate_ingredient(&row);

    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.field, IssueField::CasNumber);
    assert_eq!(issue.severity, IssueSeverity::Warning);
    assert!(issue.auto_fixable);
    assert_eq!(issue.suggested_value.as_deref(), Some("151-21-3"));

    // Applying the suggestion clears the finding on re-evaluation.
    let mut fixed = row;
    fixed.cas_number = issue.suggested_value.clone();
    assert!(evaluate_ingredient(&fixed)
        .iter()
        .all(|issue| issue.field != IssueField::CasNumber));
}

#[test]
fn cas_checksum_mismatch_is_an_unfixable_error() {
    let row = ingredient("ing-1", "에탄올", Some("64-17-6"), Some(70.0));
    let issues = evaluate_ingredient(&row);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, IssueSeverity::Error);
    assert!(!issues[0].auto_fixable);
}

#[test]
fn garbage_cas_is_an_error() {
    let row = ingredient("ing-1", "에탄올", Some("not-a-cas"), Some(70.0));
    let issues = evaluate_ingredient(&row);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, IssueField::CasNumber);
    assert_eq!(issues[0].severity, IssueSeverity::Error);
}

#[test]
fn mutating_any_digit_of_a_valid_cas_raises_a_finding() {
    let original = "64-17-5";
    for (position, c) in original.char_indices() {
        let Some(digit) = c.to_digit(10) else { continue };
        let replacement = char::from_digit((digit + 1) % 10, 10).expect("decimal digit");
        let mut mutated: Vec<char> = original.chars().collect();
        mutated[position] = replacement;
        let mutated: String = mutated.into_iter().collect();

        let row = ingredient("ing-1", "에탄올", Some(&mutated), Some(70.0));
        let issues = evaluate_ingredient(&row);
        assert!(
            issues
                .iter()
                .any(|issue| issue.field == IssueField::CasNumber),
            "mutation '{mutated}' slipped through"
        );
    }
}

#[test]
fn content_above_100_is_an_error() {
    let row = ingredient("ing-1", "에탄올", Some("64-17-5"), Some(104.5));
    let issues = evaluate_ingredient(&row);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, IssueSeverity::Error);
    assert!(!issues[0].auto_fixable);
}

#[test]
fn non_finite_content_is_an_error() {
    let row = ingredient("ing-1", "에탄올", Some("64-17-5"), Some(f64::NAN));
    let issues = evaluate_ingredient(&row);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, IssueField::ContentPercentage);
    assert_eq!(issues[0].severity, IssueSeverity::Error);
}

#[test]
fn missing_content_on_complete_row_is_a_suggestion() {
    let row = ingredient("ing-1", "에탄올", Some("64-17-5"), None);
    let issues = evaluate_ingredient(&row);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, IssueSeverity::Suggestion);
    assert!(!issues[0].auto_fixable);

    // An incomplete row does not earn the nudge; its other findings lead.
    let sparse = ingredient("ing-2", "에탄올", None, None);
    assert!(evaluate_ingredient(&sparse).is_empty());
}

#[test]
fn empty_or_numeric_names_are_errors() {
    let blank = ingredient("ing-1", "   ", None, Some(10.0));
    let issues = evaluate_ingredient(&blank);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, IssueField::MainIngredient);
    assert_eq!(issues[0].severity, IssueSeverity::Error);
    assert!(!issues[0].auto_fixable);

    let numeric = ingredient("ing-2", "12345", None, Some(10.0));
    let issues = evaluate_ingredient(&numeric);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, IssueSeverity::Error);
}

#[test]
fn synonym_name_gets_canonical_suggestion() {
    let row = ingredient("ing-1", "NaCl", Some("7647-14-5"), Some(3.0));
    let issues = evaluate_ingredient(&row);

    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!(issue.field, IssueField::MainIngredient);
    assert_eq!(issue.severity, IssueSeverity::Suggestion);
    assert!(issue.auto_fixable);
    assert_eq!(issue.suggested_value.as_deref(), Some("염화나트륨"));
}

#[test]
fn multiple_rules_may_flag_the_same_row() {
    // Messy row: reformattable CAS, missing content, synonym name.
    let row = ingredient("ing-1", "NaCl", Some("7647145"), None);
    let issues = evaluate_ingredient(&row);

    assert_eq!(issues.len(), 3);
    assert!(issues.iter().any(|i| i.field == IssueField::CasNumber));
    assert!(issues
        .iter()
        .any(|i| i.field == IssueField::ContentPercentage));
    assert!(issues.iter().any(|i| i.field == IssueField::MainIngredient));
}

#[test]
fn evaluation_is_deterministic() {
    let row = ingredient("ing-1", "NaCl", Some("7647145"), None);
    assert_eq!(evaluate_ingredient(&row), evaluate_ingredient(&row));
}

#[test]
fn oversubscribed_content_flags_the_largest_contributor() {
    let rows = vec![
        ingredient("ing-a", "에탄올", Some("64-17-5"), Some(60.0)),
        ingredient("ing-b", "정제수", Some("7732-18-5"), Some(55.0)),
    ];
    let evaluated = evaluate_product(&rows);

    let flagged: Vec<_> = evaluated
        .iter()
        .filter(|entry| !entry.issues.is_empty())
        .collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].ingredient.id.0, "ing-a");
    assert_eq!(flagged[0].issues[0].severity, IssueSeverity::Warning);
    assert!(!flagged[0].issues[0].auto_fixable);
}

#[test]
fn content_sum_within_bounds_is_quiet() {
    let rows = vec![
        ingredient("ing-a", "에탄올", Some("64-17-5"), Some(70.0)),
        ingredient("ing-b", "정제수", Some("7732-18-5"), Some(29.0)),
        ingredient("ing-c", "글리세린", Some("56-81-5"), Some(1.0)),
    ];
    assert!(evaluate_product(&rows)
        .iter()
        .all(|entry| entry.issues.is_empty()));
}
