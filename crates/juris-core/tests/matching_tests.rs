use juris_core::matching::{dedup_key, normalize, NameMatcher};
use juris_core::types::CaseRecord;

fn case(name: &str) -> CaseRecord {
    CaseRecord {
        case_name: name.into(),
        ..Default::default()
    }
}

// ── normalize / dedup_key ────────────────────────────────────────────────

#[test]
fn test_normalize_canonicalizes_separator() {
    assert_eq!(normalize("Harlow v. Fitzgerald"), "harlow v fitzgerald");
    assert_eq!(normalize("Harlow vs. Fitzgerald"), "harlow v fitzgerald");
    assert_eq!(normalize("Harlow v Fitzgerald"), "harlow v fitzgerald");
}

#[test]
fn test_normalize_strips_punctuation_and_collapses_whitespace() {
    assert_eq!(
        normalize("Mapp  v.  Ohio, 367 U.S. 643!"),
        "mapp v ohio 367 us 643"
    );
    assert_eq!(normalize("O'Brien v. Smith"), "obrien v smith");
}

#[test]
fn test_dedup_key_truncates_to_60_chars() {
    let long = "A".repeat(100);
    assert_eq!(dedup_key(&long).len(), 60);
}

#[test]
fn test_dedup_key_ignores_punctuation_differences() {
    assert_eq!(
        dedup_key("Roe v. Wade, 410 U.S. 113"),
        dedup_key("Roe v Wade 410 US 113")
    );
}

// ── matches ──────────────────────────────────────────────────────────────

#[test]
fn test_matches_tolerates_punctuation_and_et_al() {
    let m = NameMatcher::default();
    assert!(m.matches("Harlow v. Fitzgerald", "Harlow v Fitzgerald"));
    assert!(m.matches("Harlow v. Fitzgerald", "Harlow v. Fitzgerald, et al."));
    assert!(m.matches("Brown v. Board of Education", "Brown vs. Board of Education"));
}

#[test]
fn test_matches_shortened_form_by_containment() {
    let m = NameMatcher::default();
    assert!(m.matches("Katz v. United States", "Katz v. United States, 389 U.S. 347"));
}

#[test]
fn test_matches_party_suffix_variation_by_prefix() {
    let m = NameMatcher::default();
    // Neither normalized form contains the other; both party prefixes agree.
    assert!(m.matches(
        "Harlow Jr. v. Fitzgerald Corp",
        "Harlow Sr. v. Fitzgerald Inc"
    ));
}

#[test]
fn test_matches_rejects_different_first_party() {
    let m = NameMatcher::default();
    // Second parties identical; first parties differ.
    assert!(!m.matches("Smith v. Jones", "Brown v. Jones"));
}

#[test]
fn test_matches_rejects_different_second_party() {
    let m = NameMatcher::default();
    assert!(!m.matches("Smith v. Jones", "Smith v. Brown"));
}

#[test]
fn test_matches_is_symmetric() {
    let m = NameMatcher::default();
    let pairs = [
        ("Harlow v. Fitzgerald", "Harlow v. Fitzgerald, et al."),
        ("Katz v. United States", "Katz v. US"),
        ("Smith v. Jones", "Brown v. Jones"),
        ("Roe v Wade", "Roe v. Wade, 410 U.S. 113"),
    ];
    for (a, b) in pairs {
        assert_eq!(m.matches(a, b), m.matches(b, a), "asymmetric for {a} / {b}");
    }
}

#[test]
fn test_matches_rejects_empty_names() {
    let m = NameMatcher::default();
    assert!(!m.matches("", "Harlow v. Fitzgerald"));
    assert!(!m.matches("Harlow v. Fitzgerald", ""));
    assert!(!m.matches("", ""));
}

// ── best_match ───────────────────────────────────────────────────────────

#[test]
fn test_best_match_prefers_exact_identity() {
    let m = NameMatcher::default();
    let candidates = vec![
        case("Saucier v. Katz"),
        case("Harlow v. Fitzgerald, 457 U.S. 800"),
    ];
    let best = m.best_match("Harlow v. Fitzgerald", &candidates);
    assert_eq!(
        best.map(|r| r.case_name),
        Some("Harlow v. Fitzgerald, 457 U.S. 800".to_string())
    );
}

#[test]
fn test_best_match_party_partial_rule() {
    let m = NameMatcher::default();
    // No " v " separator in the display name, so identity matching fails;
    // both 8-char party prefixes are present.
    let candidates = vec![
        case("Saucier against Katz"),
        case("In re Pearson against Callahan"),
    ];
    let best = m.best_match("Pearson v. Callahan", &candidates);
    assert_eq!(
        best.map(|r| r.case_name),
        Some("In re Pearson against Callahan".to_string())
    );
}

#[test]
fn test_best_match_falls_back_to_top_result() {
    let m = NameMatcher::default();
    let candidates = vec![case("Terry v. Ohio"), case("Mapp v. Ohio")];
    let best = m.best_match("Griswold v. Connecticut", &candidates);
    assert_eq!(best.map(|r| r.case_name), Some("Terry v. Ohio".to_string()));
}

#[test]
fn test_best_match_none_without_candidates() {
    let m = NameMatcher::default();
    assert!(m.best_match("Harlow v. Fitzgerald", &[]).is_none());
}
