use juris_core::types::{CaseRecord, FetchedData, StatuteRecord};
use juris_pipeline::synthesizer::{format_cases, format_statutes, parse_sections};

// ── Section parsing ──────────────────────────────────────────────────────

const REPLY: &str = "\
## TLDR
Qualified immunity shields officers unless the right was clearly established.

## KEY CASES
**Harlow v. Fitzgerald**, 457 U.S. 800 (1982)
- HOLDING: Established the objective qualified immunity standard.

## RELEVANT STATUTES
42 U.S.C. § 1983 creates the cause of action.

## ANSWER
Courts apply a two-step analysis.

## GAPS
- Circuit-level variation is not covered.
";

#[test]
fn test_parse_sections_splits_on_headers() {
    let report = parse_sections(REPLY);
    assert!(report.tldr.starts_with("Qualified immunity shields"));
    assert!(report.key_cases.contains("Harlow v. Fitzgerald"));
    assert!(report.statutes.contains("42 U.S.C. § 1983"));
    assert_eq!(report.answer, "Courts apply a two-step analysis.");
    assert!(report.gaps.contains("Circuit-level variation"));
}

#[test]
fn test_parse_sections_tolerates_header_variants() {
    let report = parse_sections("TLDR:\nShort answer.\n# ANSWER\nLong answer.");
    assert_eq!(report.tldr, "Short answer.");
    assert_eq!(report.answer, "Long answer.");
}

#[test]
fn test_parse_sections_unstructured_reply_becomes_answer() {
    let report = parse_sections("The model ignored the requested format entirely.");
    assert_eq!(
        report.answer,
        "The model ignored the requested format entirely."
    );
    assert!(report.tldr.is_empty());
}

// ── Prompt formatting ────────────────────────────────────────────────────

#[test]
fn test_format_cases_includes_metadata_and_landmark_tag() {
    let cases = vec![
        CaseRecord {
            source: "courtlistener".into(),
            case_name: "Harlow v. Fitzgerald".into(),
            citation: "457 U.S. 800".into(),
            court: "scotus".into(),
            date_filed: "1982-06-24".into(),
            snippet: "qualified <em>immunity</em> &amp; damages".into(),
            absolute_url: "/opinion/110763/harlow-v-fitzgerald/".into(),
            is_landmark: false,
        },
        CaseRecord {
            source: "scotus_landmark".into(),
            case_name: "Carpenter v. United States".into(),
            citation: "585 U.S. 296 (2018)".into(),
            is_landmark: true,
            ..Default::default()
        },
    ];
    let text = format_cases(&cases);
    assert!(text.contains("Case 1: Harlow v. Fitzgerald"));
    assert!(text.contains("Citation: 457 U.S. 800"));
    // HTML stripped, entity unescaped.
    assert!(text.contains("Excerpt/Topic: qualified immunity & damages"));
    assert!(text.contains(
        "CourtListener URL: https://www.courtlistener.com/opinion/110763/harlow-v-fitzgerald/"
    ));
    assert!(text.contains("Case 2: Carpenter v. United States"));
    assert!(text.contains("[LANDMARK CASE]"));
}

#[test]
fn test_format_cases_empty_is_empty() {
    assert!(format_cases(&[]).is_empty());
}

#[test]
fn test_format_statutes_includes_number_and_policy_area() {
    let statutes = vec![StatuteRecord {
        source: "congress_gov".into(),
        title: "Fourth Amendment Is Not For Sale Act".into(),
        number: "HR 4639".into(),
        policy_area: "Civil Rights and Liberties".into(),
        ..Default::default()
    }];
    let text = format_statutes(&statutes);
    assert!(text.contains("Statute 1: Fourth Amendment Is Not For Sale Act (HR 4639)"));
    assert!(text.contains("Policy Area: Civil Rights and Liberties"));
}

// ── Statute gap detection ────────────────────────────────────────────────

#[test]
fn test_missing_statutes_excludes_found_titles() {
    let fetched = FetchedData {
        statutes: vec![StatuteRecord {
            title: "Civil Rights Act of 1964".into(),
            ..Default::default()
        }],
        identified_statutes: vec!["Civil Rights Act".into(), "42 U.S.C. § 1983".into()],
        ..Default::default()
    };
    let missing = fetched.missing_statutes();
    assert_eq!(missing, vec!["42 U.S.C. § 1983"]);
}

#[test]
fn test_missing_statutes_ignores_empty_titles() {
    let fetched = FetchedData {
        statutes: vec![StatuteRecord::default()],
        identified_statutes: vec!["Stored Communications Act".into()],
        ..Default::default()
    };
    assert_eq!(
        fetched.missing_statutes(),
        vec!["Stored Communications Act"]
    );
}
