use juris_sources::congress::parse_bill;
use juris_sources::courtlistener::parse_search_result;
use juris_sources::scotus::{parse_oral_arguments, parse_slip_opinions};
use serde_json::json;

// ── CourtListener ────────────────────────────────────────────────────────

#[test]
fn test_parse_search_result_normalizes_fields() {
    let item = json!({
        "caseName": "Harlow v. Fitzgerald",
        "citation": ["457 U.S. 800"],
        "court": "Supreme Court of the United States",
        "dateFiled": "1982-06-24",
        "snippet": "qualified <em>immunity</em>",
        "absolute_url": "/opinion/110763/harlow-v-fitzgerald/",
    });
    let record = parse_search_result(&item).expect("record");
    assert_eq!(record.source, "courtlistener");
    assert_eq!(record.case_name, "Harlow v. Fitzgerald");
    assert_eq!(record.citation, "457 U.S. 800");
    assert_eq!(record.date_filed, "1982-06-24");
    assert_eq!(record.absolute_url, "/opinion/110763/harlow-v-fitzgerald/");
    assert!(!record.is_landmark);
}

#[test]
fn test_parse_search_result_snake_case_fields() {
    let item = json!({
        "case_name": "Terry v. Ohio",
        "date_filed": "1968-06-10",
        "citation": "392 U.S. 1",
    });
    let record = parse_search_result(&item).expect("record");
    assert_eq!(record.case_name, "Terry v. Ohio");
    assert_eq!(record.date_filed, "1968-06-10");
    assert_eq!(record.citation, "392 U.S. 1");
}

#[test]
fn test_parse_search_result_citation_composite_fallback() {
    let item = json!({
        "caseName": "Mapp v. Ohio",
        "court_citation_string": "U.S.",
        "dateFiled": "1961-06-19",
    });
    let record = parse_search_result(&item).expect("record");
    assert_eq!(record.citation, "Mapp v. Ohio (U.S. 1961)");
}

#[test]
fn test_parse_search_result_requires_case_name() {
    assert!(parse_search_result(&json!({ "citation": "392 U.S. 1" })).is_none());
}

// ── Congress.gov ─────────────────────────────────────────────────────────

#[test]
fn test_parse_bill_normalizes_fields() {
    let bill = json!({
        "title": "Fourth Amendment Is Not For Sale Act",
        "type": "HR",
        "number": "4639",
        "congress": 118,
        "introducedDate": "2023-07-27",
        "latestAction": { "text": "Received in the Senate." },
        "policyArea": { "name": "Civil Rights and Liberties" },
        "url": "https://api.congress.gov/v3/bill/118/hr/4639",
    });
    let record = parse_bill(&bill).expect("record");
    assert_eq!(record.source, "congress_gov");
    assert_eq!(record.number, "HR 4639");
    assert_eq!(record.congress, "118");
    assert_eq!(record.latest_action, "Received in the Senate.");
    assert_eq!(record.policy_area, "Civil Rights and Liberties");
}

#[test]
fn test_parse_bill_integer_number() {
    let bill = json!({ "title": "A bill", "type": "S", "number": 1319 });
    let record = parse_bill(&bill).expect("record");
    assert_eq!(record.number, "S 1319");
}

#[test]
fn test_parse_bill_requires_title() {
    assert!(parse_bill(&json!({ "number": "4639" })).is_none());
}

// ── supremecourt.gov scraping ────────────────────────────────────────────

const OPINIONS_HTML: &str = r#"
<table>
  <tr><td><a href="/opinions/24pdf/23-175_m6io.pdf">City of Grants Pass v. Johnson</a></td></tr>
  <tr><td><a href="/opinions/24pdf/23-719_19m2.pdf">Trump v. Anderson</a></td></tr>
  <tr><td><a href="/other/page.html">not an opinion</a></td></tr>
</table>
"#;

#[test]
fn test_parse_slip_opinions_extracts_pdf_links() {
    let opinions = parse_slip_opinions(OPINIONS_HTML, "2024");
    assert_eq!(opinions.len(), 2);
    assert_eq!(
        opinions[0].pdf_url,
        "https://www.supremecourt.gov/opinions/24pdf/23-175_m6io.pdf"
    );
    assert!(opinions.iter().all(|o| o.term == "2024"));
}

#[test]
fn test_parse_slip_opinions_caps_at_ten() {
    let row = r#"<a href="/opinions/24pdf/23-100_abcd.pdf">x</a>"#;
    let html = row.repeat(25);
    assert_eq!(parse_slip_opinions(&html, "2024").len(), 10);
}

#[test]
fn test_parse_oral_arguments_extracts_audio_links() {
    let html = r#"<a href="/oral_arguments/audio/2024/23-175">audio</a>"#;
    let args = parse_oral_arguments(html, "2024");
    assert_eq!(args.len(), 1);
    assert_eq!(
        args[0].audio_url,
        "https://www.supremecourt.gov/oral_arguments/audio/2024/23-175"
    );
}
