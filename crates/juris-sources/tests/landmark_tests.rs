use juris_core::source::LandmarkLookup;
use juris_sources::scotus::{landmark_topic_lookup, ScotusClient};

#[test]
fn test_topic_lookup_finds_fourth_amendment_cases() {
    let hits = landmark_topic_lookup("fourth amendment digital privacy", 5);
    assert_eq!(hits.len(), 5);
    assert_eq!(hits[0].case_name, "Carpenter v. United States");
    assert!(hits.iter().all(|h| !h.citation.is_empty()));
}

#[test]
fn test_topic_lookup_caps_results() {
    let hits = landmark_topic_lookup("fourth amendment", 2);
    assert_eq!(hits.len(), 2);
}

#[test]
fn test_topic_lookup_is_case_insensitive() {
    let hits = landmark_topic_lookup("Qualified Immunity for officers", 3);
    assert_eq!(hits[0].case_name, "Harlow v. Fitzgerald");
}

#[test]
fn test_topic_lookup_unknown_topic_is_empty() {
    assert!(landmark_topic_lookup("admiralty salvage rights", 5).is_empty());
}

#[test]
fn test_scotus_client_implements_landmark_lookup() {
    let client = ScotusClient::new(30);
    let lookup: &dyn LandmarkLookup = &client;
    let hits = lookup.topic_lookup("section 1983 municipal liability", 3);
    assert!(hits.iter().any(|h| h.case_name == "Monroe v. Pape"));
}
