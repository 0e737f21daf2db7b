use juris_pipeline::gemini::extract_text;
use serde_json::json;

#[test]
fn test_extract_text_joins_text_parts() {
    let data = json!({
        "candidates": [{
            "content": { "parts": [{ "text": "first" }, { "text": "second" }] }
        }]
    });
    assert_eq!(extract_text(&data).unwrap(), "first\nsecond");
}

#[test]
fn test_extract_text_skips_thought_parts() {
    let data = json!({
        "candidates": [{
            "content": { "parts": [
                { "thought": true, "text": "internal reasoning" },
                { "text": "the answer" }
            ] }
        }]
    });
    assert_eq!(extract_text(&data).unwrap(), "the answer");
}

#[test]
fn test_extract_text_uses_thoughts_when_nothing_else() {
    let data = json!({
        "candidates": [{
            "content": { "parts": [{ "thought": true, "text": "only thoughts" }] }
        }]
    });
    assert_eq!(extract_text(&data).unwrap(), "only thoughts");
}

#[test]
fn test_extract_text_errors_on_missing_candidates() {
    assert!(extract_text(&json!({ "candidates": [] })).is_err());
    assert!(extract_text(&json!({})).is_err());
}

#[test]
fn test_extract_text_errors_on_empty_text() {
    let data = json!({
        "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
    });
    assert!(extract_text(&data).is_err());
}
