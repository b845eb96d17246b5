//! Tests for search response decoding

use super::*;

#[test]
fn test_decode_wbsearchentities_response() {
    let body = r#"{
        "searchinfo": {"search": "blue ca"},
        "search": [
            {
                "id": "Q1",
                "label": "blue cat",
                "match": {"type": "label", "language": "en", "text": "blue cat"}
            },
            {
                "id": "Q2",
                "label": "Blue Carbuncle",
                "match": {"type": "alias", "language": "en", "text": "blue carbuncle"}
            }
        ],
        "success": 1
    }"#;

    let response: SearchResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.search.len(), 2);
    assert_eq!(response.search[0].id.as_deref(), Some("Q1"));
    assert_eq!(response.search[1].matched.kind.as_deref(), Some("alias"));

    let texts: Vec<&str> = response.match_texts().collect();
    assert_eq!(texts, vec!["blue cat", "blue carbuncle"]);
}

#[test]
fn test_decode_response_without_search_field() {
    let response: SearchResponse = serde_json::from_str(r#"{"success": 1}"#).unwrap();
    assert!(response.search.is_empty());
}

#[test]
fn test_decode_result_without_match_fails() {
    let body = r#"{"search": [{"id": "Q1", "label": "cat"}]}"#;
    let result: Result<SearchResponse, _> = serde_json::from_str(body);
    assert!(result.is_err());
}

#[test]
fn test_search_result_from_text() {
    let result = SearchResult::from_text("car");
    assert_eq!(result.matched.text, "car");
    assert!(result.id.is_none());
}
