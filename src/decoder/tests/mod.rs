// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use serde_json::json;

fn entry(id: &str) -> Value {
    json!({
        "sectionId": id,
        "sectionName": format!("Section {id}"),
        "webTitle": format!("Headline {id}"),
        "webPublicationDate": "2024-01-15T09:30:00Z",
        "webUrl": format!("https://www.theguardian.com/{id}"),
        "tags": [{ "webTitle": format!("Author {id}") }]
    })
}

fn body(results: Vec<Value>) -> String {
    json!({ "response": { "status": "ok", "results": results } }).to_string()
}

#[test]
fn test_decode_well_formed_entries_in_order() {
    let ids = ["world", "politics", "sport", "culture"];
    let articles = decode(Some(&body(ids.iter().map(|id| entry(id)).collect())));

    assert_eq!(articles.len(), ids.len(), "every entry should decode");
    for (article, id) in articles.iter().zip(ids) {
        assert_eq!(article.section_id(), id);
        assert_eq!(article.section_name(), format!("Section {id}"));
        assert_eq!(article.title(), format!("Headline {id}"));
        assert_eq!(article.publication_date(), "2024-01-15T09:30:00Z");
        assert_eq!(article.author_name(), format!("Author {id}"));
        assert_eq!(article.url(), format!("https://www.theguardian.com/{id}"));
    }
}

#[test]
fn test_decode_keeps_duplicates() {
    let articles = decode(Some(&body(vec![entry("world"), entry("world")])));
    assert_eq!(articles.len(), 2, "duplicates are not removed");
    assert_eq!(articles[0], articles[1]);
}

#[test]
fn test_entry_missing_required_field_is_skipped() {
    for field in [
        "sectionId",
        "sectionName",
        "webTitle",
        "webPublicationDate",
        "webUrl",
    ] {
        let mut broken = entry("broken");
        broken.as_object_mut().unwrap().remove(field);

        let articles = decode(Some(&body(vec![entry("first"), broken, entry("last")])));

        assert_eq!(articles.len(), 2, "entry without {field} should be skipped");
        assert_eq!(articles[0].section_id(), "first");
        assert_eq!(articles[1].section_id(), "last");
    }
}

#[test]
fn test_entry_with_non_string_field_is_skipped() {
    let mut broken = entry("broken");
    broken["webUrl"] = json!(42);
    let mut null_title = entry("null");
    null_title["webTitle"] = Value::Null;

    let articles = decode(Some(&body(vec![broken, entry("kept"), null_title])));

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].section_id(), "kept");
}

#[test]
fn test_non_object_entries_are_skipped() {
    let articles = decode(Some(&body(vec![
        json!("just a string"),
        entry("kept"),
        json!(null),
        json!([1, 2, 3]),
    ])));

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].section_id(), "kept");
}

#[test]
fn test_decode_entry_reports_first_missing_field() {
    let mut broken = entry("x");
    broken.as_object_mut().unwrap().remove("webPublicationDate");

    assert_eq!(
        decode_entry(&broken),
        Err(EntryError::MissingField("webPublicationDate"))
    );
    assert_eq!(decode_entry(&json!(7)), Err(EntryError::NotAnObject));
}

#[test]
fn test_author_from_first_tag() {
    let mut e = entry("x");
    e["tags"] = json!([{ "webTitle": "Jane Doe" }, { "webTitle": "John Roe" }]);

    let articles = decode(Some(&body(vec![e])));
    assert_eq!(articles[0].author_name(), "Jane Doe");
}

#[test]
fn test_author_placeholder_for_empty_tags() {
    let mut e = entry("x");
    e["tags"] = json!([]);

    let articles = decode(Some(&body(vec![e])));
    assert_eq!(articles[0].author_name(), "No author name");
}

#[test]
fn test_author_placeholder_for_missing_tags() {
    let mut e = entry("x");
    e.as_object_mut().unwrap().remove("tags");

    let articles = decode(Some(&body(vec![e])));
    assert_eq!(articles.len(), 1, "tags are optional");
    assert_eq!(articles[0].author_name(), "No author name");
}

#[test]
fn test_author_placeholder_for_non_array_tags() {
    let mut e = entry("x");
    e["tags"] = json!("contributor");

    let articles = decode(Some(&body(vec![e])));
    assert_eq!(articles[0].author_name(), NO_AUTHOR_NAME);
}

#[test]
fn test_author_placeholder_for_tag_without_title() {
    for tag in [json!({}), json!({ "webTitle": "" }), json!({ "webTitle": 5 }), json!("x")] {
        let mut e = entry("x");
        e["tags"] = json!([tag.clone()]);

        let articles = decode(Some(&body(vec![e])));
        assert_eq!(articles[0].author_name(), "No Author", "tag {tag}");
    }
}

#[test]
fn test_blank_input_yields_empty() {
    assert!(decode(None).is_empty());
    assert!(decode(Some("")).is_empty());
    assert!(decode(Some("   ")).is_empty());
    assert!(decode(Some("\n\t")).is_empty());
    assert!(try_decode("  ").unwrap().is_empty(), "blank is not an error");
}

#[test]
fn test_missing_response_yields_empty() {
    let body = json!({ "results": [entry("x")] }).to_string();

    assert!(decode(Some(&body)).is_empty());
    assert!(matches!(
        try_decode(&body),
        Err(DecodeError::Structural(_))
    ));
}

#[test]
fn test_missing_results_yields_empty() {
    let body = json!({ "response": { "status": "error" } }).to_string();

    assert!(decode(Some(&body)).is_empty());
    assert!(matches!(
        try_decode(&body),
        Err(DecodeError::Structural(_))
    ));
}

#[test]
fn test_wrongly_typed_structure_yields_empty() {
    for body in [
        json!({ "response": [] }),
        json!({ "response": { "results": {} } }),
        json!({ "response": "ok" }),
        json!([1, 2]),
    ] {
        let body = body.to_string();
        assert!(decode(Some(&body)).is_empty(), "{body}");
        assert!(try_decode(&body).is_err(), "{body}");
    }
}

#[test]
fn test_invalid_json_yields_empty() {
    let body = r#"{"response": {"results": ["#;

    assert!(decode(Some(body)).is_empty());
    assert!(matches!(try_decode(body), Err(DecodeError::Json(_))));
}

#[test]
fn test_empty_results_is_not_an_error() {
    let articles = try_decode(&body(vec![])).unwrap();
    assert!(articles.is_empty());
}

#[test]
fn test_publication_date_stored_verbatim() {
    let mut e = entry("x");
    e["webPublicationDate"] = json!("not really a date");

    let articles = decode(Some(&body(vec![e])));
    assert_eq!(articles[0].publication_date(), "not really a date");
}

#[test]
fn test_unknown_fields_are_ignored() {
    let mut e = entry("x");
    e["pillarName"] = json!("News");
    e["isHosted"] = json!(false);

    let articles = decode(Some(&body(vec![e])));
    assert_eq!(articles.len(), 1);
}
