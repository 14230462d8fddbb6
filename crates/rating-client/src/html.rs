//! Pulling the rating out of a title page.
//!
//! Older pages mark the score with `itemprop="ratingValue"` (as element text
//! or a `content` attribute). Current pages only publish it in the JSON-LD
//! block under `aggregateRating.ratingValue`, so that is the fallback.

use scraper::{ElementRef, Html};
use serde_json::Value;

use crate::error::FetchError;

/// Extract the rating from a title page.
///
/// Returns `MissingRating` when neither marker is present and
/// `InvalidRating` when the marked text is not a finite number.
pub fn extract_rating(html: &str) -> Result<f64, FetchError> {
    let document = Html::parse_document(html);

    if let Some(text) = itemprop_rating(&document) {
        return parse_rating(&text);
    }
    match json_ld_rating(&document) {
        Some(value) => rating_from_json(&value),
        None => Err(FetchError::MissingRating),
    }
}

fn elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.root_element().descendants().filter_map(ElementRef::wrap)
}

fn itemprop_rating(document: &Html) -> Option<String> {
    let element = elements(document).find(|el| el.value().attr("itemprop") == Some("ratingValue"))?;
    let text = match element.value().attr("content") {
        Some(content) => content.to_string(),
        None => element.text().collect(),
    };
    Some(text)
}

/// First `aggregateRating.ratingValue` found in any JSON-LD script.
fn json_ld_rating(document: &Html) -> Option<Value> {
    elements(document)
        .filter(|el| {
            el.value().name() == "script"
                && el.value().attr("type") == Some("application/ld+json")
        })
        .filter_map(|el| serde_json::from_str::<Value>(&el.text().collect::<String>()).ok())
        .find_map(|json| find_aggregate_rating(&json))
}

fn find_aggregate_rating(json: &Value) -> Option<Value> {
    match json {
        Value::Object(map) => {
            if let Some(value) = map.get("aggregateRating").and_then(|r| r.get("ratingValue")) {
                return Some(value.clone());
            }
            map.values().find_map(find_aggregate_rating)
        }
        Value::Array(items) => items.iter().find_map(find_aggregate_rating),
        _ => None,
    }
}

fn rating_from_json(value: &Value) -> Result<f64, FetchError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| FetchError::InvalidRating(n.to_string())),
        Value::String(s) => parse_rating(s),
        other => Err(FetchError::InvalidRating(other.to_string())),
    }
}

fn parse_rating(text: &str) -> Result<f64, FetchError> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FetchError::InvalidRating(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itemprop_text() {
        let html = r#"<html><body>
            <div class="ratings"><span itemprop="ratingValue"> 8.8
            </span><span itemprop="bestRating">10</span></div>
        </body></html>"#;

        assert_eq!(extract_rating(html).unwrap(), 8.8);
    }

    #[test]
    fn test_itemprop_content_attribute() {
        let html = r#"<html><head><meta itemprop="ratingValue" content="7.4"></head><body></body></html>"#;
        assert_eq!(extract_rating(html).unwrap(), 7.4);
    }

    #[test]
    fn test_json_ld_fallback() {
        let html = r#"<html><head>
            <script type="application/ld+json">
            {"@type":"Movie","name":"Fight Club",
             "aggregateRating":{"@type":"AggregateRating","ratingCount":2300000,"ratingValue":8.8}}
            </script>
        </head><body><h1>Fight Club</h1></body></html>"#;

        assert_eq!(extract_rating(html).unwrap(), 8.8);
    }

    #[test]
    fn test_json_ld_string_value() {
        let html = r#"<script type="application/ld+json">
            [{"@type":"Movie","aggregateRating":{"ratingValue":"6.1"}}]
        </script>"#;

        assert_eq!(extract_rating(html).unwrap(), 6.1);
    }

    #[test]
    fn test_missing_marker() {
        let html = "<html><body><p>Title not found</p></body></html>";
        assert!(matches!(extract_rating(html), Err(FetchError::MissingRating)));
    }

    #[test]
    fn test_unparseable_value() {
        let html = r#"<span itemprop="ratingValue">N/A</span>"#;
        match extract_rating(html) {
            Err(FetchError::InvalidRating(text)) => assert_eq!(text, "N/A"),
            other => panic!("expected InvalidRating, got {:?}", other),
        }

        let html = r#"<span itemprop="ratingValue">NaN</span>"#;
        assert!(matches!(extract_rating(html), Err(FetchError::InvalidRating(_))));
    }

    #[test]
    fn test_zero_is_a_rating() {
        let html = r#"<span itemprop="ratingValue">0.0</span>"#;
        assert_eq!(extract_rating(html).unwrap(), 0.0);
    }
}
