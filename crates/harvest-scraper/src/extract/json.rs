//! Pass-through extraction of the store-search JSON body.

use serde_json::Value;

use crate::error::ScraperError;
use crate::types::StoreRecord;

const LIST_KEY: &str = "list";

/// Parses `body` as JSON and returns the entries of its top-level `"list"`
/// array as [`StoreRecord`]s, in order.
///
/// `context` names the request in error messages and logs.
///
/// # Errors
///
/// - [`ScraperError::Deserialize`] if `body` is not valid JSON.
/// - [`ScraperError::MissingList`] if the body has no `"list"` array.
pub fn extract_store_list(body: &str, context: &str) -> Result<Vec<StoreRecord>, ScraperError> {
    let payload: Value =
        serde_json::from_str(body).map_err(|source| ScraperError::Deserialize {
            context: context.to_owned(),
            source,
        })?;
    store_records_from_value(payload, context)
}

/// Same as [`extract_store_list`] for an already-parsed body.
///
/// Entries that are not JSON objects cannot be records; they are skipped
/// with a warning.
///
/// # Errors
///
/// Returns [`ScraperError::MissingList`] if `payload` is not an object with
/// a `"list"` array.
pub fn store_records_from_value(
    payload: Value,
    context: &str,
) -> Result<Vec<StoreRecord>, ScraperError> {
    let missing = || ScraperError::MissingList {
        context: context.to_owned(),
    };

    let Value::Object(mut root) = payload else {
        return Err(missing());
    };
    let Some(Value::Array(entries)) = root.remove(LIST_KEY) else {
        return Err(missing());
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match entry {
            Value::Object(fields) => records.push(StoreRecord::new(fields)),
            other => {
                tracing::warn!(
                    context,
                    index,
                    entry = %other,
                    "skipping non-object entry in store list"
                );
            }
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn returns_list_entries_verbatim_and_in_order() {
        let body = json!({
            "list": [
                { "s_name": "광화문", "sido_code": "01", "lat": "37.5712" },
                { "s_name": "종로3가", "sido_code": "01", "lat": "37.5704" }
            ]
        })
        .to_string();

        let records = extract_store_list(&body, "region 01").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("s_name"), Some(&json!("광화문")));
        assert_eq!(records[1].get("s_name"), Some(&json!("종로3가")));
        assert_eq!(records[0].field_names().collect::<Vec<_>>(), ["s_name", "sido_code", "lat"]);
    }

    #[test]
    fn empty_list_yields_no_records() {
        let records = extract_store_list(r#"{"list": []}"#, "region 17").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn ignores_sibling_top_level_keys() {
        let body = r#"{"status": "ok", "list": [{"s_name": "부산역"}], "total": 1}"#;
        let records = extract_store_list(body, "region 07").unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].get("status").is_none());
    }

    #[test]
    fn missing_list_key_is_an_error() {
        let err = extract_store_list(r#"{"result": []}"#, "region 02").unwrap_err();
        assert!(
            matches!(err, ScraperError::MissingList { ref context } if context == "region 02"),
            "expected MissingList, got: {err:?}"
        );
    }

    #[test]
    fn null_list_is_an_error() {
        let err = extract_store_list(r#"{"list": null}"#, "region 02").unwrap_err();
        assert!(matches!(err, ScraperError::MissingList { .. }));
    }

    #[test]
    fn non_object_body_is_an_error() {
        let err = extract_store_list("[1, 2, 3]", "region 03").unwrap_err();
        assert!(matches!(err, ScraperError::MissingList { .. }));
    }

    #[test]
    fn invalid_json_is_a_deserialize_error() {
        let err = extract_store_list("<html>maintenance</html>", "region 04").unwrap_err();
        assert!(
            matches!(err, ScraperError::Deserialize { .. }),
            "expected Deserialize, got: {err:?}"
        );
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let body = r#"{"list": [{"s_name": "대전"}, "garbage", null, {"s_name": "세종"}]}"#;
        let records = extract_store_list(body, "region 06").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("s_name"), Some(&json!("세종")));
    }
}
