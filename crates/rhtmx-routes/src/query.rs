// File: src/query.rs
// Purpose: Serialize search parameters into a canonical query string

use serde_json::{Map, Value};

use crate::render::stringify;

/// Builds `?k=v&k2=v2` from search parameters, or an empty string
///
/// Entries keep their insertion order. `null` values (and `null` array
/// elements) are omitted; arrays emit one pair per element. Keys and values
/// are percent-encoded.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::serialize_query;
/// use serde_json::json;
///
/// let search = json!({"page": 1, "tags": ["a", "b"], "flag": true, "skip": null});
/// assert_eq!(
///     serialize_query(search.as_object().unwrap()),
///     "?page=1&tags=a&tags=b&flag=true"
/// );
/// ```
pub fn serialize_query(search: &Map<String, Value>) -> String {
    let mut pairs: Vec<String> = Vec::new();

    for (key, value) in search {
        let key = urlencoding::encode(key);
        match value {
            Value::Null => {}
            Value::Array(items) => pairs.extend(
                items
                    .iter()
                    .filter(|item| !item.is_null())
                    .map(|item| format!("{}={}", key, urlencoding::encode(&stringify(item)))),
            ),
            scalar => pairs.push(format!("{}={}", key, urlencoding::encode(&stringify(scalar)))),
        }
    }

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}
