use url::form_urlencoded;

use crate::models::MultiValueMap;

/// Builds the query string for the request URL from
/// `multiValueQueryStringParameters`.
///
/// Pairs are appended in key order, then value order, and encoded with the
/// `application/x-www-form-urlencoded` rules. Returns `?`-prefixed output when
/// at least one pair exists, otherwise an empty string.
#[must_use]
pub fn build_query_string(params: Option<&MultiValueMap>) -> String {
    let Some(params) = params else {
        return String::new();
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut appended = false;
    for (key, values) in params {
        for value in values {
            serializer.append_pair(key, value);
            appended = true;
        }
    }

    if appended {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}
