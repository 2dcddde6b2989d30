use http::{HeaderMap, HeaderName, HeaderValue};

use crate::models::{BridgeError, MultiValueMap};

/// Converts `multiValueHeaders` into an ordered header multimap.
///
/// Every value is appended under its key in the order given, duplicates
/// included. Keys without values contribute nothing.
///
/// # Errors
///
/// Returns `BridgeError::InvalidHeaderName` or `BridgeError::InvalidHeaderValue`
/// if a key or value cannot be represented as an HTTP header.
pub fn build_header_map(headers: Option<&MultiValueMap>) -> Result<HeaderMap, BridgeError> {
    let mut header_map = HeaderMap::new();

    let Some(headers) = headers else {
        return Ok(header_map);
    };

    for (key, values) in headers {
        if values.is_empty() {
            continue;
        }
        let name = HeaderName::from_bytes(key.as_bytes())?;
        for value in values {
            header_map.append(name.clone(), HeaderValue::from_str(value)?);
        }
    }

    Ok(header_map)
}
