//! Encodes the application's HTTP response as a gateway proxy result.

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Response};
use http_body::Body;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full};
use indexmap::IndexMap;
use lambda_runtime::tracing::debug;
use std::collections::HashMap;

use crate::config::BridgeConfig;
use crate::models::{BoxError, BridgeError, GatewayResult};

/// Body type application handlers respond with.
pub type ResponseBody = BoxBody<Bytes, BoxError>;

/// A response body holding `data` in full.
#[must_use]
pub fn full_body(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into()).map_err(|never| match never {}).boxed()
}

#[must_use]
pub fn empty_body() -> ResponseBody {
    Empty::<Bytes>::new().map_err(|never| match never {}).boxed()
}

/// Splits headers into single-value and multi-value maps.
///
/// Pairs are grouped by key in first-seen order; a key seen once goes to the
/// single-value map, a key seen more than once goes only to the multi-value
/// map with its values in order. Non-UTF-8 values are converted lossily.
/// Result header names are lowercase, as normalized by `http::HeaderMap`.
#[must_use]
pub fn partition_headers(
    headers: &HeaderMap,
) -> (HashMap<String, String>, HashMap<String, Vec<String>>) {
    let mut grouped: IndexMap<&str, Vec<String>> = IndexMap::new();
    for (name, value) in headers {
        grouped
            .entry(name.as_str())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    let mut single = HashMap::new();
    let mut multi = HashMap::new();
    for (key, mut values) in grouped {
        if values.len() == 1 {
            single.insert(key.to_string(), values.remove(0));
        } else {
            multi.insert(key.to_string(), values);
        }
    }
    (single, multi)
}

/// Converts a response into the gateway result, draining its body once.
///
/// Bodies whose content type is not textual (per `config`) are base64
/// encoded; textual bodies are passed through as UTF-8 text.
///
/// # Errors
///
/// Returns `BridgeError::Body` if reading the body fails.
pub async fn encode_response<B>(
    response: Response<B>,
    config: &BridgeConfig,
) -> Result<GatewayResult, BridgeError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let (parts, body) = response.into_parts();

    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let is_base64_encoded = !config.is_textual(content_type);

    let (headers, multi_value_headers) = partition_headers(&parts.headers);

    let bytes = body
        .collect()
        .await
        .map_err(|e| BridgeError::Body(e.into()))?
        .to_bytes();

    let body = if is_base64_encoded {
        general_purpose::STANDARD.encode(&bytes)
    } else {
        String::from_utf8_lossy(&bytes).into_owned()
    };

    debug!(
        status = parts.status.as_u16(),
        is_base64_encoded,
        body_len = bytes.len(),
        "Encoded application response"
    );

    Ok(GatewayResult {
        status_code: parts.status.as_u16(),
        headers,
        multi_value_headers,
        body,
        is_base64_encoded,
    })
}
