use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Proxy result handed back to the gateway.
///
/// Headers seen exactly once land in `headers`; repeated headers land only in
/// `multi_value_headers`. `body` is base64 when `is_base64_encoded` is set.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResult {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub multi_value_headers: HashMap<String, Vec<String>>,
    pub body: String,
    pub is_base64_encoded: bool,
}
