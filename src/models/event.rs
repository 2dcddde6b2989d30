//! API Gateway (REST, payload v1) proxy event.
//!
//! Only the fields the bridge reads, plus the ones applications commonly
//! want in their context loader. Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::MultiValueMap;

/// Proxy event sent by the gateway for every request.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub resource: Option<String>,
    /// Legacy single-value headers, last value wins.
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub multi_value_headers: Option<MultiValueMap>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub multi_value_query_string_parameters: Option<MultiValueMap>,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub stage_variables: Option<HashMap<String, String>>,
    #[serde(default)]
    pub request_context: RequestContext,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// Gateway-side metadata about the request. Inserted into the built
/// request's extensions.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub domain_name: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub resource_path: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub api_id: Option<String>,
    #[serde(default)]
    pub identity: Option<Identity>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub source_ip: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl GatewayEvent {
    /// Looks up a header by its exact name: the single-value map first, then
    /// the last value in the multi-value map. Empty values count as absent.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|headers| headers.get(name))
            .map(String::as_str)
            .or_else(|| {
                self.multi_value_headers
                    .as_ref()
                    .and_then(|headers| headers.get(name))
                    .and_then(<[String]>::last)
                    .map(String::as_str)
            })
            .filter(|value| !value.is_empty())
    }
}
