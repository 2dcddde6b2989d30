//! Rebuilds an HTTP request from a gateway proxy event.

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use http::Request;
use http::header::CONTENT_TYPE;
use http_body::{Body, Frame, SizeHint};
use lambda_runtime::tracing::debug;
use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};
use url::Url;

use crate::config::BridgeConfig;
use crate::headers::build_header_map;
use crate::models::{BridgeError, GatewayEvent};
use crate::query::build_query_string;

const DEFAULT_SCHEME: &str = "https";
const FORWARDED_HOST: &str = "X-Forwarded-Host";
const FORWARDED_PROTO: &str = "X-Forwarded-Proto";
const HOST: &str = "Host";
const CONTENT_TYPE_KEY: &str = "Content-Type";

/// Body of a rebuilt request.
///
/// Base64 multipart payloads stay raw bytes so boundaries survive; every
/// other body is text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    Text(String),
    Binary(Bytes),
}

impl RequestBody {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes.as_ref(),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Empty | Self::Binary(_) => None,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<RequestBody> for Bytes {
    fn from(body: RequestBody) -> Self {
        match body {
            RequestBody::Empty => Self::new(),
            RequestBody::Text(text) => Self::from(text),
            RequestBody::Binary(bytes) => bytes,
        }
    }
}

/// Yields the whole body as a single data frame.
impl Body for RequestBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let body = std::mem::take(self.get_mut());
        if body.is_empty() {
            return Poll::Ready(None);
        }
        Poll::Ready(Some(Ok(Frame::data(Bytes::from(body)))))
    }

    fn is_end_stream(&self) -> bool {
        self.is_empty()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.as_bytes().len() as u64)
    }
}

/// Resolves the host: `requestContext.domainName`, then `X-Forwarded-Host`,
/// then `Host`.
fn resolve_host(event: &GatewayEvent) -> Option<&str> {
    event
        .request_context
        .domain_name
        .as_deref()
        .filter(|domain| !domain.is_empty())
        .or_else(|| event.header(FORWARDED_HOST))
        .or_else(|| event.header(HOST))
}

fn resolve_scheme(event: &GatewayEvent) -> &str {
    event.header(FORWARDED_PROTO).unwrap_or(DEFAULT_SCHEME)
}

/// Assembles the absolute request URL from scheme, host, path and query.
///
/// # Errors
///
/// Returns `BridgeError::MissingHost` when no host source is present and
/// `BridgeError::InvalidUrl` when the pieces do not form a URL.
pub fn build_url(event: &GatewayEvent) -> Result<Url, BridgeError> {
    let host = resolve_host(event).ok_or(BridgeError::MissingHost)?;
    let scheme = resolve_scheme(event);
    let search = build_query_string(event.multi_value_query_string_parameters.as_ref());

    Ok(Url::parse(&format!("{scheme}://{host}{}{search}", event.path))?)
}

/// Decodes the event body.
///
/// # Errors
///
/// Returns `BridgeError::InvalidBase64` if a body flagged as base64 fails to
/// decode.
pub fn decode_body(event: &GatewayEvent, config: &BridgeConfig) -> Result<RequestBody, BridgeError> {
    let Some(body) = event.body.as_deref().filter(|body| !body.is_empty()) else {
        return Ok(RequestBody::Empty);
    };

    if !event.is_base64_encoded {
        return Ok(RequestBody::Text(body.to_string()));
    }

    let decoded = general_purpose::STANDARD.decode(body)?;
    if config.is_multipart(event.header(CONTENT_TYPE_KEY)) {
        Ok(RequestBody::Binary(Bytes::from(decoded)))
    } else {
        Ok(RequestBody::Text(String::from_utf8_lossy(&decoded).into_owned()))
    }
}

/// Builds the normalized HTTP request handed to the application.
///
/// The event's `requestContext` is attached as a request extension.
///
/// # Errors
///
/// Fails on any malformed input: missing host, invalid URL, header, method
/// or base64 body. Nothing is recovered.
pub fn build_request(
    event: &GatewayEvent,
    config: &BridgeConfig,
) -> Result<Request<RequestBody>, BridgeError> {
    let url = build_url(event)?;
    let headers = build_header_map(event.multi_value_headers.as_ref())?;
    let body = decode_body(event, config)?;

    debug!(
        url = %url,
        method = %event.http_method,
        binary = matches!(body, RequestBody::Binary(_)),
        "Built request from gateway event"
    );

    let mut request = Request::builder()
        .method(event.http_method.as_str())
        .uri(url.as_str())
        .extension(event.request_context.clone())
        .body(body)?;
    *request.headers_mut() = headers;

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_frames() {
        use http_body_util::BodyExt;

        let body = RequestBody::Text("hello".to_string());
        assert_eq!(body.size_hint().exact(), Some(5));

        let collected = tokio_test::block_on(body.collect()).unwrap().to_bytes();
        assert_eq!(collected, Bytes::from_static(b"hello"));
    }

    #[test]
    fn test_empty_body_ends_immediately() {
        let body = RequestBody::Empty;
        assert!(body.is_end_stream());
        assert_eq!(body.as_bytes(), b"");
        assert_eq!(body.as_text(), None);
    }
}
