//! Bridges API Gateway proxy events and a plain HTTP request/response model.
//!
//! A [`handler::Bridge`] rebuilds an `http::Request` from each
//! [`models::GatewayEvent`], passes it to an embedded
//! [`handler::ApplicationHandler`], and encodes the `http::Response` it
//! returns as a [`models::GatewayResult`].

pub mod config;
pub mod handler;
pub mod headers;
pub mod models;
pub mod query;
pub mod request;
pub mod response;

pub use config::{BridgeConfig, MatchRule};
pub use handler::{ApplicationHandler, Bridge, InvocationObserver, TracingObserver, run};
pub use models::{BoxError, BridgeError, GatewayEvent, GatewayResult, MultiValueMap};
pub use request::RequestBody;
pub use response::{ResponseBody, empty_body, full_body};
