use async_trait::async_trait;
use http::{Request, Response};
use lambda_runtime::tracing::{debug, error, info};
use lambda_runtime::{Diagnostic, Error, LambdaEvent, service_fn};
use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::models::{BoxError, BridgeError, GatewayEvent, GatewayResult};
use crate::request::{RequestBody, build_request};
use crate::response::{ResponseBody, encode_response};

/// The embedded application the bridge forwards requests to.
///
/// The bridge never inspects `Context`; it is produced by the context loader
/// registered on [`Bridge`] and handed through untouched, as is `mode`.
#[async_trait]
pub trait ApplicationHandler: Send + Sync {
    type Context: Send + 'static;

    /// Handles one request.
    ///
    /// # Errors
    ///
    /// Any error is propagated to the Lambda runtime as a failed invocation.
    async fn handle(
        &self,
        request: Request<RequestBody>,
        context: Option<Self::Context>,
        mode: &str,
    ) -> Result<Response<ResponseBody>, BoxError>;
}

/// Hook for inspecting each stage of an invocation.
///
/// All methods default to doing nothing.
pub trait InvocationObserver: Send + Sync {
    fn on_event(&self, _event: &GatewayEvent) {}
    fn on_request(&self, _request: &Request<RequestBody>) {}
    fn on_result(&self, _result: &GatewayResult) {}
}

/// Logs the raw event, built request and result at `debug` level.
/// Only visible when `RUST_LOG=debug/trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl InvocationObserver for TracingObserver {
    fn on_event(&self, event: &GatewayEvent) {
        debug!(event = ?event, "Gateway event");
    }

    fn on_request(&self, request: &Request<RequestBody>) {
        debug!(request = ?request, "Built request");
    }

    fn on_result(&self, result: &GatewayResult) {
        debug!(result = ?result, "Gateway result");
    }
}

type ContextLoader<C> = Box<dyn Fn(&GatewayEvent) -> C + Send + Sync>;

/// Translates gateway events into requests for an [`ApplicationHandler`] and
/// its responses back into gateway results.
pub struct Bridge<H: ApplicationHandler> {
    handler: H,
    config: BridgeConfig,
    load_context: Option<ContextLoader<H::Context>>,
    observer: Option<Arc<dyn InvocationObserver>>,
}

impl<H: ApplicationHandler> Bridge<H> {
    #[must_use]
    pub const fn new(handler: H, config: BridgeConfig) -> Self {
        Self {
            handler,
            config,
            load_context: None,
            observer: None,
        }
    }

    /// Registers the function deriving the application context from the raw
    /// event. Called once per invocation.
    #[must_use]
    pub fn with_context_loader<F>(mut self, load_context: F) -> Self
    where
        F: Fn(&GatewayEvent) -> H::Context + Send + Sync + 'static,
    {
        self.load_context = Some(Box::new(load_context));
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl InvocationObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    #[must_use]
    pub const fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Runs one invocation: build the request, load the context, call the
    /// application and encode its response.
    ///
    /// # Errors
    ///
    /// Returns a `BridgeError` for malformed events, application failures and
    /// body read failures. No retry is attempted.
    pub async fn invoke(&self, event: GatewayEvent) -> Result<GatewayResult, BridgeError> {
        if let Some(observer) = &self.observer {
            observer.on_event(&event);
        }

        let request = build_request(&event, &self.config)?;
        if let Some(observer) = &self.observer {
            observer.on_request(&request);
        }

        let context = self.load_context.as_ref().map(|load| load(&event));

        let response = self
            .handler
            .handle(request, context, &self.config.mode)
            .await
            .map_err(|e| {
                error!(error = %e, "Application handler failed");
                BridgeError::Handler(e)
            })?;

        let result = encode_response(response, &self.config).await?;
        if let Some(observer) = &self.observer {
            observer.on_result(&result);
        }

        Ok(result)
    }

    /// Lambda event handler wrapping [`Bridge::invoke`].
    ///
    /// # Errors
    ///
    /// Returns a `Diagnostic` whose `error_type` names the failure:
    ///
    /// - `MissingHost`, `InvalidUrl`, `InvalidHeader`, `InvalidBase64`,
    ///   `InvalidRequest`: the event could not be turned into a request
    /// - `HandlerError`: the application handler failed
    /// - `BodyError`: the response body could not be read
    pub async fn function_handler(
        &self,
        event: LambdaEvent<GatewayEvent>,
    ) -> Result<GatewayResult, Diagnostic> {
        let (event, context) = event.into_parts();

        info!(
            request_id = %context.request_id,
            method = %event.http_method,
            path = %event.path,
            "Invoking application"
        );

        self.invoke(event).await.map_err(|e| {
            error!(error = %e.chain_message(), error_type = e.error_type(), "Invocation failed");
            Diagnostic::from(e)
        })
    }
}

/// Starts the Lambda runtime loop, serving every invocation through `bridge`.
///
/// # Errors
///
/// Returns an error if the runtime fails to start or loses its connection to
/// the Lambda Runtime API.
pub async fn run<H>(bridge: Bridge<H>) -> Result<(), Error>
where
    H: ApplicationHandler + 'static,
{
    let bridge = Arc::new(bridge);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<GatewayEvent>| {
        let bridge = Arc::clone(&bridge);
        async move { bridge.function_handler(event).await }
    }))
    .await
}
