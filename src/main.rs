use anyhow::Context as _;
use apigw_http_bridge::{
    ApplicationHandler, BoxError, Bridge, BridgeConfig, GatewayEvent, RequestBody, ResponseBody,
    TracingObserver, full_body, run,
};
use async_trait::async_trait;
use http::{Request, Response, StatusCode, header::CONTENT_TYPE};
use lambda_runtime::Error;
use serde::Serialize;
use serde_json::{Value, json};

/// Environment variable selecting the mode handed to the application
const MODE_ENV: &str = "APP_MODE";

#[derive(Debug, Clone, Serialize)]
struct EchoContext {
    stage: Option<String>,
    source_ip: Option<String>,
}

fn load_context(event: &GatewayEvent) -> EchoContext {
    EchoContext {
        stage: event.request_context.stage.clone(),
        source_ip: event
            .request_context
            .identity
            .as_ref()
            .and_then(|identity| identity.source_ip.clone()),
    }
}

/// Replies with a JSON description of the request it received.
struct EchoApp;

#[async_trait]
impl ApplicationHandler for EchoApp {
    type Context = EchoContext;

    async fn handle(
        &self,
        request: Request<RequestBody>,
        context: Option<EchoContext>,
        mode: &str,
    ) -> Result<Response<ResponseBody>, BoxError> {
        let headers: Value = request
            .headers()
            .keys()
            .map(|name| {
                let values: Vec<String> = request
                    .headers()
                    .get_all(name)
                    .iter()
                    .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                    .collect();
                (name.to_string(), json!(values))
            })
            .collect::<serde_json::Map<String, Value>>()
            .into();

        let body = match request.body() {
            RequestBody::Empty => Value::Null,
            RequestBody::Text(text) => json!(text),
            RequestBody::Binary(bytes) => json!({ "binaryLength": bytes.len() }),
        };

        let payload = json!({
            "method": request.method().as_str(),
            "url": request.uri().to_string(),
            "headers": headers,
            "body": body,
            "mode": mode,
            "context": context,
        });

        let bytes = serde_json::to_vec(&payload).context("Failed to serialize echo payload")?;

        Ok(Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "application/json")
            .body(full_body(bytes))?)
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    let mode = std::env::var(MODE_ENV).unwrap_or_else(|_| "production".to_string());

    let bridge = Bridge::new(EchoApp, BridgeConfig::new(mode))
        .with_context_loader(load_context)
        .with_observer(TracingObserver);

    run(bridge).await
}
