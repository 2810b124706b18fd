//! AWS Lambda HTTP handler for installment pricing
//!
//! POST body: a pricing request, optionally with quote metadata and range:
//! `{"base_price": 1000, "table": "full", "has_down_payment": false,
//!   "metadata": {"customer_name": "Ana"}, "from": 2, "to": 12}`
//!
//! Set `QUOTE_CONFIG` to a JSON config path to override the defaults.

use chrono::Local;
use installment_calculator::{
    CalculatorConfig, InstallmentOption, InstallmentRange, PricingEngine, PricingRequest, Quote,
    QuoteMetadata,
};
use lambda_http::{run, service_fn, Body, Request, Response};
use lambda_runtime::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct QuoteEvent {
    #[serde(flatten)]
    request: PricingRequest,
    #[serde(default)]
    metadata: Option<QuoteMetadata>,
    #[serde(default)]
    from: Option<u32>,
    #[serde(default)]
    to: Option<u32>,
}

#[derive(Debug, Serialize)]
struct QuoteResponse {
    options: Vec<InstallmentOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    whatsapp_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    let json = serde_json::to_string(body)?;
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(json))?)
}

fn bad_request(message: String) -> Result<Response<Body>, Error> {
    log::warn!("Bad request: {}", message);
    json_response(400, &ErrorResponse { error: message })
}

async fn handler(
    engine: &PricingEngine,
    config: &CalculatorConfig,
    event: Request,
) -> Result<Response<Body>, Error> {
    let payload: QuoteEvent = match serde_json::from_slice(event.body().as_ref()) {
        Ok(payload) => payload,
        Err(e) => return bad_request(format!("invalid request body: {}", e)),
    };

    let options = match engine.price(&payload.request) {
        Ok(options) => options,
        Err(e) => return bad_request(e.to_string()),
    };

    let Some(mut metadata) = payload.metadata else {
        return json_response(200, &QuoteResponse { options, summary: None, whatsapp_url: None });
    };

    if metadata.quote_date.is_none() {
        metadata.quote_date = Some(Local::now().date_naive());
    }
    let range = match InstallmentRange::new(
        payload.from.unwrap_or(config.range_from),
        payload.to.unwrap_or(config.range_to),
    ) {
        Ok(range) => range,
        Err(e) => return bad_request(e.to_string()),
    };
    let quote = match Quote::assemble(metadata, &options, payload.request.has_down_payment, range) {
        Ok(quote) => quote.with_brand(config.brand.clone()),
        Err(e) => return bad_request(e.to_string()),
    };

    json_response(
        200,
        &QuoteResponse {
            summary: Some(quote.summary_text()),
            whatsapp_url: Some(quote.whatsapp_url()),
            options: quote.options,
        },
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config_path = std::env::var_os("QUOTE_CONFIG");
    let config = CalculatorConfig::load_or_default(config_path.as_deref().map(Path::new))?;
    let engine = config.engine()?;
    log::info!("Pricing engine ready (rounding: {})", engine.policy().rounding);

    let engine = &engine;
    let config = &config;
    run(service_fn(move |event: Request| async move {
        handler(engine, config, event).await
    }))
    .await
}
