//! AWS Lambda handler for the WACC calculator
//!
//! Serves the same routes as the HTTP server through a Lambda Function URL:
//! `GET /api/wacc/` returns the greeting, `POST /api/wacc/payload` runs the
//! calculation. CORS and security headers follow the same environment
//! configuration as the server.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use wacc_calculator::api::{lambda, AdapterConfig};

/// Lambda handler function
async fn handler(config: &AdapterConfig, event: Request) -> Result<Response<Body>, Error> {
    lambda::route(config, &event)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = AdapterConfig::from_env()?;
    let config = &config;
    run(service_fn(move |event: Request| async move { handler(config, event).await })).await
}
