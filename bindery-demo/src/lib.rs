#![deny(missing_docs)]
//! Demo interfaces behind the `bindery` command-line tool.
//!
//! Each entry in [`CATALOG`] binds a small handler to its field specs. The
//! functions here describe and invoke them by name and render results as
//! JSON for the CLI.

pub mod demos;

pub use demos::{CATALOG, Demo, find};

use bindery_binder::{
    BindError, BinderConfig, ConfigError, InvocationContext, InvocationRequest, InvokeError,
    ServiceDescriptor,
};
use serde_json::{Value, json};
use thiserror::Error;

/// Errors surfaced by the CLI.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DemoError {
    /// The config file could not be loaded or applied.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// No demo has the requested name.
    #[error("unknown demo: {0} (run `bindery list`)")]
    UnknownDemo(String),

    /// The demo failed to bind.
    #[error("bind error: {0}")]
    Bind(#[from] BindError),

    /// The request failed.
    #[error("invoke error: {0}")]
    Invoke(#[from] InvokeError),

    /// Inputs or outputs were not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Every demo as `{"name", "summary"}` objects.
pub fn list() -> Value {
    CATALOG
        .iter()
        .map(|demo| json!({"name": demo.name, "summary": demo.summary}))
        .collect()
}

/// Bind the named demo against the configured registry.
pub fn bind_demo(name: &str, config: &BinderConfig) -> Result<ServiceDescriptor, DemoError> {
    let demo = find(name).ok_or_else(|| DemoError::UnknownDemo(name.to_string()))?;
    Ok(demo.bind(&config.binder()?)?)
}

/// The named demo's interface config as JSON.
pub fn describe(name: &str, config: &BinderConfig) -> Result<Value, DemoError> {
    let descriptor = bind_demo(name, config)?;
    Ok(serde_json::to_value(descriptor.config())?)
}

/// Parse CLI inputs: a JSON array holds one value per input; any other
/// JSON value is the single input.
pub fn parse_inputs(raw: &str) -> Result<Vec<Value>, DemoError> {
    Ok(match serde_json::from_str(raw)? {
        Value::Array(values) => values,
        single => vec![single],
    })
}

/// Invoke the named demo once, returning `{"data": [...]}`.
pub async fn invoke(name: &str, inputs: &str, config: &BinderConfig) -> Result<Value, DemoError> {
    let pipeline = config.pipeline(bind_demo(name, config)?);
    let request = InvocationRequest::new(name, parse_inputs(inputs)?);
    let ctx = InvocationContext::new("cli").with_credentials(config.credentials());
    let outputs = pipeline.handle(&request, &ctx).await?;
    let data: Vec<Value> = outputs.iter().map(|value| value.to_json()).collect();
    Ok(json!({ "data": data }))
}
