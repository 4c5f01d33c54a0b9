//! Bind a greeting handler, print its interface config, and invoke it once.
//!
//! Run with `cargo run -p bindery-binder --example greet -- Ada`.

use bindery_binder::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let name = std::env::args().nth(1).unwrap_or_else(|| "World".to_string());

    let greet = handler_fn(|(name,): (String,)| format!("Hello, {name}!"));
    let descriptor = bind(greet, "text", "text", Metadata::titled("Greeter"))?;
    println!("{}", serde_json::to_string_pretty(&descriptor.config())?);

    let pipeline = Pipeline::new(descriptor).with_middleware(RequestLogger::new());
    let request = InvocationRequest::new("demo", vec![serde_json::Value::String(name)]);
    let outputs = pipeline
        .handle(&request, &InvocationContext::new("greet-demo"))
        .await?;
    for output in outputs {
        println!("{}", output.to_json());
    }
    Ok(())
}
