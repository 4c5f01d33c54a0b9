use std::time::Duration;

use bindery_binder::*;
use serde_json::json;

#[tokio::test]
async fn greet_round_trip() {
    let greet = handler_fn(|(name,): (String,)| format!("Hello, {name}!"));
    let descriptor = bind(greet, "text", "text", None).unwrap();
    let ctx = InvocationContext::new("session-1");
    let outputs = descriptor.invoke(vec![json!("Ada")], &ctx).await.unwrap();
    assert_eq!(outputs, vec![FieldValue::Text("Hello, Ada!".into())]);
}

#[tokio::test]
async fn numeric_strings_are_coerced() {
    let add_ten = handler_fn(|(value,): (f64,)| value + 10.0);
    let descriptor = bind(add_ten, "slider", "number", None).unwrap();
    let ctx = InvocationContext::default();
    let outputs = descriptor.invoke(vec![json!("32")], &ctx).await.unwrap();
    assert_eq!(outputs, vec![FieldValue::Number(42.0)]);
}

#[tokio::test]
async fn slider_bounds_are_enforced() {
    let add_ten = handler_fn(|(value,): (f64,)| value + 10.0);
    let descriptor = bind(add_ten, "slider", "number", None).unwrap();
    let ctx = InvocationContext::default();
    let err = descriptor.invoke(vec![json!(150)], &ctx).await.unwrap_err();
    match err {
        InvokeError::InvalidInput { index, source } => {
            assert_eq!(index, 0);
            assert_eq!(source.kind, "slider");
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[tokio::test]
async fn dropdown_choices_are_enforced() {
    let show = handler_fn(|(choice,): (String,)| format!("You selected: {choice}"));
    let dropdown = FieldSpec::dropdown(["Option A", "Option B", "Option C"]).unwrap();
    let descriptor = bind(show, dropdown, "text", None).unwrap();
    let ctx = InvocationContext::default();

    let ok = descriptor.invoke(vec![json!("Option B")], &ctx).await.unwrap();
    assert_eq!(ok, vec![FieldValue::Text("You selected: Option B".into())]);

    let err = descriptor.invoke(vec![json!("Option D")], &ctx).await.unwrap_err();
    assert!(matches!(err, InvokeError::InvalidInput { index: 0, .. }));
}

#[tokio::test]
async fn null_input_takes_the_default() {
    let status = handler_fn(|(checked,): (bool,)| {
        if checked {
            "Checkbox is checked".to_string()
        } else {
            "Checkbox is unchecked".to_string()
        }
    });
    let descriptor = bind(status, "checkbox", "text", None).unwrap();
    let ctx = InvocationContext::default();
    let outputs = descriptor.invoke(vec![json!(null)], &ctx).await.unwrap();
    assert_eq!(outputs, vec![FieldValue::Text("Checkbox is unchecked".into())]);
}

#[tokio::test]
async fn wrong_input_count_is_reported() {
    let greet = handler_fn(|(name,): (String,)| format!("Hello, {name}!"));
    let descriptor = bind(greet, "text", "text", None).unwrap();
    let ctx = InvocationContext::default();
    let err = descriptor
        .invoke(vec![json!("a"), json!("b")], &ctx)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InvokeError::InputCount {
            expected: 1,
            actual: 2
        }
    ));
}

#[tokio::test]
async fn handler_failure_is_reported_not_masked() {
    let parse = try_handler_fn(|(text,): (String,)| {
        text.parse::<f64>().map_err(HandlerError::failed)
    });
    let descriptor = bind(parse, "text", "number", None).unwrap();
    let ctx = InvocationContext::default();
    let err = descriptor.invoke(vec![json!("abc")], &ctx).await.unwrap_err();
    assert!(matches!(err, InvokeError::Handler(HandlerError::Failed(_))));
}

#[tokio::test]
async fn dyn_handler_returning_too_few_values_is_output_count() {
    let short = dyn_handler_fn(Arity::new(1, 2), |values| Ok(values));
    let descriptor = bind(short, "text", ["text", "text"], None).unwrap();
    let ctx = InvocationContext::default();
    let err = descriptor.invoke(vec![json!("x")], &ctx).await.unwrap_err();
    assert!(matches!(
        err,
        InvokeError::OutputCount {
            expected: 2,
            actual: 1
        }
    ));
}

#[tokio::test]
async fn output_not_fitting_its_slot_is_invalid_output() {
    let wrong = dyn_handler_fn(Arity::new(0, 1), |_| Ok(vec![FieldValue::Text("20".into())]));
    let descriptor = bind(wrong, (), "number", None).unwrap();
    let ctx = InvocationContext::default();
    let err = descriptor.invoke(vec![], &ctx).await.unwrap_err();
    assert!(matches!(err, InvokeError::InvalidOutput { index: 0, .. }));
}

#[tokio::test]
async fn text_slot_stringifies_numeric_output() {
    let double = handler_fn(|(n,): (f64,)| n * 2.0);
    let descriptor = bind(double, "number", "text", None).unwrap();
    let ctx = InvocationContext::default();
    let outputs = descriptor.invoke(vec![json!(10)], &ctx).await.unwrap();
    assert_eq!(outputs, vec![FieldValue::Text("20".into())]);
}

struct Sleepy;

impl Handler for Sleepy {
    type Args = ();
    type Output = String;
    type Error = HandlerError;

    async fn call(&self, (): (), _ctx: &InvocationContext) -> Result<String, HandlerError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("awake".into())
    }
}

#[tokio::test]
async fn cancellation_abandons_the_handler() {
    let descriptor = bind(Sleepy, (), "text", None).unwrap();
    let ctx = InvocationContext::default();
    let token = ctx.cancellation_token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();
    });
    let err = descriptor.invoke(vec![], &ctx).await.unwrap_err();
    assert!(matches!(err, InvokeError::Cancelled));
}

#[tokio::test]
async fn pre_cancelled_context_never_runs_the_handler() {
    let descriptor = bind(Sleepy, (), "text", None).unwrap();
    let ctx = InvocationContext::default();
    ctx.cancellation_token.cancel();
    let err = descriptor.invoke(vec![], &ctx).await.unwrap_err();
    assert!(matches!(err, InvokeError::Cancelled));
}

#[tokio::test]
async fn handler_sees_credentials_from_context() {
    struct WhoAmI;

    impl Handler for WhoAmI {
        type Args = ();
        type Output = String;
        type Error = HandlerError;

        async fn call(&self, (): (), ctx: &InvocationContext) -> Result<String, HandlerError> {
            ctx.credentials
                .as_ref()
                .map(|c| c.endpoint().to_string())
                .ok_or_else(|| HandlerError::failed("no credentials"))
        }
    }

    let descriptor = bind(WhoAmI, (), "text", None).unwrap();
    let ctx = InvocationContext::new("s").with_credentials(Some(HubCredentials::new(
        "hf_x",
        "https://huggingface.co",
    )));
    let outputs = descriptor.invoke(vec![], &ctx).await.unwrap();
    assert_eq!(outputs, vec![FieldValue::Text("https://huggingface.co".into())]);

    let err = descriptor
        .invoke(vec![], &InvocationContext::default())
        .await
        .unwrap_err();
    assert!(matches!(err, InvokeError::Handler(_)));
}
