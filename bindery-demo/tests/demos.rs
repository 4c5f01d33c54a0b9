use std::io::Write;

use bindery_binder::{BinderConfig, FieldKind, InvokeError};
use bindery_demo::*;
use serde_json::json;

fn quiet() -> BinderConfig {
    BinderConfig {
        log_requests: false,
        ..BinderConfig::default()
    }
}

#[test]
fn every_demo_binds() {
    let config = BinderConfig::default();
    for demo in CATALOG {
        assert!(bind_demo(demo.name, &config).is_ok(), "demo {}", demo.name);
    }
}

#[test]
fn list_names_every_demo() {
    let listed = list();
    let names: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), CATALOG.len());
    assert!(names.contains(&"greet_with_age".to_string()));
}

#[test]
fn unknown_demo_is_reported() {
    let err = describe("nope", &BinderConfig::default()).unwrap_err();
    assert!(matches!(err, DemoError::UnknownDemo(name) if name == "nope"));
}

#[test]
fn describe_add_ten_shows_slider() {
    let config = describe("add_ten", &BinderConfig::default()).unwrap();
    assert_eq!(config["title"], "Slider Example");
    assert_eq!(config["inputs"][0]["type"], "slider");
    assert_eq!(config["inputs"][0]["maximum"], 100.0);
    assert_eq!(config["inputs"][0]["options"]["label"], "Select a value");
    assert_eq!(config["outputs"][0]["options"]["label"], "Value + 10");
}

#[test]
fn greet_custom_keeps_text_options() {
    let descriptor = bind_demo("greet_custom", &BinderConfig::default()).unwrap();
    let input = &descriptor.inputs()[0];
    assert_eq!(input.kind, FieldKind::Text);
    assert_eq!(input.options.placeholder.as_deref(), Some("Type here..."));
    assert_eq!(input.options.lines, Some(2));
}

#[test]
fn single_json_value_is_one_input() {
    assert_eq!(parse_inputs("\"Ada\"").unwrap(), vec![json!("Ada")]);
    assert_eq!(parse_inputs("[1, true]").unwrap(), vec![json!(1), json!(true)]);
    assert!(matches!(parse_inputs("[1,"), Err(DemoError::Json(_))));
}

#[tokio::test]
async fn invoke_greet_with_age() {
    let out = invoke("greet_with_age", r#"["Ada", 36]"#, &quiet()).await.unwrap();
    assert_eq!(out, json!({"data": ["Hello, Ada! You are 36 years old."]}));
}

#[tokio::test]
async fn invoke_analyze_text() {
    let out = invoke("analyze_text", r#""hello big world""#, &quiet()).await.unwrap();
    assert_eq!(
        out,
        json!({"data": ["Word Count: 3", "Character Count: 15"]})
    );
}

#[tokio::test]
async fn invoke_add_ten_and_bounds() {
    let out = invoke("add_ten", "[32]", &quiet()).await.unwrap();
    assert_eq!(out, json!({"data": [42.0]}));

    let err = invoke("add_ten", "[101]", &quiet()).await.unwrap_err();
    assert!(matches!(err, DemoError::Invoke(InvokeError::InvalidInput { .. })));
}

#[tokio::test]
async fn invoke_check_status_and_show_choice() {
    let out = invoke("check_status", "[true]", &quiet()).await.unwrap();
    assert_eq!(out, json!({"data": ["Checkbox is checked"]}));

    let out = invoke("show_choice", r#"["Option C"]"#, &quiet()).await.unwrap();
    assert_eq!(out, json!({"data": ["You selected: Option C"]}));
}

#[tokio::test]
async fn invoke_process_image_passes_reference_through() {
    let out = invoke("process_image", r#"["https://example.com/cat.jpg"]"#, &quiet())
        .await
        .unwrap();
    assert_eq!(
        out,
        json!({"data": [{"type": "url", "url": "https://example.com/cat.jpg"}]})
    );
}

#[tokio::test]
async fn config_file_caps_output() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"max_output_chars": 5, "log_requests": false}"#)
        .unwrap();
    let config = BinderConfig::from_path(file.path()).unwrap();
    let out = invoke("echo_text", r#"["abcdefgh"]"#, &config).await.unwrap();
    assert_eq!(
        out,
        json!({"data": ["abcde... [truncated, 8 chars total]"]})
    );
}
