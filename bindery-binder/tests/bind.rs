use bindery_binder::*;

fn greet() -> impl HandlerDyn + 'static {
    handler_fn(|(name,): (String,)| format!("Hello, {name}!"))
}

#[test]
fn greet_binds_text_to_text() {
    let descriptor = bind(greet(), "text", "text", None).unwrap();
    assert_eq!(descriptor.arity(), Arity::new(1, 1));
    assert_eq!(descriptor.inputs().len(), 1);
    assert_eq!(descriptor.inputs()[0].kind, FieldKind::Text);
    assert_eq!(descriptor.outputs()[0].kind, FieldKind::Text);
}

#[test]
fn greet_with_age_binds_a_sequence() {
    let handler = handler_fn(|(name, age): (String, f64)| {
        format!("Hello, {name}! You are {age} years old.")
    });
    let descriptor = bind(handler, ["text", "number"], "text", None).unwrap();
    let kinds: Vec<_> = descriptor.inputs().iter().map(|s| s.kind.clone()).collect();
    assert_eq!(kinds, [FieldKind::Text, FieldKind::Number]);
}

#[test]
fn analyze_text_binds_two_outputs() {
    let handler = handler_fn(|(text,): (String,)| {
        (
            format!("Word Count: {}", text.split_whitespace().count()),
            format!("Character Count: {}", text.chars().count()),
        )
    });
    let descriptor = bind(handler, "text", vec!["text", "text"], None).unwrap();
    assert_eq!(descriptor.outputs().len(), 2);
}

#[test]
fn too_few_inputs_is_arity_mismatch() {
    let handler = handler_fn(|(a, b): (f64, f64)| a + b);
    let err = bind(handler, "number", "number", None).unwrap_err();
    assert_eq!(
        err,
        BindError::ArityMismatch {
            side: FieldSide::Inputs,
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn too_many_outputs_is_arity_mismatch() {
    let err = bind(greet(), "text", ["text", "text"], None).unwrap_err();
    assert!(matches!(
        err,
        BindError::ArityMismatch {
            side: FieldSide::Outputs,
            expected: 1,
            actual: 2
        }
    ));
}

#[test]
fn zero_input_handler_binds_empty_inputs() {
    let handler = handler_fn(|(): ()| "ready".to_string());
    let descriptor = bind(handler, (), "text", None).unwrap();
    assert!(descriptor.inputs().is_empty());
    assert_eq!(descriptor.arity(), Arity::new(0, 1));
}

#[test]
fn unknown_component_name_is_rejected() {
    let err = bind(greet(), "hologram", "text", None).unwrap_err();
    assert_eq!(err, BindError::UnknownComponentKind("hologram".into()));
}

#[test]
fn inverted_slider_is_rejected_at_bind_time() {
    let slider = FieldSpec::from(FieldKind::Slider {
        minimum: 10.0,
        maximum: 0.0,
    });
    let handler = handler_fn(|(n,): (f64,)| n);
    let err = bind(handler, slider, "number", None).unwrap_err();
    assert!(matches!(err, BindError::InvalidFieldOption { kind: "slider", .. }));
}

#[test]
fn symbolic_dropdown_needs_a_configured_default() {
    let handler = handler_fn(|(choice,): (String,)| format!("You selected: {choice}"));
    let err = bind(handler.clone(), "dropdown", "text", None).unwrap_err();
    assert!(matches!(err, BindError::InvalidFieldOption { kind: "dropdown", .. }));

    let mut registry = ComponentRegistry::new();
    registry
        .set_default(FieldSpec::dropdown(["Option A", "Option B", "Option C"]).unwrap())
        .unwrap();
    let descriptor = Binder::with_registry(registry)
        .bind(handler, "dropdown", "text", None)
        .unwrap();
    let FieldKind::Dropdown { choices } = &descriptor.inputs()[0].kind else {
        panic!("expected dropdown");
    };
    assert_eq!(choices.len(), 3);
}

#[test]
fn spec_inputs_are_kept_verbatim() {
    let spec = FieldSpec::text()
        .with_label("Enter Your Name")
        .with_placeholder("Type here...")
        .with_lines(2);
    let descriptor = bind(greet(), spec.clone(), "text", None).unwrap();
    assert_eq!(descriptor.inputs(), [spec]);
}

#[test]
fn mixed_components_resolve_in_order() {
    let handler = dyn_handler_fn(Arity::new(3, 1), |_| Ok(vec![FieldValue::Bool(true)]));
    let inputs: Vec<ComponentRef> = vec![
        "slider".into(),
        ComponentKind::Checkbox.into(),
        FieldSpec::image().into(),
    ];
    let descriptor = bind(handler, inputs, ComponentKind::Checkbox, None).unwrap();
    let kinds: Vec<_> = descriptor
        .inputs()
        .iter()
        .map(|spec| ComponentKind::of(&spec.kind))
        .collect();
    assert_eq!(
        kinds,
        [ComponentKind::Slider, ComponentKind::Checkbox, ComponentKind::Image]
    );
}

#[test]
fn binding_twice_yields_equal_descriptors() {
    let first = bind(greet(), "text", "text", Metadata::titled("Greeter")).unwrap();
    let second = bind(greet(), "text", "text", Metadata::titled("Greeter")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn metadata_is_carried_into_config() {
    let metadata = Metadata::titled("Greeter").with_description("Say hello");
    let descriptor = bind(greet(), "text", "text", metadata).unwrap();
    let config = serde_json::to_value(descriptor.config()).unwrap();
    assert_eq!(config["title"], "Greeter");
    assert_eq!(config["description"], "Say hello");
    assert_eq!(config["inputs"][0]["type"], "text");
    assert!(config.get("article").is_none());
}

#[test]
fn single_input_equals_one_element_sequence() {
    let single = bind(greet(), "text", "text", None).unwrap();
    let sequence = bind(greet(), vec!["text"], vec![FieldSpec::text().with_lines(1)], None).unwrap();
    assert_eq!(single, sequence);
}
