use bindery_registry::*;
use bindery_types::{BindError, FieldKind, FieldSpec, FieldValue};

#[test]
fn every_canonical_name_resolves_to_its_kind() {
    let registry = ComponentRegistry::new();
    for kind in ComponentKind::ALL {
        let spec = registry.resolve(kind.name()).unwrap();
        assert_eq!(ComponentKind::of(&spec.kind), kind, "name {}", kind.name());
        assert_eq!(spec.kind.name(), kind.name());
    }
}

#[test]
fn names_are_case_insensitive_and_trimmed() {
    let registry = ComponentRegistry::new();
    assert_eq!(registry.resolve(" Text ").unwrap(), registry.resolve("text").unwrap());
    assert_eq!("CHECKBOX".parse::<ComponentKind>().unwrap(), ComponentKind::Checkbox);
}

#[test]
fn aliases_resolve() {
    assert_eq!("textbox".parse::<ComponentKind>().unwrap(), ComponentKind::Text);
    assert_eq!("data_frame".parse::<ComponentKind>().unwrap(), ComponentKind::DataFrame);
}

#[test]
fn unknown_name_is_rejected() {
    let err = ComponentRegistry::new().resolve("hologram").unwrap_err();
    assert_eq!(err, BindError::UnknownComponentKind("hologram".into()));
}

#[test]
fn builtin_defaults() {
    let registry = ComponentRegistry::new();

    let slider = registry.resolve("slider").unwrap();
    assert_eq!(
        slider.kind,
        FieldKind::Slider {
            minimum: 0.0,
            maximum: 100.0
        }
    );
    assert_eq!(slider.options.step, Some(1.0));
    assert!(slider.validate().is_ok());

    let checkbox = registry.resolve("checkbox").unwrap();
    assert_eq!(checkbox.options.default, Some(FieldValue::Bool(false)));

    let text = registry.resolve("text").unwrap();
    assert_eq!(text.options.lines, Some(1));
}

#[test]
fn symbolic_dropdown_is_unconfigured() {
    let spec = ComponentRegistry::new().resolve("dropdown").unwrap();
    assert!(matches!(
        spec.validate(),
        Err(BindError::InvalidFieldOption { kind: "dropdown", .. })
    ));
}

#[test]
fn every_builtin_default_except_dropdown_validates() {
    for kind in ComponentKind::ALL {
        let valid = kind.builtin_default().validate().is_ok();
        assert_eq!(valid, kind != ComponentKind::Dropdown, "kind {kind}");
    }
}

#[test]
fn spec_references_pass_through_unchanged() {
    let registry = ComponentRegistry::new();
    let spec = FieldSpec::slider(-5.0, 5.0).unwrap().with_label("Offset");
    let resolved = registry.resolve_ref(ComponentRef::from(spec.clone())).unwrap();
    assert_eq!(resolved, spec);
}

#[test]
fn kind_references_use_current_default() {
    let mut registry = ComponentRegistry::new();
    registry
        .set_default(FieldSpec::dropdown(["Option A", "Option B"]).unwrap())
        .unwrap();
    let resolved = registry.resolve_ref(ComponentKind::Dropdown.into()).unwrap();
    assert!(resolved.validate().is_ok());
    assert_eq!(registry.resolve("dropdown").unwrap(), resolved);
}

#[test]
fn set_default_validates_first() {
    let mut registry = ComponentRegistry::new();
    let bad = FieldSpec::from(FieldKind::Slider {
        minimum: 10.0,
        maximum: 0.0,
    });
    assert!(registry.set_default(bad).is_err());
    assert_eq!(
        registry.default_for(ComponentKind::Slider),
        ComponentKind::Slider.builtin_default()
    );
}

#[test]
fn names_lists_the_closed_set_in_order() {
    let names: Vec<_> = ComponentRegistry::new().names().collect();
    assert_eq!(
        names,
        [
            "text", "number", "slider", "checkbox", "dropdown", "image", "audio", "file",
            "dataframe", "json", "label"
        ]
    );
}

#[test]
fn display_uses_canonical_name() {
    assert_eq!(ComponentKind::DataFrame.to_string(), "dataframe");
}
