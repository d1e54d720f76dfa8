// Style preset resolution and album template application

use pis::style::*;

#[test]
fn test_known_preset_resolves_to_filter() {
    let filter = resolve_filter(Some(&StylePresetConfig::new("japanese-fresh")));
    assert!(filter.contains("brightness"));
    assert_ne!(filter, "none");
}

#[test]
fn test_unknown_or_missing_preset_is_neutral() {
    assert_eq!(resolve_filter(None), "none");
    assert_eq!(resolve_filter(Some(&StylePresetConfig::new("bogus"))), "none");
    assert_eq!(resolve_filter(Some(&StylePresetConfig::new("none"))), "none");
    assert_eq!(resolve_filter(Some(&StylePresetConfig::default())), "none");
}

#[test]
fn test_every_builtin_preset_has_a_filter() {
    let registry = PresetRegistry::builtin();
    assert!(!registry.is_empty());
    for preset in registry.presets() {
        assert!(preset.validate().is_ok(), "{}", preset.id);
        assert_ne!(
            registry.resolve(Some(&StylePresetConfig::new(preset.id.clone()))),
            "none"
        );
    }
}

#[test]
fn test_preset_config_round_trips_extra_fields() {
    let json = r#"{"preset":"film-portrait","intensity":0.7}"#;
    let config: StylePresetConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.preset_id(), Some("film-portrait"));
    assert_eq!(
        serde_json::to_value(&config).unwrap(),
        serde_json::from_str::<serde_json::Value>(json).unwrap()
    );
}

#[test]
fn test_template_apply_then_revert_restores_page() {
    let mut doc = StyleDocument::new();
    doc.write(&StyleSlot::BodyBackground, Some("#123456"));
    let before = doc.clone();

    let patch = TemplatePatch::for_template_id(Some("minimal-light")).unwrap();
    let applied = patch.apply(&mut doc);
    assert_eq!(doc.data("template"), Some("minimal-light"));
    assert_eq!(doc.body_background(), Some("#ffffff"));
    assert!(doc.has_class("light"));
    assert!(doc.property("--template-bg").is_some());

    applied.revert(&mut doc);
    assert_eq!(doc, before);
}

#[test]
fn test_unknown_template_changes_nothing() {
    assert!(TemplatePatch::for_template_id(Some("missing")).is_none());
    assert!(TemplatePatch::for_template_id(None).is_none());
}
