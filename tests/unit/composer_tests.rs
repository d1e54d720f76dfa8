// Watermark composer and editor scenarios

use pis::config::EditorConfig;
use pis::watermark::*;

fn settings() -> ComposerSettings {
    ComposerSettings::from(&EditorConfig {
        capacity_message: "You can add at most 6 watermarks".to_string(),
        default_margin: 5,
        photographer_name: Some("Test Photographer".to_string()),
    })
}

fn single() -> Vec<WatermarkItem> {
    vec![WatermarkItem::text("watermark-1", "© Studio")]
}

#[test]
fn test_fill_to_capacity_then_advisory_once() {
    let mut editor = WatermarkEditor::with_parts(
        single(),
        SequentialIds::starting_after(&single()),
        Vec::<Advisory>::new(),
        settings(),
    );

    for _ in 0..5 {
        assert!(editor.add().is_some());
    }
    assert_eq!(editor.watermarks().len(), 6);
    assert!(!editor.can_add());
    assert!(editor.sink().is_empty());

    let before = editor.watermarks().to_vec();
    assert_eq!(editor.add(), None);
    assert_eq!(editor.watermarks(), before.as_slice());
    assert_eq!(editor.sink().len(), 1);
    assert_eq!(editor.sink()[0].kind, AdvisoryKind::CapacityReached);
    assert_eq!(editor.sink()[0].message, "You can add at most 6 watermarks");
}

#[test]
fn test_added_entries_use_photographer_defaults() {
    let mut editor = WatermarkEditor::with_parts(
        single(),
        SequentialIds::starting_after(&single()),
        Vec::<Advisory>::new(),
        settings(),
    );
    let id = editor.add().unwrap();

    let added = editor.watermarks().last().unwrap();
    assert_eq!(added.id, id);
    assert_eq!(added.kind, WatermarkKind::Text);
    assert_eq!(added.text.as_deref(), Some("© Test Photographer"));
    assert_eq!(added.opacity, 0.5);
    assert_eq!(added.position, WatermarkPosition::BottomRight);
    assert_eq!(added.margin, Some(5));
    assert!(added.enabled);
}

#[test]
fn test_ids_stay_unique_across_add_remove_cycles() {
    let mut editor = WatermarkEditor::with_parts(
        single(),
        SequentialIds::starting_after(&single()),
        Vec::<Advisory>::new(),
        settings(),
    );
    let a = editor.add().unwrap();
    let b = editor.add().unwrap();
    assert!(editor.remove(&a));
    let c = editor.add().unwrap();

    let ids: Vec<&str> = editor.watermarks().iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["watermark-1", b.as_str(), c.as_str()]);
    assert!(validate_list(editor.watermarks()).is_ok());
}

#[test]
fn test_last_entry_cannot_be_removed() {
    let mut editor = WatermarkEditor::new(single(), settings());
    assert!(!editor.can_remove());
    assert!(!editor.remove("watermark-1"));
    assert_eq!(editor.watermarks().len(), 1);
}

#[test]
fn test_remove_middle_keeps_order() {
    let list = vec![
        WatermarkItem::text("a", "A"),
        WatermarkItem::text("b", "B"),
        WatermarkItem::text("c", "C"),
    ];
    let next = remove(&list, "b");
    let ids: Vec<&str> = next.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(list.len(), 3);
}

#[test]
fn test_update_only_touches_target() {
    let list = vec![
        WatermarkItem::text("a", "A"),
        WatermarkItem::text("b", "B"),
    ];
    let patch = WatermarkPatch::new()
        .opacity(0.8)
        .position(WatermarkPosition::TopLeft);
    let next = update(&list, "b", &patch);

    assert_eq!(next[0], list[0]);
    assert_eq!(next[1].id, "b");
    assert_eq!(next[1].opacity, 0.8);
    assert_eq!(next[1].position, WatermarkPosition::TopLeft);
    assert_eq!(next[1].text.as_deref(), Some("B"));
}

#[test]
fn test_editor_rejects_invalid_patch() {
    let mut editor = WatermarkEditor::new(single(), settings());
    let err = editor
        .update("watermark-1", &WatermarkPatch::new().opacity(2.0))
        .unwrap_err();
    assert!(matches!(err, WatermarkError::InvalidOpacity { .. }));
    assert_eq!(editor.watermarks()[0].opacity, 0.5);

    assert_eq!(editor.update("missing", &WatermarkPatch::new()), Ok(false));
}

#[test]
fn test_fresh_entry_without_photographer_name_is_editable() {
    let mut editor = WatermarkEditor::with_parts(
        single(),
        SequentialIds::starting_after(&single()),
        Vec::<Advisory>::new(),
        ComposerSettings::default(),
    );
    let id = editor.add().unwrap();
    assert_eq!(editor.watermarks()[1].content(), None);

    for patch in [
        WatermarkPatch::new().position(WatermarkPosition::TopCenter),
        WatermarkPatch::new().opacity(0.3),
        WatermarkPatch::new().margin(12),
        WatermarkPatch::new().kind(WatermarkKind::Logo),
    ] {
        assert_eq!(editor.update(&id, &patch), Ok(true), "{:?}", patch);
    }
    assert!(editor.validate().is_err());

    let url = WatermarkPatch::new().logo_url("https://cdn.example.com/logo.png");
    assert_eq!(editor.update(&id, &url), Ok(true));
    assert!(editor.validate().is_ok());

    let added = &editor.watermarks()[1];
    assert_eq!(added.position, WatermarkPosition::TopCenter);
    assert_eq!(added.margin, Some(12));
    assert_eq!(editor.preview().overlays().len(), 2);
}

#[test]
fn test_switching_to_logo_keeps_text() {
    let mut editor = WatermarkEditor::new(single(), settings());
    let patch = WatermarkPatch::new()
        .kind(WatermarkKind::Logo)
        .logo_url("https://cdn.example.com/logo.png");
    assert_eq!(editor.update("watermark-1", &patch), Ok(true));

    let item = &editor.watermarks()[0];
    assert_eq!(item.kind, WatermarkKind::Logo);
    assert_eq!(item.text.as_deref(), Some("© Studio"));
    assert_eq!(item.content(), Some("https://cdn.example.com/logo.png"));
}

#[test]
fn test_preview_skips_disabled_and_uses_default_margin() {
    let mut editor = WatermarkEditor::with_parts(
        vec![
            WatermarkItem::text("a", "© A"),
            WatermarkItem::logo("b", "/logo.png").with_position(WatermarkPosition::TopLeft),
        ],
        SequentialIds::default(),
        Vec::<Advisory>::new(),
        settings(),
    );
    assert!(editor.toggle_enabled("a"));

    let state = editor.preview();
    assert_eq!(state.overlays().len(), 1);
    let overlay = &state.overlays()[0];
    assert_eq!(overlay.id, "b");
    assert_eq!(overlay.margin, 5);
    assert_eq!(
        overlay.content,
        OverlayContent::Logo {
            url: "/logo.png".to_string()
        }
    );

    assert!(editor.toggle_enabled("b"));
    assert_eq!(editor.preview(), RenderState::NoWatermark);
}

#[test]
fn test_validate_list_rejects_duplicates_and_overflow() {
    let dupes = vec![WatermarkItem::text("a", "A"), WatermarkItem::text("a", "B")];
    assert_eq!(
        validate_list(&dupes),
        Err(WatermarkError::DuplicateId {
            id: "a".to_string()
        })
    );

    let seven: Vec<WatermarkItem> = (0..7)
        .map(|i| WatermarkItem::text(format!("w{}", i), "x"))
        .collect();
    assert_eq!(
        validate_list(&seven),
        Err(WatermarkError::TooMany { count: 7, max: 6 })
    );
}
