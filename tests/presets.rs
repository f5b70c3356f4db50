use nature_dsp::{EngineConfig, NatureEngine, PresetError};

fn engine() -> NatureEngine {
    NatureEngine::new(EngineConfig::default())
}

#[test]
fn default_preset_text() {
    assert_eq!(
        engine().save_preset(),
        r#"{"master_level":0.800000,"reverb_mix":0.150000,"reverb_room_size":0.500000,"reverb_damping":0.500000}"#
    );
}

#[test]
fn round_trip_is_exact_to_six_decimals() {
    let mut a = engine();
    a.set_parameter("master_level", 0.123456);
    a.set_parameter("reverb_mix", 0.654321);
    a.set_parameter("reverb_room_size", 1.0);
    a.set_parameter("reverb_damping", 0.0);
    let text = a.save_preset();

    let mut b = engine();
    b.load_preset(&text).unwrap();
    assert_eq!(b.save_preset(), text);
    for id in ["master_level", "reverb_mix", "reverb_room_size", "reverb_damping"] {
        assert!((a.get_parameter(id) - b.get_parameter(id)).abs() < 1e-6);
    }
}

#[test]
fn loaded_values_are_clamped() {
    let mut e = engine();
    e.load_preset(r#"{"master_level":7,"reverb_mix":-3,"reverb_room_size":0.25,"reverb_damping":1e-3}"#)
        .unwrap();
    assert_eq!(e.get_parameter("master_level"), 1.0);
    assert_eq!(e.get_parameter("reverb_mix"), 0.0);
    assert_eq!(e.get_parameter("reverb_room_size"), 0.25);
    assert!((e.get_parameter("reverb_damping") - 0.001).abs() < 1e-9);
}

#[test]
fn malformed_presets_change_nothing() {
    let mut e = engine();
    e.set_parameter("master_level", 0.42);
    let before = e.save_preset();

    let bad = [
        "",
        "{}",
        "not json",
        r#"{"master_level":0.1}"#,
        r#"{"master_level":0.1,"reverb_mix":0.1,"reverb_room_size":0.1}"#,
        r#"{"reverb_mix":0.1,"master_level":0.1,"reverb_room_size":0.1,"reverb_damping":0.1}"#,
        r#"{"master_level":0.1,"reverb_mix":0.1,"reverb_room_size":0.1,"reverb_damping":0.1,"extra":1}"#,
        r#"{"master_level":0.1,"reverb_mix":0.1,"reverb_room_size":0.1,"reverb_damping":0.1}}"#,
        r#"{"master_level":nan,"reverb_mix":0.1,"reverb_room_size":0.1,"reverb_damping":0.1}"#,
        r#"{"master_level":"0.1","reverb_mix":0.1,"reverb_room_size":0.1,"reverb_damping":0.1}"#,
    ];
    for text in bad {
        assert!(e.load_preset(text).is_err(), "accepted {text:?}");
        assert_eq!(e.save_preset(), before, "{text:?} changed parameters");
    }
}

#[test]
fn validate_does_not_apply() {
    let e = engine();
    let preset = e
        .validate_preset(r#"{"master_level":0.3,"reverb_mix":0.2,"reverb_room_size":0.1,"reverb_damping":0.9}"#)
        .unwrap();
    assert_eq!(preset.master_level, 0.3);
    assert_eq!(e.get_parameter("master_level"), 0.8);
}

#[test]
fn trailing_content_is_reported() {
    let err = engine()
        .validate_preset(r#"{"master_level":0.3,"reverb_mix":0.2,"reverb_room_size":0.1,"reverb_damping":0.9} extra"#)
        .unwrap_err();
    assert!(matches!(err, PresetError::TrailingContent { .. }));
}
