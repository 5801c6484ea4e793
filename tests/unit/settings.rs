use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k: &str| map.get(k).cloned()
}

#[test]
fn defaults_point_at_gemini_models() {
    let s = StudioSettings::default();
    assert_eq!(s.insights_model, "gemini-3-flash-preview");
    assert_eq!(s.image_model, "gemini-2.5-flash-image");
    assert!(s.api_key.is_empty());
    assert!(s.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults() {
    let s = StudioSettings::from_json(r#"{"timeout_secs": 5, "fonts_dir": "/fonts"}"#).unwrap();
    assert_eq!(s.timeout_secs, 5);
    assert_eq!(s.fonts_dir, Some(PathBuf::from("/fonts")));
    assert_eq!(s.endpoint, DEFAULT_ENDPOINT);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = StudioSettings::from_json(r#"{"endpont": "x"}"#).unwrap_err();
    assert!(matches!(err, ForgeError::Serde(_)));
}

#[test]
fn env_overrides_follow_precedence() {
    let s = StudioSettings::default().with_env(env(&[
        ("API_KEY", "generic"),
        ("GEMINI_API_KEY", "gemini"),
        ("THUMBFORGE_API_KEY", "  "),
        ("THUMBFORGE_FONTS_DIR", "/opt/fonts"),
    ]));
    assert_eq!(s.api_key, "gemini");
    assert_eq!(s.fonts_dir, Some(PathBuf::from("/opt/fonts")));

    let s = StudioSettings::default().with_env(env(&[]));
    assert_eq!(s, StudioSettings::default());
}

#[test]
fn api_key_is_neither_serialized_nor_printed() {
    let s = StudioSettings {
        api_key: "secret-key".to_string(),
        ..StudioSettings::default()
    };
    assert!(!serde_json::to_string(&s).unwrap().contains("secret-key"));
    assert!(!format!("{s:?}").contains("secret-key"));
}

#[test]
fn load_reads_file_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"image_model": "custom-image"}"#).unwrap();
    let s = StudioSettings::load(Some(&path)).unwrap();
    assert_eq!(s.image_model, "custom-image");

    std::fs::write(&path, r#"{"timeout_secs": 0}"#).unwrap();
    assert!(StudioSettings::load(Some(&path)).is_err());
    assert!(StudioSettings::load(Some(&dir.path().join("missing.json"))).is_err());
}
