use super::*;

#[test]
fn defaults_match_editor_defaults() {
    let c = GeneratorConfig::default();
    assert_eq!(c.niche, Niche::Gaming);
    assert_eq!(c.topic, "");
    assert_eq!(c.style, VisualStyle::Cinematic);
    assert_eq!(c.vibe, EmotionalVibe::Excited);
    assert_eq!(c.primary_color.to_hex(), "#2563eb");
    assert_eq!(c.accent_color.to_hex(), "#f59e0b");
}

#[test]
fn closed_sets_have_expected_sizes() {
    assert_eq!(Niche::ALL.len(), 14);
    assert_eq!(VisualStyle::ALL.len(), 8);
    assert_eq!(EmotionalVibe::ALL.len(), 7);
}

#[test]
fn blank_topic_fails_validation_with_inline_message() {
    let mut c = GeneratorConfig::default();
    c.topic = "   ".to_string();
    let err = c.validate().unwrap_err();
    assert!(matches!(err, ForgeError::ConfigValidation(_)));
    assert_eq!(err.user_message(), "Please enter a video topic or title.");

    c.topic = "x".to_string();
    assert!(c.validate().is_ok());
}

#[test]
fn seed_text_takes_first_three_words() {
    let mut c = GeneratorConfig::default();
    c.topic = "  I built   a gaming PC for $500 ".to_string();
    assert_eq!(c.seed_text(), "I built a");
    c.topic = "Speedrun".to_string();
    assert_eq!(c.seed_text(), "Speedrun");
}

#[test]
fn enums_parse_loosely_and_display_names() {
    assert_eq!("tech & gadgets".parse::<Niche>().unwrap(), Niche::Tech);
    assert_eq!("Tech".parse::<Niche>().unwrap(), Niche::Tech);
    assert_eq!("3d-render".parse::<VisualStyle>().unwrap(), VisualStyle::ThreeD);
    assert_eq!("high_contrast".parse::<VisualStyle>().unwrap(), VisualStyle::HighContrast);
    assert_eq!("mysterious".parse::<EmotionalVibe>().unwrap(), EmotionalVibe::Mysterious);
    assert!("opera".parse::<Niche>().is_err());
    assert_eq!(EmotionalVibe::Excited.to_string(), "Excited/Hype");
}

#[test]
fn config_serializes_with_display_names() {
    let c = GeneratorConfig {
        topic: "Epic build".to_string(),
        niche: Niche::Diy,
        ..GeneratorConfig::default()
    };
    let v = serde_json::to_value(&c).unwrap();
    assert_eq!(v["niche"], "DIY & Crafting");
    assert_eq!(v["vibe"], "Excited/Hype");
    assert_eq!(v["primaryColor"], "#2563eb");

    let back: GeneratorConfig = serde_json::from_value(v).unwrap();
    assert_eq!(back, c);

    let partial: GeneratorConfig = serde_json::from_str(r#"{"topic":"t"}"#).unwrap();
    assert_eq!(partial.style, VisualStyle::Cinematic);
}
