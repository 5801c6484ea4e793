use super::*;
use crate::generate::config::{EmotionalVibe, Niche, VisualStyle};

#[test]
fn insights_instruction_mentions_every_parameter() {
    let config = GeneratorConfig {
        niche: Niche::Finance,
        topic: "  Index funds explained ".to_string(),
        style: VisualStyle::Minimalist,
        vibe: EmotionalVibe::Professional,
        ..GeneratorConfig::default()
    };
    let text = insights_instruction(&config);
    for needle in [
        "Finance & Money",
        "Video topic: Index funds explained\n",
        "Minimalist",
        "Professional/Trustworthy",
        "#2563eb",
        "#f59e0b",
        "16:9",
    ] {
        assert!(text.contains(needle), "missing {needle:?} in {text}");
    }
}

#[test]
fn image_instruction_embeds_prompt_and_aspect() {
    let text = image_instruction(" a neon city at night ");
    assert!(text.contains("prompt: a neon city at night."));
    assert!(text.contains("16:9"));
    assert!(text.contains("text"));
}
