use crate::generate::config::GeneratorConfig;

/// Instruction sent to the insights model.
///
/// Asks for an image prompt (visual content only, 16:9, no lettering) and a short rationale for
/// its click-through appeal, answered as JSON `{prompt, explanation}`.
pub fn insights_instruction(config: &GeneratorConfig) -> String {
    format!(
        "You design high-performing YouTube thumbnails and write prompts for image generators.\n\
         Write one detailed image-generation prompt for a thumbnail with these parameters:\n\
         - Niche: {niche}\n\
         - Video topic: {topic}\n\
         - Visual style: {style}\n\
         - Emotional vibe: {vibe}\n\
         - Color palette: primary {primary}, accent {accent}\n\
         \n\
         The prompt must:\n\
         1. Describe lighting, camera angle, composition, character expressions and how the \
         palette above is used.\n\
         2. Describe a 16:9 scene.\n\
         3. Contain no text, letters or words in the scene; titles are added later.\n\
         Also give a brief explanation of why this design should earn a high click-through rate.",
        niche = config.niche,
        topic = config.topic.trim(),
        style = config.style,
        vibe = config.vibe,
        primary = config.primary_color,
        accent = config.accent_color,
    )
}

/// Instruction sent to the image model for a previously generated prompt.
pub fn image_instruction(prompt: &str) -> String {
    format!(
        "Render a high-quality YouTube thumbnail image for this prompt: {}. \
         Frame it as a 16:9 cinematic shot with vivid, saturated colors and strong lighting. \
         Do not put any text on the image.",
        prompt.trim()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/generate/prompt.rs"]
mod tests;
