use super::*;

#[test]
fn parses_insights_from_json_text_part() {
    let body = r#"{
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": "{\"prompt\": \"a volcano erupting\", \"explanation\": \"drama\"}" }]
            },
            "finishReason": "STOP"
        }]
    }"#;
    let insights = parse_insights(body).unwrap();
    assert_eq!(insights.prompt, "a volcano erupting");
    assert_eq!(insights.explanation, "drama");
}

#[test]
fn insights_text_may_be_split_across_parts() {
    let body = r#"{"candidates":[{"content":{"parts":[
        {"text":"{\"prompt\":\"p\","},
        {"text":"\"explanation\":\"e\"}"}
    ]}}]}"#;
    assert_eq!(
        parse_insights(body).unwrap(),
        Insights {
            prompt: "p".to_string(),
            explanation: "e".to_string()
        }
    );
}

#[test]
fn unusable_insights_are_generation_errors() {
    for body in [
        "not json",
        r#"{"candidates":[]}"#,
        r#"{"candidates":[{"content":{"parts":[{"text":"plain words"}]}}]}"#,
        r#"{"candidates":[{"content":{"parts":[{"text":"{\"prompt\":\"only\"}"}]}}]}"#,
    ] {
        let err = parse_insights(body).unwrap_err();
        assert!(matches!(err, ForgeError::Generation(_)), "{body}: {err}");
    }
}

#[test]
fn extracts_first_inline_image() {
    let body = r#"{"candidates":[{"content":{"parts":[
        {"text":"Here you go"},
        {"inlineData":{"mimeType":"image/jpeg","data":"/9j/"}},
        {"inlineData":{"mimeType":"image/png","data":"iVBORw=="}}
    ]}}]}"#;
    let image = extract_inline_image(body).unwrap();
    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.bytes, vec![0xff, 0xd8, 0xff]);
}

#[test]
fn missing_image_part_is_an_image_generation_error() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"I cannot draw that"}]}}]}"#;
    let err = extract_inline_image(body).unwrap_err();
    assert!(matches!(err, ForgeError::ImageGeneration(_)));
    assert_eq!(err.user_message(), "Failed to generate image preview.");
}

#[test]
fn request_bodies_carry_schema_and_aspect_ratio() {
    let body = insights_body(&GeneratorConfig::default());
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(
        body["generationConfig"]["responseSchema"]["required"],
        json!(["prompt", "explanation"])
    );

    let body = image_body("a red car");
    assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");
    let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(text.contains("a red car"));
}

#[test]
fn client_builds_model_urls_from_settings() {
    let settings = StudioSettings {
        endpoint: "https://example.test/v1beta/".to_string(),
        ..StudioSettings::default()
    };
    let client = GeminiClient::new(&settings).unwrap();
    assert_eq!(
        client.url("gemini-2.5-flash-image"),
        "https://example.test/v1beta/models/gemini-2.5-flash-image:generateContent"
    );
}

#[tokio::test]
async fn missing_api_key_fails_without_network() {
    let settings = StudioSettings {
        api_key: String::new(),
        endpoint: "http://127.0.0.1:9".to_string(),
        ..StudioSettings::default()
    };
    let client = GeminiClient::new(&settings).unwrap();
    let mut config = GeneratorConfig::default();
    config.topic = "t".to_string();

    let err = client.request_insights(&config).await.unwrap_err();
    assert!(matches!(err, ForgeError::Generation(_)));
    assert!(err.to_string().contains("API key"));

    let err = client.request_base_image("p").await.unwrap_err();
    assert!(matches!(err, ForgeError::ImageGeneration(_)));
}

#[test]
fn truncate_respects_char_boundaries() {
    assert_eq!(truncate("héllo", 2), "hé");
    assert_eq!(truncate("hi", 10), "hi");
}
