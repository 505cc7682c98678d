//! Request shaping for Gemini image calls.
//!
//! Validates caller options against a [`ModelCatalog`] and produces the
//! `generateContent` body. Nothing here performs I/O, so every validation
//! failure happens before a request is sent.

use super::types::{
    Content, GenerateContentRequest, GenerationConfig, GoogleSearch, ImageConfig, InlineData,
    RequestPart, Tool,
};
use crate::models::{DescribeImageOptions, GenerateImageOptions, ImageInput};
use crate::{Error, Result};

pub const DEFAULT_MODEL: &str = "gemini-3.1-flash-image-preview";

pub const ALLOWED_MODELS: [&str; 4] = [
    "gemini-3.1-flash-image-preview",
    "gemini-3-pro-image-preview",
    "gemini-2.5-flash-preview-05-20",
    "gemini-2.0-flash-exp",
];

pub const DEFAULT_DESCRIBE_PROMPT: &str = "Describe this image in detail. What do you see?";

/// Immutable allow-list of model IDs plus the model used when none is given.
///
/// The model ID is interpolated into the request URL, so only exact matches
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    default_model: String,
    allowed: Vec<String>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, ALLOWED_MODELS)
    }
}

impl ModelCatalog {
    pub fn new<I, S>(default_model: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            default_model: default_model.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve a requested model, falling back to the default when absent or empty.
    pub fn resolve(&self, requested: Option<&str>) -> Result<String> {
        let model = match requested {
            Some(model) if !model.is_empty() => model,
            _ => self.default_model.as_str(),
        };

        if self.allowed.iter().any(|allowed| allowed == model) {
            Ok(model.to_string())
        } else {
            Err(Error::InvalidModel {
                model: model.to_string(),
                allowed: self.allowed.clone(),
            })
        }
    }
}

/// Whether the model accepts `imageConfig` directives. Also matches `imagen-*`.
pub fn supports_image_config(model: &str) -> bool {
    model.contains("image")
}

/// A validated request ready to send to the given model.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub model: String,
    pub body: GenerateContentRequest,
}

pub fn build_generate_request(
    catalog: &ModelCatalog,
    options: &GenerateImageOptions,
) -> Result<PreparedRequest> {
    let model = catalog.resolve(options.model.as_deref())?;

    let image_config = if supports_image_config(&model) {
        match (options.aspect_ratio, options.image_size) {
            (None, None) => None,
            (aspect_ratio, image_size) => Some(ImageConfig {
                aspect_ratio,
                image_size,
            }),
        }
    } else {
        if options.aspect_ratio.is_some() || options.image_size.is_some() {
            tracing::debug!(
                "Model {} does not accept image config; dropping aspect ratio/size",
                model
            );
        }
        None
    };

    if let Some(policy) = options.person_generation {
        tracing::debug!("Person generation policy requested: {}", policy.as_str());
    }

    let tools = if options.use_google_search == Some(true) {
        Some(vec![Tool {
            google_search: GoogleSearch::default(),
        }])
    } else {
        None
    };

    let body = GenerateContentRequest {
        contents: vec![Content {
            parts: request_parts(&options.prompt, &options.images),
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            image_config,
            thinking_config: options.thinking_config.clone(),
        },
        tools,
    };

    Ok(PreparedRequest { model, body })
}

pub fn build_describe_request(
    catalog: &ModelCatalog,
    options: &DescribeImageOptions,
) -> Result<PreparedRequest> {
    let model = catalog.resolve(options.model.as_deref())?;

    if options.images.is_empty() {
        return Err(Error::NoImagesProvided);
    }

    let prompt = match options.prompt.as_deref() {
        Some(prompt) if !prompt.is_empty() => prompt,
        _ => DEFAULT_DESCRIBE_PROMPT,
    };

    let body = GenerateContentRequest {
        contents: vec![Content {
            parts: request_parts(prompt, &options.images),
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["TEXT".to_string()],
            image_config: None,
            thinking_config: None,
        },
        tools: None,
    };

    Ok(PreparedRequest { model, body })
}

fn request_parts(prompt: &str, images: &[ImageInput]) -> Vec<RequestPart> {
    std::iter::once(RequestPart::Text {
        text: prompt.to_string(),
    })
    .chain(images.iter().map(|image| RequestPart::InlineData {
        inline_data: InlineData {
            mime_type: image.mime_type.clone(),
            data: image.data.clone(),
        },
    }))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AspectRatio, ImageSize, PersonGeneration, ThinkingConfig, ThinkingLevel};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn body_json(request: &PreparedRequest) -> Value {
        serde_json::to_value(&request.body).unwrap()
    }

    #[test]
    fn test_resolve_defaults_to_default_model() {
        let catalog = ModelCatalog::default();
        assert_eq!(catalog.resolve(None).unwrap(), DEFAULT_MODEL);
        assert_eq!(catalog.resolve(Some("")).unwrap(), DEFAULT_MODEL);
    }

    #[test]
    fn test_resolve_rejects_path_like_model() {
        let catalog = ModelCatalog::default();
        let err = catalog.resolve(Some("../../malicious-path")).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Invalid model: ../../malicious-path"));
        for model in ALLOWED_MODELS {
            assert!(message.contains(model));
        }
    }

    #[test]
    fn test_resolve_requires_exact_match() {
        let catalog = ModelCatalog::default();
        assert!(catalog.resolve(Some("gemini-3-pro-image-preview ")).is_err());
        assert!(catalog.resolve(Some("GEMINI-2.0-FLASH-EXP")).is_err());
        assert!(catalog.resolve(Some("gemini-2.0-flash-exp")).is_ok());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = ModelCatalog::new("imagen-test", ["imagen-test", "text-only"]);
        assert_eq!(catalog.resolve(None).unwrap(), "imagen-test");
        assert!(catalog.resolve(Some(DEFAULT_MODEL)).is_err());
    }

    #[test]
    fn test_supports_image_config() {
        assert!(supports_image_config("gemini-3-pro-image-preview"));
        assert!(supports_image_config("imagen-4.0-generate-001"));
        assert!(!supports_image_config("gemini-2.0-flash-exp"));
    }

    #[test]
    fn test_generate_request_minimal_body() {
        let request =
            build_generate_request(&ModelCatalog::default(), &GenerateImageOptions::new("a sunset"))
                .unwrap();

        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(
            body_json(&request),
            json!({
                "contents": [{ "parts": [{ "text": "a sunset" }] }],
                "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] }
            })
        );
    }

    #[test]
    fn test_generate_request_full_body() {
        let options = GenerateImageOptions {
            prompt: "a cat".to_string(),
            images: vec![
                ImageInput::new("AAAA", "image/png"),
                ImageInput::new("BBBB", "image/jpeg"),
            ],
            aspect_ratio: Some(AspectRatio::Ratio16x9),
            image_size: Some(ImageSize::K4),
            model: Some("gemini-3-pro-image-preview".to_string()),
            person_generation: Some(PersonGeneration::AllowAdult),
            use_google_search: Some(true),
            thinking_config: Some(ThinkingConfig {
                thinking_level: Some(ThinkingLevel::High),
                include_thoughts: Some(true),
            }),
        };

        let request = build_generate_request(&ModelCatalog::default(), &options).unwrap();

        assert_eq!(request.model, "gemini-3-pro-image-preview");
        assert_eq!(
            body_json(&request),
            json!({
                "contents": [{
                    "parts": [
                        { "text": "a cat" },
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "BBBB" } }
                    ]
                }],
                "generationConfig": {
                    "responseModalities": ["TEXT", "IMAGE"],
                    "imageConfig": { "aspectRatio": "16:9", "imageSize": "4K" },
                    "thinkingConfig": { "thinkingLevel": "HIGH", "includeThoughts": true }
                },
                "tools": [{ "google_search": {} }]
            })
        );
    }

    #[test]
    fn test_image_config_includes_only_populated_keys() {
        let options = GenerateImageOptions {
            image_size: Some(ImageSize::Px512),
            ..GenerateImageOptions::new("quick sketch")
        };
        let request = build_generate_request(&ModelCatalog::default(), &options).unwrap();
        assert_eq!(
            body_json(&request)["generationConfig"]["imageConfig"],
            json!({ "imageSize": "512px" })
        );
    }

    #[test]
    fn test_non_image_model_drops_image_config() {
        let options = GenerateImageOptions {
            aspect_ratio: Some(AspectRatio::Ratio16x9),
            image_size: Some(ImageSize::K4),
            model: Some("gemini-2.0-flash-exp".to_string()),
            ..GenerateImageOptions::new("a cat")
        };
        let request = build_generate_request(&ModelCatalog::default(), &options).unwrap();
        let body = body_json(&request);
        assert!(body["generationConfig"].get("imageConfig").is_none());
    }

    #[test]
    fn test_tools_absent_unless_grounding_enabled() {
        for flag in [None, Some(false)] {
            let options = GenerateImageOptions {
                use_google_search: flag,
                ..GenerateImageOptions::new("a cat")
            };
            let request = build_generate_request(&ModelCatalog::default(), &options).unwrap();
            assert!(body_json(&request).get("tools").is_none());
        }
    }

    #[test]
    fn test_person_generation_is_not_sent() {
        let options = GenerateImageOptions {
            person_generation: Some(PersonGeneration::AllowAll),
            ..GenerateImageOptions::new("a crowd scene")
        };
        let request = build_generate_request(&ModelCatalog::default(), &options).unwrap();
        let serialized = serde_json::to_string(&request.body).unwrap();
        assert!(!serialized.contains("ALLOW_ALL"));
        assert!(!serialized.contains("personGeneration"));
    }

    #[test]
    fn test_generate_rejects_invalid_model() {
        let options = GenerateImageOptions {
            model: Some("gemini-pro".to_string()),
            ..GenerateImageOptions::new("test")
        };
        let err = build_generate_request(&ModelCatalog::default(), &options).unwrap_err();
        assert!(matches!(err, Error::InvalidModel { .. }));
    }

    #[test]
    fn test_describe_request_uses_default_prompt_and_text_modality() {
        let options = DescribeImageOptions {
            images: vec![ImageInput::new("AAAA", "image/png")],
            ..Default::default()
        };
        let request = build_describe_request(&ModelCatalog::default(), &options).unwrap();
        assert_eq!(
            body_json(&request),
            json!({
                "contents": [{
                    "parts": [
                        { "text": DEFAULT_DESCRIBE_PROMPT },
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
                    ]
                }],
                "generationConfig": { "responseModalities": ["TEXT"] }
            })
        );
    }

    #[test]
    fn test_describe_request_uses_custom_prompt() {
        let options = DescribeImageOptions {
            images: vec![ImageInput::new("AAAA", "image/png")],
            prompt: Some("How many people are in this image?".to_string()),
            model: None,
        };
        let request = build_describe_request(&ModelCatalog::default(), &options).unwrap();
        assert_eq!(
            body_json(&request)["contents"][0]["parts"][0]["text"],
            "How many people are in this image?"
        );
    }

    #[test]
    fn test_describe_requires_images() {
        let err = build_describe_request(&ModelCatalog::default(), &DescribeImageOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::NoImagesProvided));
        assert_eq!(err.to_string(), "At least one image is required");
    }

    #[test]
    fn test_describe_checks_model_before_images() {
        let options = DescribeImageOptions {
            model: Some("bogus".to_string()),
            ..Default::default()
        };
        let err = build_describe_request(&ModelCatalog::default(), &options).unwrap_err();
        assert!(matches!(err, Error::InvalidModel { .. }));
    }
}
