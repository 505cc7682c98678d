//! Gemini `generateContent` payload types.
//!
//! Request types serialize with every optional key omitted when unset, since
//! Gemini treats a missing key differently from an empty object. Response
//! parts are decoded loosely and then classified into [`ResponsePart`].

use crate::models::{AspectRatio, ImageSize, ThinkingConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<RequestPart>,
}

/// Untagged union of text and inline media request parts.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload used in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub google_search: GoogleSearch,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

impl Candidate {
    /// Classified parts in response order. Unrecognized shapes are dropped.
    pub fn parts(&self) -> impl Iterator<Item = ResponsePart> + '_ {
        self.content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(RawPart::classify)
    }

    pub fn web_search_queries(&self) -> Option<&[String]> {
        self.grounding_metadata
            .as_ref()
            .and_then(|metadata| metadata.web_search_queries.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<RawPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub web_search_queries: Option<Vec<String>>,
}

/// A response part as it appears on the wire: every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub thought: Option<bool>,
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

impl RawPart {
    /// Inline data takes precedence over text; empty text is not a part.
    pub fn classify(&self) -> Option<ResponsePart> {
        if let Some(inline) = &self.inline_data {
            return Some(ResponsePart::InlineBinary {
                mime_type: inline.mime_type.clone(),
                data: inline.data.clone(),
            });
        }

        match &self.text {
            Some(text) if !text.is_empty() => Some(ResponsePart::Text {
                content: text.clone(),
                is_thought: self.thought.unwrap_or(false),
            }),
            _ => None,
        }
    }
}

/// One classified fragment of a Gemini response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePart {
    Text { content: String, is_thought: bool },
    InlineBinary { mime_type: String, data: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_part_serialization() {
        let parts = vec![
            RequestPart::Text {
                text: "hello".to_string(),
            },
            RequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: "image/png".to_string(),
                    data: "AAAA".to_string(),
                },
            },
        ];
        let json = serde_json::to_value(&parts).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "text": "hello" },
                { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
            ])
        );
    }

    #[test]
    fn test_google_search_tool_serializes_as_empty_object() {
        let tool = Tool {
            google_search: GoogleSearch::default(),
        };
        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(json, serde_json::json!({ "google_search": {} }));
    }

    #[test]
    fn test_candidate_parts_are_classified_in_order() {
        let candidate: Candidate = serde_json::from_value(serde_json::json!({
            "content": {
                "parts": [
                    { "text": "thinking", "thought": true },
                    { "text": "" },
                    { "functionCall": { "name": "noop" } },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "Zm9v" } },
                    { "text": "caption" }
                ]
            }
        }))
        .unwrap();

        let parts: Vec<ResponsePart> = candidate.parts().collect();
        assert_eq!(
            parts,
            vec![
                ResponsePart::Text {
                    content: "thinking".to_string(),
                    is_thought: true,
                },
                ResponsePart::InlineBinary {
                    mime_type: "image/jpeg".to_string(),
                    data: "Zm9v".to_string(),
                },
                ResponsePart::Text {
                    content: "caption".to_string(),
                    is_thought: false,
                },
            ]
        );
    }

    #[test]
    fn test_candidate_without_content_has_no_parts() {
        let candidate: Candidate =
            serde_json::from_value(serde_json::json!({ "finishReason": "SAFETY" })).unwrap();
        assert_eq!(candidate.parts().count(), 0);
        assert!(candidate.web_search_queries().is_none());
    }

    #[test]
    fn test_response_with_error_object_decodes() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "error": { "code": 400, "message": "Invalid request", "status": "INVALID_ARGUMENT" }
        }))
        .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.message, "Invalid request");
        assert_eq!(error.code, Some(400));
        assert!(response.candidates.is_none());
    }
}
