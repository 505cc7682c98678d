//! Data models and structures
//!
//! Caller-facing value types for the image operations, plus the process
//! configuration read from the environment. Nothing here outlives a single
//! call except `Config`, which is immutable after construction.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// One reference or source image supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    /// Base64 encoded image bytes.
    pub data: String,
    pub mime_type: String,
}

impl ImageInput {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Ratio1x1,
    #[serde(rename = "3:2")]
    Ratio3x2,
    #[serde(rename = "2:3")]
    Ratio2x3,
    #[serde(rename = "3:4")]
    Ratio3x4,
    #[serde(rename = "4:3")]
    Ratio4x3,
    #[serde(rename = "4:5")]
    Ratio4x5,
    #[serde(rename = "5:4")]
    Ratio5x4,
    #[serde(rename = "9:16")]
    Ratio9x16,
    #[serde(rename = "16:9")]
    Ratio16x9,
    #[serde(rename = "21:9")]
    Ratio21x9,
    #[serde(rename = "4:1")]
    Ratio4x1,
    #[serde(rename = "1:4")]
    Ratio1x4,
    #[serde(rename = "8:1")]
    Ratio8x1,
    #[serde(rename = "1:8")]
    Ratio1x8,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 14] = [
        AspectRatio::Ratio1x1,
        AspectRatio::Ratio3x2,
        AspectRatio::Ratio2x3,
        AspectRatio::Ratio3x4,
        AspectRatio::Ratio4x3,
        AspectRatio::Ratio4x5,
        AspectRatio::Ratio5x4,
        AspectRatio::Ratio9x16,
        AspectRatio::Ratio16x9,
        AspectRatio::Ratio21x9,
        AspectRatio::Ratio4x1,
        AspectRatio::Ratio1x4,
        AspectRatio::Ratio8x1,
        AspectRatio::Ratio1x8,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Ratio1x1 => "1:1",
            AspectRatio::Ratio3x2 => "3:2",
            AspectRatio::Ratio2x3 => "2:3",
            AspectRatio::Ratio3x4 => "3:4",
            AspectRatio::Ratio4x3 => "4:3",
            AspectRatio::Ratio4x5 => "4:5",
            AspectRatio::Ratio5x4 => "5:4",
            AspectRatio::Ratio9x16 => "9:16",
            AspectRatio::Ratio16x9 => "16:9",
            AspectRatio::Ratio21x9 => "21:9",
            AspectRatio::Ratio4x1 => "4:1",
            AspectRatio::Ratio1x4 => "1:4",
            AspectRatio::Ratio8x1 => "8:1",
            AspectRatio::Ratio1x8 => "1:8",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "512px")]
    Px512,
    #[serde(rename = "1K")]
    K1,
    #[serde(rename = "2K")]
    K2,
    #[serde(rename = "4K")]
    K4,
}

impl ImageSize {
    pub const ALL: [ImageSize; 4] = [ImageSize::Px512, ImageSize::K1, ImageSize::K2, ImageSize::K4];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Px512 => "512px",
            ImageSize::K1 => "1K",
            ImageSize::K2 => "2K",
            ImageSize::K4 => "4K",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonGeneration {
    AllowAll,
    AllowAdult,
    AllowNone,
}

impl PersonGeneration {
    pub const ALL: [PersonGeneration; 3] = [
        PersonGeneration::AllowAll,
        PersonGeneration::AllowAdult,
        PersonGeneration::AllowNone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonGeneration::AllowAll => "ALLOW_ALL",
            PersonGeneration::AllowAdult => "ALLOW_ADULT",
            PersonGeneration::AllowNone => "ALLOW_NONE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThinkingLevel {
    Minimal,
    Low,
    Medium,
    High,
}

impl ThinkingLevel {
    pub const ALL: [ThinkingLevel; 4] = [
        ThinkingLevel::Minimal,
        ThinkingLevel::Low,
        ThinkingLevel::Medium,
        ThinkingLevel::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThinkingLevel::Minimal => "MINIMAL",
            ThinkingLevel::Low => "LOW",
            ThinkingLevel::Medium => "MEDIUM",
            ThinkingLevel::High => "HIGH",
        }
    }
}

/// Reasoning depth configuration, forwarded to Gemini as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_level: Option<ThinkingLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_thoughts: Option<bool>,
}

/// Options for the image generation (and editing) operation.
#[derive(Debug, Clone, Default)]
pub struct GenerateImageOptions {
    pub prompt: String,
    pub images: Vec<ImageInput>,
    pub aspect_ratio: Option<AspectRatio>,
    pub image_size: Option<ImageSize>,
    pub model: Option<String>,
    pub person_generation: Option<PersonGeneration>,
    pub use_google_search: Option<bool>,
    pub thinking_config: Option<ThinkingConfig>,
}

impl GenerateImageOptions {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

/// Options for the image description operation.
#[derive(Debug, Clone, Default)]
pub struct DescribeImageOptions {
    pub images: Vec<ImageInput>,
    pub prompt: Option<String>,
    pub model: Option<String>,
}

/// Normalized result of an image generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub mime_type: String,
    pub base64_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thoughts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_queries: Option<Vec<String>>,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    /// Per-request deadline. `None` leaves the call unbounded.
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingCredential)?;

        let gemini_base_url = lookup("GEMINI_BASE_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup("GEMINI_TIMEOUT_SECS").filter(|v| !v.is_empty()) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!(
                        "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            gemini_api_key,
            gemini_base_url,
            timeout,
        })
    }
}
