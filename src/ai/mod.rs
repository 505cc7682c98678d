//! AI service integration for image generation and description
//!
//! Provides the [`ImageService`] seam the protocol surface talks to, with a
//! Gemini implementation and an in-memory mock.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiImageClient;
pub use mock::MockImageClient;

use crate::models::{DescribeImageOptions, GenerateImageOptions, GeneratedImage};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageService: Send + Sync {
    /// Generate (or edit, when `options.images` is non-empty) a single image.
    async fn generate_image(&self, options: GenerateImageOptions) -> Result<GeneratedImage>;

    /// Describe one or more images as text.
    async fn describe_image(&self, options: DescribeImageOptions) -> Result<String>;
}
