use super::client::GeminiHttpClient;
use super::request::{build_describe_request, build_generate_request, ModelCatalog};
use super::response::{normalize_description, normalize_generated};
use crate::ai::ImageService;
use crate::models::{Config, DescribeImageOptions, GenerateImageOptions, GeneratedImage};
use crate::{Error, Result};
use async_trait::async_trait;

/// Gemini-backed image generation, editing and description.
pub struct GeminiImageClient {
    http: GeminiHttpClient,
    catalog: ModelCatalog,
}

impl GeminiImageClient {
    /// Fails with [`Error::MissingCredential`] when `api_key` is empty.
    pub fn new(api_key: String) -> Result<Self> {
        Self::new_with_client(api_key, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, client: reqwest::Client) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::MissingCredential);
        }

        Ok(Self {
            http: GeminiHttpClient::new_with_client(api_key, client),
            catalog: ModelCatalog::default(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.gemini_api_key.clone())?
            .with_base_url(config.gemini_base_url.clone())
            .with_timeout(config.timeout))
    }

    pub fn with_catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<std::time::Duration>) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }
}

#[async_trait]
impl ImageService for GeminiImageClient {
    async fn generate_image(&self, options: GenerateImageOptions) -> Result<GeneratedImage> {
        let request = build_generate_request(&self.catalog, &options)?;

        tracing::debug!(
            "Sending image generation request to Gemini (model: {}, reference images: {})",
            request.model,
            options.images.len()
        );

        let response = self
            .http
            .generate_content(&request.model, &request.body)
            .await?;
        let image = normalize_generated(response)?;

        tracing::info!(
            "Generated {} image with {}",
            image.mime_type,
            request.model
        );

        Ok(image)
    }

    async fn describe_image(&self, options: DescribeImageOptions) -> Result<String> {
        let request = build_describe_request(&self.catalog, &options)?;

        tracing::debug!(
            "Sending image description request to Gemini (model: {}, images: {})",
            request.model,
            options.images.len()
        );

        let response = self
            .http
            .generate_content(&request.model, &request.body)
            .await?;
        let description = normalize_description(response)?;

        tracing::info!(
            "Described {} image(s) with {} ({} chars)",
            options.images.len(),
            request.model,
            description.len()
        );

        Ok(description)
    }
}
