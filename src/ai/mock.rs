use super::ImageService;
use crate::models::{DescribeImageOptions, GenerateImageOptions, GeneratedImage};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Base64 of a 1x1 PNG.
pub const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

pub struct MockImageClient {
    image_responses: Arc<Mutex<Vec<GeneratedImage>>>,
    description_responses: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
    generate_calls: Arc<Mutex<Vec<GenerateImageOptions>>>,
    describe_calls: Arc<Mutex<Vec<DescribeImageOptions>>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            image_responses: Arc::new(Mutex::new(Vec::new())),
            description_responses: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            generate_calls: Arc::new(Mutex::new(Vec::new())),
            describe_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image_response(self, response: GeneratedImage) -> Self {
        self.image_responses.lock().unwrap().push(response);
        self
    }

    pub fn with_description_response(self, response: String) -> Self {
        self.description_responses.lock().unwrap().push(response);
        self
    }

    /// Make every call fail with a provider error carrying `message`.
    pub fn with_failure(mut self, message: String) -> Self {
        self.failure = Some(message);
        self
    }

    pub fn generate_calls(&self) -> Vec<GenerateImageOptions> {
        self.generate_calls.lock().unwrap().clone()
    }

    pub fn describe_calls(&self) -> Vec<DescribeImageOptions> {
        self.describe_calls.lock().unwrap().clone()
    }

    pub fn get_call_count(&self) -> usize {
        self.generate_calls.lock().unwrap().len() + self.describe_calls.lock().unwrap().len()
    }

    fn fail_if_configured(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(Error::Provider(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageService for MockImageClient {
    async fn generate_image(&self, options: GenerateImageOptions) -> Result<GeneratedImage> {
        let index = {
            let mut calls = self.generate_calls.lock().unwrap();
            calls.push(options);
            calls.len() - 1
        };
        self.fail_if_configured()?;

        let responses = self.image_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(GeneratedImage {
                mime_type: "image/png".to_string(),
                base64_data: TINY_PNG_BASE64.to_string(),
                description: None,
                thoughts: None,
                search_queries: None,
            })
        } else {
            Ok(responses[index % responses.len()].clone())
        }
    }

    async fn describe_image(&self, options: DescribeImageOptions) -> Result<String> {
        let index = {
            let mut calls = self.describe_calls.lock().unwrap();
            calls.push(options.clone());
            calls.len() - 1
        };
        self.fail_if_configured()?;

        if options.images.is_empty() {
            return Err(Error::NoImagesProvided);
        }

        let responses = self.description_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(format!("A mock description of {} image(s)", options.images.len()))
        } else {
            Ok(responses[index % responses.len()].clone())
        }
    }
}
