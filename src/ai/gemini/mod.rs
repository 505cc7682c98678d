pub mod client;
pub mod image;
pub mod request;
pub mod response;
pub mod types;

pub use client::GeminiHttpClient;
pub use image::GeminiImageClient;
pub use request::{ModelCatalog, ALLOWED_MODELS, DEFAULT_MODEL};
