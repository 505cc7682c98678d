//! MCP protocol surface
//!
//! Publishes the image tools and the prompt catalog over MCP. Tool failures
//! are reported as error results rather than protocol errors so a bad call
//! never tears down the session.

use crate::ai::ImageService;
use crate::image::ImageStore;
use crate::models::{
    AspectRatio, DescribeImageOptions, GenerateImageOptions, ImageInput, ImageSize,
    PersonGeneration, ThinkingConfig, ThinkingLevel,
};
use crate::prompts::{self, PromptDefinition};
use crate::{Error, Result};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorData, GetPromptRequestParam,
    GetPromptResult, Implementation, JsonObject, ListPromptsResult, ListToolsResult,
    PaginatedRequestParam, Prompt, PromptMessage, PromptMessageRole, ProtocolVersion,
    ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ServerHandler;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub const SERVER_NAME: &str = "gemini-image-mcp";

const MODEL_DESCRIPTION: &str = "Gemini model (gemini-3.1-flash-image-preview, gemini-3-pro-image-preview, gemini-2.5-flash-preview-05-20, or gemini-2.0-flash-exp)";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateImageArgs {
    prompt: String,
    #[serde(default = "default_aspect_ratio")]
    aspect_ratio: AspectRatio,
    #[serde(default = "default_image_size")]
    image_size: ImageSize,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    images: Vec<ImageInput>,
    #[serde(default)]
    output_path: Option<String>,
    #[serde(default)]
    person_generation: Option<PersonGeneration>,
    #[serde(default)]
    use_google_search: bool,
    #[serde(default)]
    thinking_config: Option<ThinkingConfig>,
}

fn default_aspect_ratio() -> AspectRatio {
    AspectRatio::Ratio1x1
}

fn default_image_size() -> ImageSize {
    ImageSize::K1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditImageArgs {
    prompt: String,
    images: Vec<ImageInput>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    output_path: Option<String>,
    #[serde(default)]
    person_generation: Option<PersonGeneration>,
}

#[derive(Debug, Deserialize)]
struct DescribeImageArgs {
    images: Vec<ImageInput>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

fn parse_args<T: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<T> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
        .map_err(|e| Error::InvalidArguments(e.to_string()))
}

fn failure(action: &str, err: &Error) -> CallToolResult {
    tracing::error!("{} failed: {}", action, err);
    CallToolResult::error(vec![Content::text(format!("Failed to {}: {}", action, err))])
}

/// MCP server exposing `generate_image`, `edit_image`, `describe_image` and
/// the prompt catalog.
#[derive(Clone)]
pub struct ImageToolServer {
    images: Arc<dyn ImageService>,
    store: Arc<dyn ImageStore>,
}

impl ImageToolServer {
    pub fn new(images: Arc<dyn ImageService>, store: Arc<dyn ImageStore>) -> Self {
        Self { images, store }
    }

    pub fn tool_definitions(&self) -> Vec<Tool> {
        vec![
            Tool::new(
                "generate_image",
                "Generate an image using Google Gemini. Optionally provide reference images to guide the generation style or content. Returns a base64-encoded image.",
                schema(generate_image_schema()),
            ),
            Tool::new(
                "edit_image",
                "Edit one or more images using Google Gemini. Provide images and instructions for how to modify them. Returns a base64-encoded image.",
                schema(edit_image_schema()),
            ),
            Tool::new(
                "describe_image",
                "Analyze and describe one or more images using Google Gemini. Returns a text description of the image contents.",
                schema(describe_image_schema()),
            ),
        ]
    }

    /// Run a tool by name. Always yields a result; failures carry `is_error`.
    pub async fn dispatch_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        tracing::info!("Tool call: {}", name);

        match name {
            "generate_image" => self
                .generate_image(arguments)
                .await
                .unwrap_or_else(|e| failure("generate image", &e)),
            "edit_image" => self
                .edit_image(arguments)
                .await
                .unwrap_or_else(|e| failure("edit image", &e)),
            "describe_image" => self
                .describe_image(arguments)
                .await
                .unwrap_or_else(|e| failure("describe image", &e)),
            other => {
                let err = Error::UnknownTool(other.to_string());
                tracing::warn!("{}", err);
                CallToolResult::error(vec![Content::text(err.to_string())])
            }
        }
    }

    pub fn prompt_definitions(&self) -> Result<Vec<Prompt>> {
        prompts::catalog().iter().map(prompt_listing).collect()
    }

    /// Render a catalog prompt into a single user message.
    pub fn render_prompt(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<GetPromptResult> {
        let definition =
            prompts::find(name).ok_or_else(|| Error::UnknownPrompt(name.to_string()))?;

        let args: HashMap<String, String> = arguments
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect();

        let text = definition.build_message(&args);
        tracing::debug!("Rendered prompt {} ({} chars)", name, text.len());

        Ok(GetPromptResult {
            description: Some(definition.description.to_string()),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        })
    }

    async fn generate_image(&self, arguments: Option<JsonObject>) -> Result<CallToolResult> {
        let args: GenerateImageArgs = parse_args(arguments)?;

        let options = GenerateImageOptions {
            prompt: args.prompt,
            images: args.images,
            aspect_ratio: Some(args.aspect_ratio),
            image_size: Some(args.image_size),
            model: args.model,
            person_generation: args.person_generation,
            use_google_search: Some(args.use_google_search),
            thinking_config: args.thinking_config,
        };
        let image = self.images.generate_image(options).await?;

        let mut content = vec![Content::image(image.base64_data.clone(), image.mime_type.clone())];
        if let Some(saved) = self.save_if_requested(&image.base64_data, args.output_path).await? {
            content.push(Content::text(saved));
        }
        if let Some(description) = image.description.filter(|d| !d.is_empty()) {
            content.push(Content::text(description));
        }
        if let Some(thoughts) = image.thoughts.filter(|t| !t.is_empty()) {
            content.push(Content::text(format!("[Thinking] {}", thoughts)));
        }
        if let Some(queries) = image.search_queries.filter(|q| !q.is_empty()) {
            content.push(Content::text(format!("[Search queries] {}", queries.join(", "))));
        }

        Ok(CallToolResult::success(content))
    }

    async fn edit_image(&self, arguments: Option<JsonObject>) -> Result<CallToolResult> {
        let args: EditImageArgs = parse_args(arguments)?;
        if args.images.is_empty() {
            return Err(Error::NoImagesProvided);
        }

        let options = GenerateImageOptions {
            images: args.images,
            model: args.model,
            person_generation: args.person_generation,
            ..GenerateImageOptions::new(args.prompt)
        };
        let image = self.images.generate_image(options).await?;

        let mut content = vec![Content::image(image.base64_data.clone(), image.mime_type.clone())];
        if let Some(saved) = self.save_if_requested(&image.base64_data, args.output_path).await? {
            content.push(Content::text(saved));
        }
        if let Some(description) = image.description.filter(|d| !d.is_empty()) {
            content.push(Content::text(description));
        }

        Ok(CallToolResult::success(content))
    }

    async fn describe_image(&self, arguments: Option<JsonObject>) -> Result<CallToolResult> {
        let args: DescribeImageArgs = parse_args(arguments)?;

        let description = self
            .images
            .describe_image(DescribeImageOptions {
                images: args.images,
                prompt: args.prompt,
                model: args.model,
            })
            .await?;

        Ok(CallToolResult::success(vec![Content::text(description)]))
    }

    async fn save_if_requested(
        &self,
        base64_data: &str,
        output_path: Option<String>,
    ) -> Result<Option<String>> {
        match output_path.filter(|p| !p.is_empty()) {
            Some(path) => {
                let saved = self.store.save(base64_data, Path::new(&path)).await?;
                Ok(Some(format!("Image saved to: {}", saved.display())))
            }
            None => Ok(None),
        }
    }
}

impl ServerHandler for ImageToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Generate, edit and describe images with Google Gemini. Prompts provide ready-made templates for common image layouts.".to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_definitions()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        Ok(self.dispatch_tool(&request.name, request.arguments).await)
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, ErrorData> {
        let prompts = self
            .prompt_definitions()
            .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
        Ok(ListPromptsResult::with_all_items(prompts))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, ErrorData> {
        self.render_prompt(&request.name, request.arguments)
            .map_err(|e| match e {
                Error::UnknownPrompt(_) => ErrorData::invalid_params(e.to_string(), None),
                other => ErrorData::internal_error(other.to_string(), None),
            })
    }
}

fn prompt_listing(definition: &PromptDefinition) -> Result<Prompt> {
    let arguments: Vec<Value> = definition
        .arguments
        .iter()
        .map(|arg| {
            json!({
                "name": arg.name,
                "description": arg.description,
                "required": arg.required,
            })
        })
        .collect();

    Ok(serde_json::from_value(json!({
        "name": definition.name,
        "title": definition.title,
        "description": definition.description,
        "arguments": arguments,
    }))?)
}

fn schema(value: Value) -> Arc<JsonObject> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

fn image_list_schema(description: &str, min_items: Option<u32>) -> Value {
    let mut list = json!({
        "type": "array",
        "description": description,
        "items": {
            "type": "object",
            "properties": {
                "data": { "type": "string", "description": "Base64 encoded image data" },
                "mimeType": { "type": "string", "description": "MIME type (e.g., image/png)" }
            },
            "required": ["data", "mimeType"]
        }
    });
    if let (Some(min), Some(obj)) = (min_items, list.as_object_mut()) {
        obj.insert("minItems".to_string(), json!(min));
    }
    list
}

fn person_generation_schema() -> Value {
    json!({
        "type": "string",
        "enum": PersonGeneration::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        "description": "Controls the generation of people in images"
    })
}

fn model_schema() -> Value {
    json!({
        "type": "string",
        "description": MODEL_DESCRIPTION,
        "default": crate::ai::gemini::DEFAULT_MODEL
    })
}

fn generate_image_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "prompt": { "type": "string", "description": "Description of the image to generate" },
            "aspectRatio": {
                "type": "string",
                "enum": AspectRatio::ALL.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
                "description": "Aspect ratio of the generated image. Ultra-wide and ultra-tall options: 4:1, 1:4, 8:1, 1:8",
                "default": "1:1"
            },
            "imageSize": {
                "type": "string",
                "enum": ImageSize::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                "description": "Resolution of the generated image (512px for fast iterations, 1K default, 2K/4K for high quality)",
                "default": "1K"
            },
            "model": model_schema(),
            "images": image_list_schema(
                "Optional reference images to guide generation (up to 14 in total)",
                None,
            ),
            "outputPath": {
                "type": "string",
                "description": "Optional file path to save the generated image (e.g., /path/to/image.png)"
            },
            "personGeneration": person_generation_schema(),
            "useGoogleSearch": {
                "type": "boolean",
                "description": "Enable Google Search grounding to use real-time web data (e.g., current weather, real products, recent events)",
                "default": false
            },
            "thinkingConfig": {
                "type": "object",
                "description": "Controls the model's thinking behavior for complex compositions",
                "properties": {
                    "thinkingLevel": {
                        "type": "string",
                        "enum": ThinkingLevel::ALL.iter().map(|l| l.as_str()).collect::<Vec<_>>(),
                        "description": "Thinking depth: MINIMAL (fast, default) or HIGH (better for complex scenes, precise text)"
                    },
                    "includeThoughts": {
                        "type": "boolean",
                        "description": "Whether to return the reasoning process"
                    }
                }
            }
        },
        "required": ["prompt"]
    })
}

fn edit_image_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "prompt": { "type": "string", "description": "Instructions for how to edit the image(s)" },
            "images": image_list_schema("One or more images to edit", Some(1)),
            "model": model_schema(),
            "outputPath": {
                "type": "string",
                "description": "Optional file path to save the edited image (e.g., /path/to/image.png)"
            },
            "personGeneration": person_generation_schema()
        },
        "required": ["prompt", "images"]
    })
}

fn describe_image_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "images": image_list_schema("One or more images to describe or analyze", Some(1)),
            "prompt": {
                "type": "string",
                "description": "Optional custom prompt for analysis (default: general description)"
            },
            "model": model_schema()
        },
        "required": ["images"]
    })
}
