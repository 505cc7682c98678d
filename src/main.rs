use anyhow::Result;
use clap::Parser;
use gemini_image_mcp::ai::GeminiImageClient;
use gemini_image_mcp::image::FileImageStore;
use gemini_image_mcp::models::Config;
use gemini_image_mcp::server::ImageToolServer;
use rmcp::ServiceExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gemini-image-mcp")]
#[command(about = "MCP server for image generation, editing and description with Google Gemini")]
#[command(version)]
struct CliArgs {
    /// Override the Gemini API base URL (defaults to GEMINI_BASE_URL or the public endpoint).
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds (defaults to GEMINI_TIMEOUT_SECS, unbounded when unset).
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,
}

impl CliArgs {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(base_url) = &self.base_url {
            config.gemini_base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Some(Duration::from_secs(secs));
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_image_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => args.apply(config),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("Set it with: export GEMINI_API_KEY=your_key_here");
            std::process::exit(1);
        }
    };

    let client = match GeminiImageClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to initialize Gemini client: {}", e);
            std::process::exit(1);
        }
    };

    let server = ImageToolServer::new(Arc::new(client), Arc::new(FileImageStore::new()));

    info!(
        "gemini-image-mcp server started (version {})",
        env!("CARGO_PKG_VERSION")
    );

    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;

    info!("gemini-image-mcp server stopped");
    Ok(())
}
