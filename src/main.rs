// src/main.rs

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use companion::api::http_router;
use companion::config::CONFIG;
use companion::state::AppState;

#[derive(Parser)]
#[command(name = "companion", about = "Virtual companion backend")]
struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CONFIG.clone();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Chat model: {}", config.chat_model);
    info!(
        "Chat credentials: {}",
        if config.chat_credentials_ready() { "configured" } else { "missing (scripted replies only)" }
    );
    info!(
        "Image search: {}",
        if config.google_credentials().is_some() { "configured" } else { "disabled" }
    );

    tokio::fs::create_dir_all(&config.audios_dir).await?;
    tokio::fs::create_dir_all(config.textures_dir()).await?;

    let bind_address = config.bind_address();
    let app = http_router(AppState::from_config(config)?);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Virtual companion listening on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
