use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use toiawase_api::{
    build_router,
    config::{Config, StoreKind},
    state::AppState,
    views::Views,
};
use toiawase_export::PdfFont;
use toiawase_persist::{MemoryMessageStore, MessageStore, MongoMessageStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting toiawase server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize message store
    let store: Arc<dyn MessageStore> = match config.store {
        StoreKind::Mongodb => {
            tracing::info!("Connecting to MongoDB");
            let mongo = MongoMessageStore::connect(
                &config.mongodb_uri,
                &config.mongodb.database,
                &config.mongodb.collection,
            )
            .await?;
            tracing::info!("MongoDB connected");
            Arc::new(mongo)
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; messages are lost on restart");
            Arc::new(MemoryMessageStore::new())
        }
    };

    let views = Views::new()?;
    let pdf_font = load_pdf_font(&config).await;

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), store, views, pdf_font));

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Form: http://{}/form", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn load_pdf_font(config: &Config) -> Option<PdfFont> {
    let Some(path) = &config.export.pdf_font else {
        tracing::warn!("export.pdf_font is not set; PDF export is disabled");
        return None;
    };

    match PdfFont::load(path).await {
        Ok(font) => {
            tracing::info!("Loaded PDF font {}", path.display());
            Some(font)
        }
        Err(e) => {
            tracing::warn!("PDF export disabled, cannot use font {}: {}", path.display(), e);
            None
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
