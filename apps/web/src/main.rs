use tracing_subscriber::EnvFilter;

use triatlon_web::api::{self, AppState};
use triatlon_web::config::Settings;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let addr = settings.bind_addr;

    tracing::info!(
        backend = %settings.backend_url,
        deadline = %settings.registration_deadline,
        "Starting registration service"
    );

    let state = AppState::new(settings)?;
    let app = api::router(state);

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
