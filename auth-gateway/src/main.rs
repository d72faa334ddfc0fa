// auth-gateway/src/main.rs
use common::{setup_tracing, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Setup tracing
    setup_tracing();

    // Load configuration
    let config = Config::from_env();

    let (server, addr) = auth_gateway::run(config)?;

    tracing::info!("Starting Auth Gateway on {}", addr);

    server.await
}
