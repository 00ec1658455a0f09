use mimalloc::MiMalloc;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use train_ticket_system::{app, config::Config, ledger::Ledger, AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Train Ticket API ({})", config.app.environment);

    // The ledger is built once and never reconstructed while serving
    let ledger = Ledger::new(&config.seating);
    info!(
        "Seat ledger ready: {} seats in section A, {} in section B",
        config.seating.section_a_seats, config.seating.section_b_seats
    );

    let addr: SocketAddr = format!("{}:{}", config.app.host, config.app.port)
        .parse()
        .expect("HOST and PORT must form a valid socket address");

    let app_state = Arc::new(AppState { ledger, config });
    let app = app(app_state);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
