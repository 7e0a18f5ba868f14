use dotenvy::dotenv;
use yearbook::router::init_router;
use yearbook::state::init_app_state;
use yearbook_config::ServerConfig;
use yearbook_observability::{init_metrics, init_tracing, metrics_app};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let state = match init_app_state() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Failed to initialize application state");
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
    }

    let server = ServerConfig::from_env();
    let address = server.address();
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("❌ Failed to bind {}: {}", address, e);
            std::process::exit(1);
        }
    };

    println!("🚀 Server running on http://{}", address);
    println!("📚 Swagger UI available at http://{}/swagger-ui", address);
    println!("📖 Scalar UI available at http://{}/scalar", address);
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}
