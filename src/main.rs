use zhongwen_backend_rust::config::ServerConfig;
use zhongwen_backend_rust::logging;
use zhongwen_backend_rust::state::AppState;
use zhongwen_backend_rust::create_app_with;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = ServerConfig::from_env();
    let _log_guard = logging::init_tracing(&config.log);

    let state = AppState::from_env();
    let app = create_app_with(state);

    let addr = config.bind_addr();
    tracing::info!(%addr, "zhongwen-backend listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener failed");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        tracing::error!(error = %e, "server error");
    }

    tracing::info!("HTTP server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
