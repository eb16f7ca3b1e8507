pub mod app;
pub mod auth;
pub mod config;
pub mod diet;
pub mod error;
pub mod exercises;
pub mod fitness;
pub mod gateway;
pub mod pages;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

/// `RUST_LOG` filter, `LOG_FORMAT=json` for JSON lines.
pub fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "dietfit=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}
