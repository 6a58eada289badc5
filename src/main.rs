use std::sync::Arc;

mod calc;
mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // Open log files before anything else so startup failures are recorded
    logger::init(&cfg)?;

    // Single-threaded runtime: every connection runs on this thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr, cfg.server.backlog).map_err(|e| {
        logger::error(&format!("Failed to bind {addr}: {e}"));
        e
    })?;
    let local_addr = listener.local_addr()?;

    let state = Arc::new(config::AppState::new(&cfg));
    server::signal::start_signal_handler(Arc::clone(&state.shutdown));

    logger::log_server_start(&local_addr, &cfg);

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state))
        .await;
    Ok(())
}
