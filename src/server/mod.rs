/// Mock metrics API server
/// Serves the sample and node endpoints the dashboard polls

#[cfg(feature = "server")]
pub mod routes;

#[cfg(feature = "server")]
pub mod handlers;

#[cfg(feature = "server")]
pub use routes::create_router;

/// Bind `addr` and serve the mock API until the process exits
#[cfg(feature = "server")]
pub async fn run(bind_address: &str, enable_cors: bool) -> anyhow::Result<()> {
    use anyhow::Context;
    use std::net::SocketAddr;

    let addr: SocketAddr = bind_address
        .parse()
        .with_context(|| format!("Invalid bind address {}", bind_address))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!("Cluster metrics mock API");
    println!("   API: http://{}/api", addr);
    println!();
    println!("Endpoints:");
    println!("   GET  /api/graph    - One live sample {{ date, close }}");
    println!("   GET  /api/metrics  - Cluster node statuses");
    println!("   GET  /api/health   - Health check");
    println!();

    tracing::info!(%addr, cors = enable_cors, "mock API listening");
    axum::serve(listener, create_router(enable_cors)).await?;

    Ok(())
}

/// Serve the mock API on an ephemeral localhost port in the background
///
/// Returns the base URL to poll and the server task.
#[cfg(feature = "server")]
pub async fn spawn_local() -> anyhow::Result<(String, tokio::task::JoinHandle<()>)> {
    use anyhow::Context;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind mock API")?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, create_router(false)).await {
            tracing::error!(error = %e, "in-process mock API stopped");
        }
    });

    tracing::info!(%addr, "in-process mock API started");
    Ok((format!("http://{}", addr), handle))
}
