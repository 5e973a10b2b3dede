//! Serve command - JSON API over the content repository

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_store::ContentRepository;
use tokio::net::TcpListener;

use crate::server::create_router;

/// Run the serve command.
///
/// Loads the repository once, then serves it until interrupted.
pub async fn run(config: &Config, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.server.port);
    tracing::info!(root = %config.content.root.display(), port, "Starting server");

    let repo = Arc::new(ContentRepository::load(config));
    let skipped: usize = repo.collections().map(|c| c.issues().len()).sum();
    if skipped > 0 {
        println!("  ⚠ {skipped} file(s) skipped; run `folio check` for details");
    }

    let app = create_router(repo, config.site.clone());

    let addr = format!("{}:{port}", config.server.host);
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!("Serving content API at http://{addr}/api/collections");
    println!("Press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .wrap_err("Server error")?;

    Ok(())
}
