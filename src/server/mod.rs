//! Development server
//!
//! Serves the generated public directory and, in watch mode, reruns the
//! build whenever the content root or the site config changes.

use anyhow::Result;
use axum::Router;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::services::ServeDir;

use crate::Blog;

/// Start the development server
pub async fn start(blog: &Blog, ip: &str, port: u16, watch: bool) -> Result<()> {
    let serve_dir = ServeDir::new(&blog.public_dir).append_index_html_on_directories(true);
    let app = Router::new().fallback_service(serve_dir);

    // handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching for changes. Refresh the browser after a rebuild.");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let blog = blog.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_rebuild(blog) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch for file changes and rerun the build
fn watch_and_rebuild(blog: Blog) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // debounce to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if blog.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&blog.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", blog.content_dir);
    }

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path_str = e.path.to_string_lossy();
                        !path_str.contains(".git") && !path_str.ends_with('~')
                    })
                    .collect();

                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    tracing::info!("File changed: {}", event.path.display());
                }

                match blog.generate() {
                    Ok(_) => tracing::info!("Regenerated"),
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}
