//! AxoDrop server binary.
//!
//! A single-endpoint upload service: `POST /upload` streams one multipart
//! file into the upload directory behind optional basic auth, and
//! `GET /files/<name>` serves stored files back without directory listings.

mod auth;
mod config;
mod error;
mod files;
mod http;
mod logging;
mod router;
mod storage;
#[cfg(test)]
mod test_support;
mod tls;
mod upload;

use axum_server::Handle;
use clap::Parser;
use shadow_rs::shadow;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

use crate::auth::AuthConfig;
use crate::config::{Args, SHUTDOWN_GRACE_SECS};
use crate::storage::Storage;
use crate::upload::UploadConfig;

shadow!(build);

/// Starts the AxoDrop server and blocks until shutdown.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let args = Args::parse();
    logging::init_logging(&args.log);

    let storage = Arc::new(Storage::new(args.upload_dir.clone()));
    storage.ensure_root().await?;
    let auth_config = if args.no_auth {
        warn!("basic auth disabled, uploads are open to anyone");
        None
    } else {
        Some(Arc::new(AuthConfig {
            username: args.auth_user.clone(),
            password: args.auth_pass.clone(),
        }))
    };
    let upload_config = Arc::new(UploadConfig {
        field_name: args.field.clone(),
        url_prefix: args.url_prefix.clone(),
        url_style: args.url_style,
    });

    let app = router::build_router(
        storage.clone(),
        auth_config,
        upload_config,
        args.max_upload_size,
    );
    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
    let handle = Handle::new();

    tokio::spawn(shutdown_signal(handle.clone()));
    match (args.tls_cert.as_deref(), args.tls_key.as_deref()) {
        (Some(cert), Some(key)) => {
            let tls_config = tls::load_rustls_config(cert, key).await?;
            info!(
                listen = %args.listen,
                upload_dir = %storage.root_path().display(),
                "starting HTTPS server"
            );
            axum_server::bind_rustls(args.listen, tls_config)
                .handle(handle)
                .serve(make_service)
                .await?;
        }
        _ => {
            info!(
                listen = %args.listen,
                upload_dir = %storage.root_path().display(),
                "starting HTTP server"
            );
            axum_server::bind(args.listen)
                .handle(handle)
                .serve(make_service)
                .await?;
        }
    }

    Ok(())
}

async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("received termination signal, shutting down");
    handle.graceful_shutdown(Some(Duration::from_secs(SHUTDOWN_GRACE_SECS)));
}
