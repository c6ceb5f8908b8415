//! TLS 证书加载。

use axum_server::tls_rustls::RustlsConfig;
use std::path::Path;
use tracing::info;

/// 从 PEM 文件构建 Rustls 配置。
pub async fn load_rustls_config(cert: &Path, key: &Path) -> Result<RustlsConfig, std::io::Error> {
    let config = RustlsConfig::from_pem_file(cert, key).await?;
    info!(cert = %cert.display(), "loaded tls certificate");
    Ok(config)
}
