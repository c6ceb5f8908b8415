//! 上传目录的静态文件服务，屏蔽目录列表。

use axum::body::Body as AxumBody;
use axum::http::Request;
use axum::{middleware, response::Response};
use std::path::Path;
use tower_http::services::ServeDir;
use tracing::debug;

use crate::error::ApiError;

/// 以 `/` 结尾的路径一律返回 404，不进入文件服务。
pub async fn no_index(
    req: Request<AxumBody>,
    next: middleware::Next,
) -> Result<Response, ApiError> {
    if req.uri().path().ends_with('/') {
        debug!(path = req.uri().path(), "directory listing suppressed");
        return Err(ApiError::NotFound);
    }
    Ok(next.run(req).await)
}

/// 上传目录的文件服务；目录请求不回退到 index.html。
pub fn serve_dir(root: &Path) -> ServeDir {
    ServeDir::new(root).append_index_html_on_directories(false)
}
