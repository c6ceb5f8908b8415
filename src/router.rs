//! 路由组装：上传接口、文件服务与请求日志。

use axum::extract::{DefaultBodyLimit, Extension};
use axum::http::{Request, header};
use axum::routing::any;
use axum::{Router, middleware};
use std::convert::Infallible;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, info_span};

use crate::auth::{self, AuthConfig};
use crate::config::FILES_ROUTE;
use crate::files;
use crate::http::{add_security_headers, request_source};
use crate::storage::Storage;
use crate::upload::{self, UploadConfig};

/// 组装完整路由。
///
/// 中间件顺序固定：请求日志在最外层，其次是安全头；`/upload` 上依次为
/// 方法校验、Basic 认证（`auth` 为 `None` 时不启用）与上传处理器。
pub fn build_router(
    storage: Arc<Storage>,
    auth: Option<Arc<AuthConfig>>,
    upload: Arc<UploadConfig>,
    max_upload_size: u64,
) -> Router {
    let mut upload_route = any(upload::upload_file);
    if let Some(auth) = auth {
        upload_route = upload_route
            .layer::<_, Infallible>(middleware::from_fn(auth::require_basic_auth))
            .layer::<_, Infallible>(Extension(auth));
    }
    let upload_route = upload_route
        .layer::<_, Infallible>(middleware::from_fn(upload::require_post))
        .layer::<_, Infallible>(body_limit(max_upload_size));

    let files_service = ServiceBuilder::new()
        .layer(middleware::from_fn(files::no_index))
        .service(files::serve_dir(storage.root_path()));

    Router::new()
        .route("/upload", upload_route)
        .nest_service(FILES_ROUTE, files_service)
        .layer(middleware::from_fn(add_security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let host = request
                        .headers()
                        .get(header::HOST)
                        .and_then(|value| value.to_str().ok())
                        .or_else(|| request.uri().host())
                        .unwrap_or("");
                    info_span!(
                        "request",
                        source = %request_source(request),
                        method = %request.method(),
                        host,
                        uri = %request.uri(),
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(Extension(storage))
        .layer(Extension(upload))
}

fn body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    match usize::try_from(max_upload_size) {
        Ok(0) | Err(_) => DefaultBodyLimit::disable(),
        Ok(limit) => DefaultBodyLimit::max(limit),
    }
}
