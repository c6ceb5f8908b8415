//! 上传接口的 Basic 认证中间件。

use axum::extract::Extension;
use axum::http::{HeaderMap, HeaderValue, Request, header};
use axum::{body::Body as AxumBody, middleware, response::Response};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use std::sync::Arc;
use tracing::error;

use crate::config::AUTH_REALM;
use crate::error::ApiError;

#[derive(Debug)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    fn matches(&self, credentials: &Authorization<Basic>) -> bool {
        credentials.username() == self.username && credentials.password() == self.password
    }
}

/// 认证中间件：缺少凭据返回 401，凭据错误返回 403。
pub async fn require_basic_auth(
    Extension(auth): Extension<Arc<AuthConfig>>,
    req: Request<AxumBody>,
    next: middleware::Next,
) -> Result<Response, ApiError> {
    let Some(credentials) = req.headers().typed_get::<Authorization<Basic>>() else {
        error!("missing basic auth");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static(AUTH_REALM),
        );
        return Err(ApiError::Unauthorized(headers));
    };

    if !auth.matches(&credentials) {
        error!(username = credentials.username(), "wrong username/password");
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}
