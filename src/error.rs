//! 统一的 API 错误类型与转换。
//!
//! 所有错误只返回状态码与空响应体，具体原因在检测处写入日志。

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::storage::StorageError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest,
    Unauthorized(HeaderMap),
    Forbidden,
    NotFound,
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Unauthorized(headers) => (status, headers).into_response(),
            _ => status.into_response(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(_: StorageError) -> Self {
        ApiError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn error_bodies_are_empty() {
        for error in [
            ApiError::BadRequest,
            ApiError::Forbidden,
            ApiError::NotFound,
            ApiError::Internal,
        ] {
            let expected = error.status();
            let response = error.into_response();
            assert_eq!(response.status(), expected);
            let body = response.into_body().collect().await.expect("body").to_bytes();
            assert!(body.is_empty());
        }
    }

    #[test]
    fn unauthorized_keeps_challenge_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static(r#"Basic realm="upload""#),
        );
        let response = ApiError::Unauthorized(headers).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[test]
    fn storage_errors_map_to_internal() {
        let error = ApiError::from(StorageError::InvalidPath);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
