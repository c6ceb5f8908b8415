//! 单文件 multipart 上传处理器。

use axum::body::Body as AxumBody;
use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{Extension, Multipart};
use axum::http::{Method, Request};
use axum::{middleware, response::Response};
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

use crate::config::{FILES_ROUTE, UrlStyle};
use crate::error::ApiError;
use crate::storage::{Storage, StorageError, sanitize_file_name};

#[derive(Debug)]
pub struct UploadConfig {
    pub field_name: String,
    pub url_prefix: String,
    pub url_style: UrlStyle,
}

impl UploadConfig {
    /// 拼接上传成功后返回的公开地址。
    pub fn public_url(&self, name: &str) -> String {
        let prefix = self.url_prefix.trim_end_matches('/');
        match self.url_style {
            UrlStyle::Prefix => format!("{prefix}/{name}"),
            UrlStyle::Files => format!("{prefix}{FILES_ROUTE}/{name}"),
        }
    }
}

/// 仅允许 POST，其余方法在认证之前直接返回 400。
pub async fn require_post(
    req: Request<AxumBody>,
    next: middleware::Next,
) -> Result<Response, ApiError> {
    if req.method() != Method::POST {
        debug!(method = %req.method(), "upload rejected, not a POST");
        return Err(ApiError::BadRequest);
    }
    Ok(next.run(req).await)
}

/// 接收上传：取出配置字段中的文件，流式写入上传目录并返回公开地址。
pub async fn upload_file(
    Extension(storage): Extension<Arc<Storage>>,
    Extension(upload): Extension<Arc<UploadConfig>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, ApiError> {
    let field_name = upload.field_name.as_str();
    let mut multipart = multipart.map_err(|err| field_failed(field_name, err))?;

    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|err| field_failed(field_name, err))?
            .ok_or_else(|| field_failed(field_name, "field not present"))?;
        if field.name() != Some(field_name) {
            debug!(field = field.name(), "skipping multipart field");
            continue;
        }
        return store_field(field, &storage, &upload).await;
    }
}

async fn store_field(
    mut field: Field<'_>,
    storage: &Storage,
    upload: &UploadConfig,
) -> Result<String, ApiError> {
    let field_name = upload.field_name.as_str();
    let Some(raw_name) = field.file_name().map(str::to_owned) else {
        return Err(field_failed(field_name, "part has no file name"));
    };
    let Some(name) = sanitize_file_name(&raw_name) else {
        error!(field = field_name, file_name = raw_name, "unusable file name");
        return Err(ApiError::Internal);
    };
    if name != raw_name {
        debug!(file_name = raw_name, stored = name, "file name sanitized");
    }

    let destination = storage.root_path().join(&name);
    let target = storage
        .resolve_upload_target(&name)
        .await
        .map_err(|err| create_failed(&destination, err))?;
    let mut file = storage
        .create_file(&target)
        .await
        .map_err(|err| create_failed(&destination, err))?;

    let mut written: u64 = 0;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|err| write_failed(&destination, err))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|err| write_failed(&destination, err))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .map_err(|err| write_failed(&destination, err))?;

    info!(name, bytes = written, "upload stored");
    Ok(upload.public_url(&name))
}

fn field_failed(field: &str, err: impl Display) -> ApiError {
    error!(field, error = %err, "error getting file from field");
    ApiError::Internal
}

fn create_failed(destination: &Path, err: StorageError) -> ApiError {
    error!(destination = %destination.display(), error = %err, "failed to create output file");
    err.into()
}

fn write_failed(destination: &Path, err: impl Display) -> ApiError {
    error!(destination = %destination.display(), error = %err, "failed to write to output file");
    ApiError::Internal
}
