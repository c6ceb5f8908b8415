//! 上传目录与目标路径解析。

use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::ErrorKind;

#[derive(Clone, Debug)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub async fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// 解析上传目标路径：`name` 必须是已清理的单段文件名，结果一定是根目录的直接子项。
    pub async fn resolve_upload_target(&self, name: &str) -> Result<PathBuf, StorageError> {
        let target = self.resolve(name)?;
        self.ensure_plain_leaf(&target).await?;
        Ok(target)
    }

    /// 创建或截断目标文件；unix 下不跟随符号链接。
    pub async fn create_file(&self, target: &Path) -> Result<File, StorageError> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.custom_flags(libc::O_NOFOLLOW);
        Ok(options.open(target).await?)
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(segment)), None) => Ok(self.root.join(segment)),
            _ => Err(StorageError::InvalidPath),
        }
    }

    async fn ensure_plain_leaf(&self, target: &Path) -> Result<(), StorageError> {
        match fs::symlink_metadata(target).await {
            Ok(metadata) if metadata.file_type().is_symlink() || metadata.is_dir() => {
                Err(StorageError::InvalidPath)
            }
            Ok(_) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }
}

/// 把客户端提供的文件名收敛为单个路径段。
///
/// 按 `/` 与 `\` 去掉目录部分并丢弃控制字符；没有可用内容时返回 `None`。
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return None;
    }
    Some(cleaned.to_string())
}

#[derive(Debug)]
pub enum StorageError {
    InvalidPath,
    Io(io::Error),
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::InvalidPath => f.write_str("invalid path"),
            StorageError::Io(err) => write!(f, "{err}"),
        }
    }
}
