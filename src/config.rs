//! CLI arguments and server configuration defaults.

use clap::{Parser, ValueEnum};
use shadow_rs::formatcp;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::build;

const VERSION_INFO: &str = formatcp!(
    r#"{}\ncommit_hash: {}\nbuild_time: {}\nbuild_env: {},{}"#,
    build::PKG_VERSION,
    build::SHORT_COMMIT,
    build::BUILD_TIME,
    build::RUST_VERSION,
    build::RUST_CHANNEL
);

pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
pub const DEFAULT_UPLOAD_DIR: &str = "upload";
pub const DEFAULT_URL_PREFIX: &str = "http://127.0.0.1:8080";
pub const DEFAULT_AUTH_USER: &str = "user";
pub const DEFAULT_AUTH_PASS: &str = "pass";
pub const DEFAULT_UPLOAD_FIELD: &str = "file";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const AUTH_REALM: &str = r#"Basic realm="upload""#;
pub const FILES_ROUTE: &str = "/files";
pub const SHUTDOWN_GRACE_SECS: u64 = 10;

/// How the public URL returned after an upload is joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum UrlStyle {
    /// `<prefix>/<name>`
    #[default]
    Prefix,
    /// `<prefix>/files/<name>`
    Files,
}

/// CLI arguments and environment configuration for the server.
#[derive(Parser, Debug)]
#[command(name = "axo-drop", version = VERSION_INFO, about = "AxoDrop upload server")]
pub struct Args {
    #[arg(
        short = 'l',
        long,
        env = "AXO_DROP_LISTEN",
        default_value = DEFAULT_LISTEN,
        help = "IP and port to bind to"
    )]
    pub listen: SocketAddr,
    #[arg(
        short = 'd',
        long,
        env = "AXO_DROP_UPLOAD_DIR",
        default_value = DEFAULT_UPLOAD_DIR,
        help = "Directory for uploaded files, must be writable"
    )]
    pub upload_dir: PathBuf,
    #[arg(
        long,
        env = "AXO_DROP_URL_PREFIX",
        default_value = DEFAULT_URL_PREFIX,
        help = "Public URL to prefix uploaded file names with"
    )]
    pub url_prefix: String,
    #[arg(
        long,
        env = "AXO_DROP_URL_STYLE",
        value_enum,
        default_value_t = UrlStyle::Prefix,
        help = "Join returned URLs as <prefix>/<name> or <prefix>/files/<name>"
    )]
    pub url_style: UrlStyle,
    #[arg(
        long,
        env = "AXO_DROP_AUTH_USER",
        default_value = DEFAULT_AUTH_USER,
        help = "HTTP basic auth username"
    )]
    pub auth_user: String,
    #[arg(
        long,
        env = "AXO_DROP_AUTH_PASS",
        default_value = DEFAULT_AUTH_PASS,
        help = "HTTP basic auth password"
    )]
    pub auth_pass: String,
    #[arg(long, env = "AXO_DROP_NO_AUTH", help = "Accept uploads without basic auth")]
    pub no_auth: bool,
    #[arg(
        short = 'f',
        long,
        env = "AXO_DROP_FIELD",
        default_value = DEFAULT_UPLOAD_FIELD,
        help = "Multipart form field carrying the file"
    )]
    pub field: String,
    #[arg(
        long,
        env = "AXO_DROP_MAX_UPLOAD_SIZE",
        default_value_t = 0,
        help = "Max request body size in bytes (0 to disable)"
    )]
    pub max_upload_size: u64,
    #[arg(short = 'c', long, env = "AXO_DROP_TLS_CERT", requires = "tls_key", help = "TLS cert path")]
    pub tls_cert: Option<PathBuf>,
    #[arg(short = 'k', long, env = "AXO_DROP_TLS_KEY", requires = "tls_cert", help = "TLS key path")]
    pub tls_key: Option<PathBuf>,
    #[arg(
        long,
        env = "AXO_DROP_LOG",
        default_value = DEFAULT_LOG_FILTER,
        help = "Log filter directive, overridden by RUST_LOG"
    )]
    pub log: String,
}
