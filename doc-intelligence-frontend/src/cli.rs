use clap::Parser;
use std::path::PathBuf;

/// Command-line flags. Anything set here wins over `config/base.yaml` and
/// `APP_*` environment variables.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "doc-intelligence-frontend", version, about = "Document Intelligence web front-end")]
pub struct Cli {
    /// Base URL for backend API, e.g., https://api.example.com
    #[arg(long = "api-base-url", env = "API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Address to bind the HTTP server to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind the HTTP server to
    #[arg(long)]
    pub port: Option<u16>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long = "log-level")]
    pub log_level: Option<String>,

    /// Directory holding base.yaml
    #[arg(long = "config-dir")]
    pub config_dir: Option<PathBuf>,
}
