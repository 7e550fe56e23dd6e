use crate::cli::Cli;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5252";

/// 2 MiB, the largest file the backend accepts.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Request body cap for the whole multipart form. Must stay above
    /// `backend.max_upload_bytes` so oversize files reach the size check.
    pub max_request_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    /// Backend base URL, trailing slashes stripped at load time.
    pub base_url: String,
    pub max_upload_bytes: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub log_level: String,
    /// OTLP gRPC collector, e.g. http://tempo:4317. Spans stay local when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl BackendSettings {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn configuration_directory(cli: &Cli) -> Result<PathBuf, config::ConfigError> {
    if let Some(dir) = &cli.config_dir {
        return Ok(dir.clone());
    }

    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;

    // Running from the crate directory or from the workspace root
    Ok(if base_path.ends_with("doc-intelligence-frontend") {
        base_path.join("config")
    } else {
        base_path.join("doc-intelligence-frontend").join("config")
    })
}

/// Layer defaults, `config/base.yaml`, `APP_*` environment variables and CLI
/// flags, in increasing precedence.
pub fn get_configuration(cli: &Cli) -> Result<Settings, config::ConfigError> {
    let configuration_directory = configuration_directory(cli)?;

    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8501_i64)?
        .set_default("server.max_request_bytes", 10_i64 * 1024 * 1024)?
        .set_default("backend.base_url", DEFAULT_API_BASE_URL)?
        .set_default("backend.max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as i64)?
        .set_default("telemetry.log_level", "info")?
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("backend.base_url", cli.api_base_url.clone())?
        .set_override_option("server.host", cli.host.clone())?
        .set_override_option("server.port", cli.port.map(i64::from))?
        .set_override_option("telemetry.log_level", cli.log_level.clone())?
        .build()?;

    let mut settings = settings.try_deserialize::<Settings>()?;
    settings.backend.base_url = normalize_base_url(&settings.backend.base_url);

    if settings.backend.base_url.is_empty() {
        return Err(config::ConfigError::Message(
            "backend.base_url must not be empty".to_string(),
        ));
    }

    Ok(settings)
}
