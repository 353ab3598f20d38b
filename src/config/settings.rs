use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub daemon: DaemonSettings,
    #[serde(default)]
    pub frontend: FrontendSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_cors_origin")]
    pub cors_allow_origin: String,
    #[serde(default = "default_cors_methods")]
    pub cors_allow_methods: String,
    #[serde(default = "default_cors_headers")]
    pub cors_allow_headers: String,
}

// Default functions for CORS settings
fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_cors_methods() -> String {
    "GET, OPTIONS".to_string()
}

fn default_cors_headers() -> String {
    "Content-Type".to_string()
}

/// Where the upstream daemon lives and how we identify our JSON-RPC calls.
#[derive(Debug, Deserialize, Clone)]
pub struct DaemonSettings {
    pub endpoint: String,
    #[serde(default = "default_request_id")]
    pub request_id: String,
}

fn default_request_id() -> String {
    "0".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct FrontendSettings {
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

fn default_static_dir() -> String {
    "./frontend/static".to_string()
}

fn default_index_file() -> String {
    "./frontend/index.html".to_string()
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            index_file: default_index_file(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load("config")
    }

    /// Layers the optional config file at `path` under environment variables
    /// such as `DAEMON__ENDPOINT` or `APPLICATION__PORT`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(Environment::default().separator("__"))
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 8080)?
            .set_default("application.debug", false)?
            .set_default("daemon.endpoint", "http://127.0.0.1:32348")?
            .build()?;

        config.try_deserialize()
    }
}
