//! Layered configuration.
//!
//! Priority, highest first: CLI flag (or its env var) > `RAG_CHAT_`-prefixed
//! environment (`RAG_CHAT_SERVER__PORT=8000`) > config file > defaults.

use std::path::Path;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

/// Default greeting shown as the first assistant turn.
pub const DEFAULT_WELCOME: &str = "Hello! I'm your NASA RAG Assistant. Ask me anything about \
                                   space missions, research, or NASA projects.";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_QUERY_URL: &str = "http://127.0.0.1:8000/query";
pub const DEFAULT_TITLE: &str = "NASA RAG Assistant";
pub const DEFAULT_NOTICE_DISMISS_MS: u64 = 4000;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = crate::session::DEFAULT_IDLE_TIMEOUT.as_secs();
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// URL of the RAG query endpoint
    #[arg(long, env = "RAG_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Emit JSON logs
    #[arg(long, env = "LOG_JSON")]
    pub log_json: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub ui: UiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub query_url: Url,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub title: String,
    pub welcome_message: String,
    /// Offset applied to turn timestamps before formatting.
    pub utc_offset_minutes: i32,
    pub notice_dismiss_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub json: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.static_dir", DEFAULT_STATIC_DIR)?
            .set_default("backend.query_url", DEFAULT_QUERY_URL)?
            .set_default("ui.title", DEFAULT_TITLE)?
            .set_default("ui.welcome_message", DEFAULT_WELCOME)?
            .set_default("ui.utc_offset_minutes", 0)?
            .set_default("ui.notice_dismiss_ms", DEFAULT_NOTICE_DISMISS_MS)?
            .set_default("session.idle_timeout_secs", DEFAULT_IDLE_TIMEOUT_SECS)?
            .set_default("session.sweep_interval_secs", DEFAULT_SWEEP_INTERVAL_SECS)?
            .set_default("logging.json", false)?;

        // Explicit file must exist; ./config.yaml is picked up if present.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::from(Path::new("config.yaml")).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("RAG_CHAT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.query_url", url)?;
        }
        if let Some(json) = cli.log_json {
            builder = builder.set_override("logging.json", json)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Defaults only, with the query endpoint at `query_url`.
    #[must_use]
    pub fn with_query_url(query_url: Url) -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                static_dir: DEFAULT_STATIC_DIR.to_string(),
            },
            backend: BackendConfig { query_url },
            ui: UiConfig {
                title: DEFAULT_TITLE.to_string(),
                welcome_message: DEFAULT_WELCOME.to_string(),
                utc_offset_minutes: 0,
                notice_dismiss_ms: DEFAULT_NOTICE_DISMISS_MS,
            },
            session: SessionConfig {
                idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
                sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            },
            logging: LoggingConfig { json: false },
        }
    }

    /// `host:port` to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
