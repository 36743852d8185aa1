use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the backend under test, including the API prefix
    #[arg(long)]
    pub base_url: Option<String>,

    /// client_name sent when creating a status check record
    #[arg(long)]
    pub client_name: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Default log filter when RUST_LOG is not set
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub client_name: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8001/api".to_string(),
            client_name: "setup-check".to_string(),
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Build config from CLI args and defaults
    pub fn build(args: Option<Args>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(args) = args {
            if let Some(base_url) = args.base_url {
                config.base_url = base_url;
            }
            if let Some(client_name) = args.client_name {
                config.client_name = client_name;
            }
            if let Some(request_timeout_secs) = args.request_timeout_secs {
                config.request_timeout_secs = request_timeout_secs;
            }
            if let Some(log_level) = args.log_level {
                config.log_level = log_level;
            }
        }

        reqwest::Url::parse(&config.base_url)
            .with_context(|| format!("invalid base URL `{}`", config.base_url))?;
        if config.client_name.is_empty() {
            anyhow::bail!("`client_name` can't be empty");
        }

        Ok(config)
    }

    pub fn request_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Initialize logging with env_logger, RUST_LOG wins when set
    pub fn init_logging(&self) -> String {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.log_level),
        )
        .init();
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.log_level.clone())
    }
}
