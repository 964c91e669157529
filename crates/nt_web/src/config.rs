use nt_core::{CatalogMode, Error, Result};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_FILE: &str = "response.json";
pub const DEFAULT_CATEGORIES_FILE: &str = "categories.json";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub categories_file: PathBuf,
    pub mode: CatalogMode,
    /// Enables the API key check on `/api` routes
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            categories_file: PathBuf::from(DEFAULT_CATEGORIES_FILE),
            mode: CatalogMode::default(),
            api_key: None,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("Host cannot be empty".into()));
        }
        if self.port == 0 {
            return Err(Error::Config("Port cannot be 0".into()));
        }
        if let Some(key) = &self.api_key {
            if key.trim().is_empty() {
                return Err(Error::Config("API key cannot be empty".into()));
            }
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
