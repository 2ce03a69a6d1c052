//! Environment configuration

use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_DOCUMENT_PATH: &str = "kanjidic/kanjidic.json";
const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Server settings read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub document_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub cache_capacity: usize,
}

impl Config {
    /// `KANJIDIC_PATH`, `HOST`, `PORT`, `ELIGIBILITY_CACHE_CAPACITY`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port.parse().with_context(|| format!("invalid PORT: {}", port))?,
            None => 3000,
        };
        let cache_capacity = match lookup("ELIGIBILITY_CACHE_CAPACITY") {
            Some(n) => n
                .parse()
                .with_context(|| format!("invalid ELIGIBILITY_CACHE_CAPACITY: {}", n))?,
            None => DEFAULT_CACHE_CAPACITY,
        };

        Ok(Self {
            document_path: lookup("KANJIDIC_PATH")
                .unwrap_or_else(|| DEFAULT_DOCUMENT_PATH.to_string())
                .into(),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            cache_capacity,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
