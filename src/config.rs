// config.rs
use anyhow::{anyhow, bail, Context};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl StorageBackend {
    pub fn to_str(&self) -> &str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Postgres => "postgres",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub storage_backend: StorageBackend,
    pub port: u16,
    pub max_connections: u32,
    pub seed_sample_data: bool,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn init() -> anyhow::Result<Config> {
        Config::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source so it can be
    /// exercised without touching the process environment.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = var("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let storage_backend = match var("STORAGE_BACKEND").as_deref().map(str::trim) {
            Some("memory") => StorageBackend::Memory,
            Some("postgres") => StorageBackend::Postgres,
            Some(other) => bail!("STORAGE_BACKEND must be 'memory' or 'postgres', got '{}'", other),
            None if database_url.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Memory,
        };

        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL must be set when STORAGE_BACKEND is postgres"));
        }

        let port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", port))?,
            None => 8000,
        };

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(max) => max.trim().parse::<u32>().with_context(|| {
                format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got '{}'", max)
            })?,
            None => 10,
        };

        let seed_sample_data = match var("SEED_SAMPLE_DATA").as_deref().map(str::trim) {
            None => true,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => bail!("SEED_SAMPLE_DATA must be true or false, got '{}'", other),
        };

        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Config {
            database_url,
            storage_backend,
            port,
            max_connections,
            seed_sample_data,
            allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_memory_without_database_url() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_connections, 10);
        assert!(config.seed_sample_data);
        assert_eq!(config.allowed_origins, vec!["http://localhost:5173".to_string()]);
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/realty")]).unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Postgres);

        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/realty"),
            ("STORAGE_BACKEND", "memory"),
        ])
        .unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Memory);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("STORAGE_BACKEND", "postgres")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "sqlite")]).is_err());
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("SEED_SAMPLE_DATA", "maybe")]).is_err());
    }

    #[test]
    fn test_allowed_origins_are_split() {
        let config = config_from(&[(
            "ALLOWED_ORIGINS",
            "http://localhost:5173, https://realty.example.com,",
        )])
        .unwrap();
        assert_eq!(
            config.allowed_origins,
            vec![
                "http://localhost:5173".to_string(),
                "https://realty.example.com".to_string()
            ]
        );
    }
}
