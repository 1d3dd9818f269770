//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Document path cannot be empty")]
    EmptyDocumentPath,

    #[error("Index persist_dir cannot be empty")]
    EmptyPersistDir,

    #[error("Invalid chunk_size: {0}. Must be greater than 0")]
    InvalidChunkSize(usize),

    #[error(
        "Invalid chunk_overlap: {overlap}. Must be greater than 0 and less than chunk_size ({size})"
    )]
    InvalidChunkOverlap { overlap: usize, size: usize },

    #[error("Invalid top_k: {0}. Must be greater than 0")]
    InvalidTopK(usize),

    #[error("Invalid rerank_k: {rerank_k}. Must be between 1 and top_k ({top_k})")]
    InvalidRerankK { rerank_k: usize, top_k: usize },

    #[error("Invalid embedding dimension: {0}. Must be greater than 0")]
    InvalidDimension(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. docquery.yaml in the working directory
    /// 3. Environment variables (DOCQUERY_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("docquery.yaml"))
            .merge(Env::prefixed("DOCQUERY_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, then apply env overrides.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("DOCQUERY_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.document.path.is_empty() {
            return Err(ConfigError::EmptyDocumentPath);
        }

        if config.index.persist_dir.is_empty() {
            return Err(ConfigError::EmptyPersistDir);
        }

        if config.chunking.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(config.chunking.chunk_size));
        }

        if config.chunking.chunk_overlap == 0
            || config.chunking.chunk_overlap >= config.chunking.chunk_size
        {
            return Err(ConfigError::InvalidChunkOverlap {
                overlap: config.chunking.chunk_overlap,
                size: config.chunking.chunk_size,
            });
        }

        if config.retrieval.top_k == 0 {
            return Err(ConfigError::InvalidTopK(config.retrieval.top_k));
        }

        if config.retrieval.rerank_k == 0 || config.retrieval.rerank_k > config.retrieval.top_k {
            return Err(ConfigError::InvalidRerankK {
                rerank_k: config.retrieval.rerank_k,
                top_k: config.retrieval.top_k,
            });
        }

        if config.embedding.dimension == 0 {
            return Err(ConfigError::InvalidDimension(config.embedding.dimension));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
