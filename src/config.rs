use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Postgres connection string
    pub pg_dsn: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Path prefix all resource routes are nested under
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

const fn default_pool_size() -> usize {
    16
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error(
        "config file not found and environment variables are incomplete. \
         Tried: '{tried}', 'config.yaml', 'config.example.yaml', and environment variables. \
         Error: {source}"
    )]
    Env { tried: String, source: envy::Error },
}

fn load_from_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;

    from_yaml(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

pub fn from_yaml(contents: &str) -> Result<Config, serde_yaml::Error> {
    serde_yaml::from_str(contents)
}

/// Reads `PG_DSN`, `BIND_ADDR`, `POOL_SIZE` and `API_PREFIX`.
pub fn from_env_vars<I>(vars: I) -> Result<Config, envy::Error>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::from_iter(vars)
}

pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path = env::var("NOTEFUL_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return load_from_file("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return load_from_file("config.example.yaml");
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match from_env_vars(env::vars()) {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(source) => Err(ConfigError::Env {
            tried: config_path,
            source,
        }),
    }
}
