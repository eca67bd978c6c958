//! Service configuration: artifact paths and bind address, loaded from TOML
//! with an env override for the config path. Blend weights are not
//! configuration; they are fixed in `blend`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/predictor.toml";
pub const ENV_CONFIG_PATH: &str = "PREDICTOR_CONFIG_PATH";

fn default_model_a() -> PathBuf {
    PathBuf::from("models/model_a.json")
}
fn default_model_b() -> PathBuf {
    PathBuf::from("models/model_b.json")
}
fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    #[serde(default)]
    pub models: ModelPaths,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelPaths {
    #[serde(default = "default_model_a")]
    pub model_a: PathBuf,
    #[serde(default = "default_model_b")]
    pub model_b: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            model_a: default_model_a(),
            model_b: default_model_b(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            models: ModelPaths::default(),
            server: ServerConfig::default(),
        }
    }
}

impl PredictorConfig {
    /// Load from `$PREDICTOR_CONFIG_PATH`, else `config/predictor.toml`,
    /// else fall back to built-in defaults when no file exists.
    pub fn load() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            return Self::from_file(Path::new(&p));
        }
        let default = Path::new(DEFAULT_CONFIG_PATH);
        if default.exists() {
            return Self::from_file(default);
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading predictor config at {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("parsing predictor config at {}", path.display()))
    }
}
