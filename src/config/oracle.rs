// src/config/oracle.rs
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_ORACLE_CONFIG_PATH: &str = "config/oracle.json";
pub const ENV_ORACLE_CONFIG_PATH: &str = "ORACLE_CONFIG_PATH";
pub const ENV_LIBRETRANSLATE_API_KEY: &str = "LIBRETRANSLATE_API_KEY";

fn default_provider() -> String {
    "libretranslate".to_string()
}
fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}
fn default_timeout_ms() -> u64 {
    3_000
}
fn default_min_confidence() -> f32 {
    0.7
}
fn default_native_languages() -> Vec<String> {
    vec!["en".into(), "fr".into(), "wo".into()]
}
fn default_target_language() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    pub enabled: bool,
    /// "libretranslate" | "disabled" (case-insensitive)
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// "ENV" means: read from LIBRETRANSLATE_API_KEY
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Detection confidence must exceed this to translate. Clamped to [0,1].
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
    #[serde(default = "default_native_languages")]
    pub native_languages: Vec<String>,
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_provider(),
            base_url: default_base_url(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            min_confidence: default_min_confidence(),
            native_languages: default_native_languages(),
            target_language: default_target_language(),
        }
    }
}

impl OracleConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read oracle config at {}: {}", path.display(), e)
        })?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> anyhow::Result<Self> {
        let mut cfg: OracleConfig = serde_json::from_str(data)?;

        // Normalize provider
        cfg.provider = cfg.provider.trim().to_lowercase();
        match cfg.provider.as_str() {
            "libretranslate" | "disabled" => {}
            other => anyhow::bail!("Unsupported oracle provider in config: {other}"),
        }

        // Resolve api key if "ENV"
        if let Some(key) = &cfg.api_key {
            if key.trim().eq_ignore_ascii_case("env") {
                cfg.api_key = Some(env::var(ENV_LIBRETRANSLATE_API_KEY).map_err(|_| {
                    anyhow::anyhow!("Missing {ENV_LIBRETRANSLATE_API_KEY} env var")
                })?);
            }
        }

        // Sanitize numbers
        if !cfg.min_confidence.is_finite() {
            cfg.min_confidence = default_min_confidence();
        }
        cfg.min_confidence = cfg.min_confidence.clamp(0.0, 1.0);
        if cfg.timeout_ms == 0 {
            cfg.timeout_ms = default_timeout_ms();
        }
        cfg.target_language = cfg.target_language.trim().to_lowercase();
        if cfg.target_language.is_empty() {
            cfg.target_language = default_target_language();
        }

        Ok(cfg)
    }

    /// Resolve config:
    /// 1) $ORACLE_CONFIG_PATH (must exist)
    /// 2) config/oracle.json
    /// 3) built-in default (oracle disabled)
    pub fn load_default() -> anyhow::Result<Self> {
        if let Ok(p) = env::var(ENV_ORACLE_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                anyhow::bail!("{ENV_ORACLE_CONFIG_PATH} points to non-existent path");
            }
            return Self::load_from_file(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_ORACLE_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from_file(&default_p);
        }
        Ok(Self::default())
    }
}
