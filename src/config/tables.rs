// src/config/tables.rs
//! Optional TOML overlay for the scoring tables.
//!
//! ```toml
//! negations = ["waaw"]                     # extra markers
//! emotive_patterns = ["xd", "haha"]        # replaces the default list
//!
//! [lexicon]
//! "kontaan" = 3.0                          # overrides / adds valences
//!
//! [intensifiers]
//! "lool" = 1.5
//! "bu baax" = 1.3                          # phrases contain a space
//! ```
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyze::{EmotionalPatterns, SentimentTables};

pub const ENV_TABLES_PATH: &str = "SENTIMENT_TABLES_PATH";
pub const DEFAULT_TABLES_PATH: &str = "config/tables.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TablesOverlay {
    pub negations: Vec<String>,
    pub emotive_patterns: Option<Vec<String>>,
    pub lexicon: HashMap<String, f32>,
    pub intensifiers: HashMap<String, f32>,
}

impl TablesOverlay {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading tables overlay from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing tables overlay {}", path.display()))
    }

    /// Apply on top of `tables`. Fails on a non-finite valence, a lexicon key
    /// that is not a single token, an invalid multiplier or an invalid pattern.
    pub fn apply(self, tables: &mut SentimentTables) -> Result<()> {
        if let Some((word, v)) = self.lexicon.iter().find(|(_, v)| !v.is_finite()) {
            return Err(anyhow!("lexicon entry `{word}` has non-finite valence {v}"));
        }
        // The scorer looks up whitespace-split tokens only.
        if let Some(word) = self
            .lexicon
            .keys()
            .find(|w| w.trim().is_empty() || w.contains(char::is_whitespace))
        {
            return Err(anyhow!("lexicon entry `{word}` must be a single word"));
        }
        tables.lexicon.overlay(self.lexicon);

        for (key, mult) in &self.intensifiers {
            tables.intensifiers.insert(key, *mult)?;
        }

        tables.negations.extend(self.negations);

        if let Some(patterns) = self.emotive_patterns {
            tables.patterns = EmotionalPatterns::from_patterns(patterns)?;
        }
        Ok(())
    }
}

/// Built-in tables plus the overlay found via:
/// 1) $SENTIMENT_TABLES_PATH (must exist)
/// 2) config/tables.toml
/// 3) none (built-ins only)
pub fn load_tables_default() -> Result<SentimentTables> {
    let mut tables = SentimentTables::builtin();
    if let Some(path) = overlay_path()? {
        TablesOverlay::load_from(&path)?.apply(&mut tables)?;
        tracing::info!(path = %path.display(), "tables overlay applied");
    }
    Ok(tables)
}

fn overlay_path() -> Result<Option<PathBuf>> {
    if let Ok(p) = std::env::var(ENV_TABLES_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return Ok(Some(pb));
        }
        return Err(anyhow!("{ENV_TABLES_PATH} points to non-existent path"));
    }
    let default_p = PathBuf::from(DEFAULT_TABLES_PATH);
    Ok(default_p.exists().then_some(default_p))
}
