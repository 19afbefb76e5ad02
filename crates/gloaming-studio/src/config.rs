use std::path::PathBuf;

use anyhow::Context;

pub const SEED_VAR: &str = "GLOAMING_SEED";
pub const CONTENT_DIR_VAR: &str = "GLOAMING_CONTENT_DIR";
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// Studio settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    /// Fixes the foliage layout and sprite rolls when set.
    pub seed: Option<u64>,
    /// Directory holding `excerpt-<id>.html` files.
    pub content_dir: PathBuf,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            seed: None,
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
        }
    }
}

impl StudioConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let seed = get(SEED_VAR)
            .map(|raw| raw.trim().parse::<u64>().with_context(|| format!("{SEED_VAR}={raw:?} is not a u64")))
            .transpose()?;

        let content_dir = get(CONTENT_DIR_VAR).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR));

        Ok(Self { seed, content_dir })
    }
}
