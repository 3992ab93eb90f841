use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How the outer loop of a reindex is executed.
///
/// Every mode produces identical output; the choice only affects how the
/// output slots are filled.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Fill output slots one after another on the calling thread.
    Sequential,
    /// Fill output slots on the rayon global pool.
    Parallel,
    /// Parallel once the gather holds at least `parallel_threshold` elements.
    #[default]
    Auto,
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "parallel" => Ok(ExecutionMode::Parallel),
            "auto" => Ok(ExecutionMode::Auto),
            _ => Err(format!(
                "Unknown execution mode: {}. Expected one of `sequential`, `parallel` or `auto`",
                s
            )),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
            ExecutionMode::Auto => "auto",
        };
        f.write_str(name)
    }
}

/// Settings for a COG/CSG conversion.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ReindexConfig {
    pub mode: ExecutionMode,
    /// Minimum number of scalar elements (R * D * T) before `Auto` goes parallel.
    pub parallel_threshold: usize,
}

impl ReindexConfig {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 16;

    pub fn new(mode: ExecutionMode, parallel_threshold: usize) -> Self {
        Self {
            mode,
            parallel_threshold,
        }
    }

    pub fn sequential() -> Self {
        Self::new(ExecutionMode::Sequential, Self::DEFAULT_PARALLEL_THRESHOLD)
    }

    pub fn parallel() -> Self {
        Self::new(ExecutionMode::Parallel, Self::DEFAULT_PARALLEL_THRESHOLD)
    }

    /// Resolve the execution mode for a gather holding `total_elements` scalars.
    pub fn use_parallel(&self, total_elements: usize) -> bool {
        let parallel = match self.mode {
            ExecutionMode::Sequential => false,
            ExecutionMode::Parallel => true,
            ExecutionMode::Auto => total_elements >= self.parallel_threshold,
        };
        log::trace!(
            "Execution mode {} with {} elements resolved to {}",
            self.mode,
            total_elements,
            if parallel { "parallel" } else { "sequential" }
        );
        parallel
    }
}

impl Default for ReindexConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Load a reindex configuration from a JSON file.
///
/// Missing fields fall back to [`ReindexConfig::default`].
pub fn load_reindex_config<P: AsRef<Path>>(path: P) -> Result<ReindexConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: ReindexConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
