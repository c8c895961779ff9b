//! Precompile Settings
//!
//! Controls how a warm-up pass walks the combination space.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use myth_precompile::{ExecutionMode, PrecompileSettings};
//!
//! // Default: every combination, on the calling thread
//! let settings = PrecompileSettings::default();
//!
//! // Spread the pass over 4 workers and stop after 10k keys
//! let settings = PrecompileSettings {
//!     execution: ExecutionMode::Parallel,
//!     threads: Some(4),
//!     combination_limit: Some(10_000),
//! };
//! ```
//!
//! Settings deserialize from JSON (or any serde format); missing fields take
//! their defaults.

use serde::{Deserialize, Serialize};

/// How the combinations of one pass are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One builder, combinations in index order on the calling thread.
    #[default]
    Serial,
    /// Combinations spread across a rayon pool, one builder per worker.
    ///
    /// The dictionary receives keys in no particular order.
    Parallel,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecompileSettings {
    pub execution: ExecutionMode,

    /// Worker count for [`ExecutionMode::Parallel`]. `None` uses the global
    /// rayon pool.
    pub threads: Option<usize>,

    /// Stop after the first `n` combinations. A partial warm-up is not an
    /// error; the report marks it as truncated.
    pub combination_limit: Option<usize>,
}

impl PrecompileSettings {
    #[inline]
    #[must_use]
    pub fn parallel() -> Self {
        Self {
            execution: ExecutionMode::Parallel,
            ..Default::default()
        }
    }
}
