//! Error Types
//!
//! This module defines the error types used throughout the precompiler.
//!
//! # Overview
//!
//! The main error type [`PrecompileError`] covers:
//! - Combination index and count validation
//! - Child-slot and runtime-effect construction checks
//! - Key builder misuse
//!
//! Empty option lists are *not* errors: every paint stage has a defined
//! fallback, so counting never fails on degenerate input.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, PrecompileError>`.
//!
//! ```rust,ignore
//! use myth_precompile::errors::Result;
//!
//! fn warm(options: &PaintOptions, dict: &ShaderCodeDictionary) -> Result<()> {
//!     options.build_combinations(dict)
//! }
//! ```

use thiserror::Error;

use crate::precompile::{ChildType, PrecompileKind};

/// The main error type for the precompiler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrecompileError {
    // ========================================================================
    // Combination Errors
    // ========================================================================
    /// A combination index was outside `[0, total)`.
    #[error("Combination index {index} out of range (total: {total})")]
    CombinationOutOfRange {
        /// The requested index
        index: usize,
        /// Number of combinations the options expand to
        total: usize,
    },

    /// The combination product does not fit in `usize`.
    #[error("Combination count overflows usize")]
    CombinationOverflow,

    // ========================================================================
    // Option Tree Construction Errors
    // ========================================================================
    /// A required child slot was given no alternatives.
    #[error("Child slot {slot} has no options")]
    EmptyChildSlot {
        /// Index of the offending slot
        slot: usize,
    },

    /// The number of child option sets does not match the effect's children.
    #[error("Expected {expected} child option sets, got {actual}")]
    ChildCountMismatch { expected: usize, actual: usize },

    /// A child option does not match the type the effect declares for that slot.
    #[error("Child slot {slot} expects a {expected:?}, got a {actual:?}")]
    ChildKindMismatch {
        slot: usize,
        expected: ChildType,
        actual: ChildType,
    },

    /// Only shaders, color filters and blenders can be effect children.
    #[error("{0:?} options cannot be used as effect children")]
    InvalidChildKind(PrecompileKind),

    /// The runtime effect cannot be instantiated as the requested kind.
    #[error("Runtime effect '{effect}' does not allow use as a {kind:?}")]
    EffectKindNotAllowed { effect: String, kind: PrecompileKind },

    // ========================================================================
    // Key Builder Errors
    // ========================================================================
    /// `lock` was called while blocks were still open.
    #[error("Key has {open_blocks} unterminated block(s)")]
    UnbalancedKey { open_blocks: usize },

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// The worker pool for parallel precompilation could not be built.
    #[error("Failed to build precompile thread pool: {0}")]
    ThreadPool(String),
}

impl From<rayon::ThreadPoolBuildError> for PrecompileError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        PrecompileError::ThreadPool(err.to_string())
    }
}

/// Alias for `Result<T, PrecompileError>`.
pub type Result<T> = std::result::Result<T, PrecompileError>;
