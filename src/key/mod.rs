//! Paint Keys
//!
//! - [`PaintParamsKeyBuilder`]: scratch accumulator the option nodes write into
//! - [`PaintParamsKey`]: finished canonical key
//! - [`PaintKeyDictionary`]: deduplicating store keys are handed to
//! - [`KeyContext`]: read-only environment passed to every node

pub mod builder;
pub mod dictionary;

pub use builder::{KeyBlock, KeyBlocks, PaintParamsKey, PaintParamsKeyBuilder, SnippetId};
pub use dictionary::{KeyContext, PaintKeyDictionary, PaintParamsKeyId, ShaderCodeDictionary};
