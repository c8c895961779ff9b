//! Pipeline variant precompilation.
//!
//! - [`PrecompileNode`]: base contract of every option, plus typed handles
//! - [`PrecompileChildPtr`] / [`PrecompileChildOptions`]: effect children
//! - [`PaintOptions`]: per-stage option lists and combination decoding
//! - [`Precompiler`]: walks every combination and fills a key dictionary
//! - [`factory`]: the concrete options

pub mod base;
pub mod child;
pub mod combination;
pub mod driver;
pub mod factory;
pub mod paint_options;

pub use base::{
    PrecompileBlender, PrecompileColorFilter, PrecompileImageFilter, PrecompileKind,
    PrecompileMaskFilter, PrecompileNode, PrecompileShader,
};
pub use child::{ChildType, PrecompileChildOptions, PrecompileChildPtr};
pub use driver::{PrecompileReport, Precompiler};
pub use paint_options::{
    CombinationLayout, PaintCombination, PaintOptions, PaintSelection, StageSelection,
};
