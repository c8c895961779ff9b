#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Ahead-of-time pipeline variant enumeration.
//!
//! Describe which options a workload may paint with, per stage, and the
//! precompiler expands that description into every concrete combination and
//! feeds each combination's key to a dictionary, so pipelines can be built
//! before the first frame needs them.
//!
//! ```rust,ignore
//! use myth_precompile::prelude::*;
//!
//! let mut options = PaintOptions::new();
//! options.set_shaders([shaders::linear_gradient(), shaders::image()]);
//! options.set_blend_modes(&[BlendMode::SrcOver, BlendMode::Multiply]);
//!
//! let dictionary = ShaderCodeDictionary::new();
//! options.build_combinations(&dictionary)?;
//! ```

pub mod blend_mode;
pub mod errors;
pub mod key;
pub mod precompile;
pub mod settings;

pub use blend_mode::BlendMode;
pub use errors::{PrecompileError, Result};
pub use key::{
    KeyContext, PaintKeyDictionary, PaintParamsKey, PaintParamsKeyBuilder, PaintParamsKeyId,
    ShaderCodeDictionary, SnippetId,
};
pub use precompile::{
    ChildType, CombinationLayout, PaintCombination, PaintOptions, PrecompileBlender,
    PrecompileChildOptions, PrecompileChildPtr, PrecompileColorFilter, PrecompileImageFilter,
    PrecompileKind, PrecompileMaskFilter, PrecompileNode, PrecompileReport, PrecompileShader,
    Precompiler,
};
pub use settings::{ExecutionMode, PrecompileSettings};

pub mod prelude {
    pub use crate::precompile::factory::{
        RuntimeEffect, RuntimeEffectChild, RuntimeEffectFlags, blenders, color_filters,
        image_filters, make_precompile_blender, make_precompile_color_filter,
        make_precompile_shader, mask_filters, shaders,
    };
    pub use crate::{
        BlendMode, ChildType, PaintOptions, PrecompileChildOptions, PrecompileChildPtr,
        PrecompileSettings, ShaderCodeDictionary,
    };
}
