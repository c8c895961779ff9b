//! Concrete precompile options.
//!
//! Each submodule builds the options for one paint stage:
//!
//! ```rust,ignore
//! use myth_precompile::precompile::factory::{blenders, shaders};
//!
//! let blend = shaders::blend_modes(
//!     &[BlendMode::Multiply, BlendMode::Screen],
//!     [shaders::image()],
//!     [shaders::linear_gradient(), shaders::color()],
//! )?;
//! ```

pub mod blenders;
pub mod color_filters;
pub mod image_filters;
pub mod mask_filters;
pub mod runtime_effect;
pub mod shaders;

pub use runtime_effect::{
    RuntimeEffect, RuntimeEffectChild, RuntimeEffectFlags, make_precompile_blender,
    make_precompile_color_filter, make_precompile_shader,
};
pub use shaders::GradientType;
