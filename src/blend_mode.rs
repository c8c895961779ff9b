//! Blend Modes
//!
//! The algebraic blend modes a [`PrecompileBlender`] may stand for. Porter-Duff
//! and separable modes map to fixed-function or coefficient blending; the
//! non-separable modes always need shader-based blending.
//!
//! [`PrecompileBlender`]: crate::precompile::PrecompileBlender

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u32)]
pub enum BlendMode {
    // Porter-Duff
    Clear,
    Src,
    Dst,
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcATop,
    DstATop,
    Xor,
    Plus,
    Modulate,

    // Separable
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Multiply,

    // Non-separable
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    pub const LAST_COEFF_MODE: BlendMode = BlendMode::Screen;
    pub const LAST_SEPARABLE_MODE: BlendMode = BlendMode::Multiply;

    /// Returns `true` if the mode can be expressed as `src * a + dst * b`.
    #[inline]
    #[must_use]
    pub fn is_coeff_mode(self) -> bool {
        self <= Self::LAST_COEFF_MODE
    }

    /// Returns `true` if the mode operates on each color channel independently.
    #[inline]
    #[must_use]
    pub fn is_separable(self) -> bool {
        self <= Self::LAST_SEPARABLE_MODE
    }

    /// Stable word used when a mode is written into a key.
    #[inline]
    #[must_use]
    pub fn key_word(self) -> u32 {
        self as u32
    }
}
