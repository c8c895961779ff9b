//! Shader options.

use crate::blend_mode::BlendMode;
use crate::errors::{PrecompileError, Result};
use crate::key::{KeyContext, PaintParamsKeyBuilder, SnippetId};
use crate::precompile::base::{PrecompileBlender, PrecompileKind, PrecompileNode, PrecompileShader};
use crate::precompile::combination::{self, RadixDigits};

use super::blenders;

// ─── Solid Color ──────────────────────────────────────────────────────────────

#[derive(Debug)]
struct SolidColorShader;

impl PrecompileNode for SolidColorShader {
    fn kind(&self) -> PrecompileKind {
        PrecompileKind::Shader
    }

    fn add_to_key(
        &self,
        _context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) {
        debug_assert_eq!(desired_combination, 0);
        builder.add_block(SnippetId::SolidColorShader);
    }
}

/// A constant-color shader.
#[must_use]
pub fn color() -> PrecompileShader {
    PrecompileShader::new(SolidColorShader)
}

// ─── Image ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct ImageShader;

impl PrecompileNode for ImageShader {
    fn kind(&self) -> PrecompileKind {
        PrecompileKind::Shader
    }

    fn add_to_key(
        &self,
        _context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) {
        debug_assert_eq!(desired_combination, 0);
        builder.add_block(SnippetId::ImageShader);
    }
}

#[must_use]
pub fn image() -> PrecompileShader {
    PrecompileShader::new(ImageShader)
}

// ─── Gradients ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientType {
    Linear,
    Radial,
    Sweep,
    Conical,
}

/// Gradients are specialized on their stop count: the shader for 4 stops is
/// variant 0, the one for 8 stops is variant 1.
pub const GRADIENT_STOP_VARIANTS: [u32; 2] = [4, 8];

#[derive(Debug)]
struct GradientShader {
    ty: GradientType,
}

impl GradientShader {
    fn snippet(&self, stop_variant: usize) -> SnippetId {
        let few_stops = stop_variant == 0;
        match (self.ty, few_stops) {
            (GradientType::Linear, true) => SnippetId::LinearGradientShader4,
            (GradientType::Linear, false) => SnippetId::LinearGradientShader8,
            (GradientType::Radial, true) => SnippetId::RadialGradientShader4,
            (GradientType::Radial, false) => SnippetId::RadialGradientShader8,
            (GradientType::Sweep, true) => SnippetId::SweepGradientShader4,
            (GradientType::Sweep, false) => SnippetId::SweepGradientShader8,
            (GradientType::Conical, true) => SnippetId::ConicalGradientShader4,
            (GradientType::Conical, false) => SnippetId::ConicalGradientShader8,
        }
    }
}

impl PrecompileNode for GradientShader {
    fn kind(&self) -> PrecompileKind {
        PrecompileKind::Shader
    }

    fn num_intrinsic_combinations(&self) -> usize {
        GRADIENT_STOP_VARIANTS.len()
    }

    fn add_to_key(
        &self,
        _context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) {
        debug_assert!(desired_combination < GRADIENT_STOP_VARIANTS.len());
        builder.add_block(self.snippet(desired_combination));
    }
}

#[must_use]
pub fn gradient(ty: GradientType) -> PrecompileShader {
    PrecompileShader::new(GradientShader { ty })
}

#[must_use]
pub fn linear_gradient() -> PrecompileShader {
    gradient(GradientType::Linear)
}

#[must_use]
pub fn radial_gradient() -> PrecompileShader {
    gradient(GradientType::Radial)
}

#[must_use]
pub fn sweep_gradient() -> PrecompileShader {
    gradient(GradientType::Sweep)
}

#[must_use]
pub fn two_point_conical_gradient() -> PrecompileShader {
    gradient(GradientType::Conical)
}

// ─── Blend ────────────────────────────────────────────────────────────────────

/// Blends a `src` shader onto a `dst` shader.
///
/// Child slots, in decoding order: blender, dst, src.
#[derive(Debug)]
struct BlendShader {
    blenders: Vec<PrecompileBlender>,
    dsts: Vec<PrecompileShader>,
    srcs: Vec<PrecompileShader>,
}

impl BlendShader {
    // TODO: blend-mode blenders could collapse into one Porter-Duff and one
    // shader-based variant instead of one combination each.
    fn num_blender_combinations(&self) -> usize {
        // No blender means plain src-over.
        combination::axis_count(combination::sum_combinations(&self.blenders, |b| {
            b.num_combinations()
        }))
    }

    fn num_dst_combinations(&self) -> usize {
        combination::sum_combinations(&self.dsts, |s| s.num_combinations())
    }

    fn num_src_combinations(&self) -> usize {
        combination::sum_combinations(&self.srcs, |s| s.num_combinations())
    }
}

impl PrecompileNode for BlendShader {
    fn kind(&self) -> PrecompileKind {
        PrecompileKind::Shader
    }

    fn num_child_combinations(&self) -> usize {
        self.num_blender_combinations()
            .saturating_mul(self.num_dst_combinations())
            .saturating_mul(self.num_src_combinations())
    }

    fn add_to_key(
        &self,
        context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) {
        debug_assert!(desired_combination < self.num_combinations());

        let mut digits = RadixDigits::new(desired_combination);
        let desired_blender = digits.take(self.num_blender_combinations());
        let desired_dst = digits.take(self.num_dst_combinations());
        let desired_src = digits.take(self.num_src_combinations());
        debug_assert_eq!(digits.remainder(), 0);

        builder.begin_block(SnippetId::BlendShader);

        let blender =
            combination::select_option(&self.blenders, desired_blender, |b| b.num_combinations());
        match blender {
            Some((blender, local)) => match blender.as_blend_mode() {
                Some(mode) => blenders::add_blend_mode_to_key(mode, builder),
                None => blender.add_to_key(context, local, builder),
            },
            None => blenders::add_blend_mode_to_key(BlendMode::SrcOver, builder),
        }

        if let Some((dst, local)) =
            combination::select_option(&self.dsts, desired_dst, |s| s.num_combinations())
        {
            dst.add_to_key(context, local, builder);
        }
        if let Some((src, local)) =
            combination::select_option(&self.srcs, desired_src, |s| s.num_combinations())
        {
            src.add_to_key(context, local, builder);
        }

        builder.end_block();
    }
}

/// A shader blending each `srcs` option onto each `dsts` option with each
/// blender option.
///
/// `dsts` and `srcs` must be non-empty. An empty `blenders` list blends with
/// src-over.
pub fn blend(
    blenders: impl IntoIterator<Item = PrecompileBlender>,
    dsts: impl IntoIterator<Item = PrecompileShader>,
    srcs: impl IntoIterator<Item = PrecompileShader>,
) -> Result<PrecompileShader> {
    let shader = BlendShader {
        blenders: blenders.into_iter().collect(),
        dsts: dsts.into_iter().collect(),
        srcs: srcs.into_iter().collect(),
    };
    if shader.dsts.is_empty() {
        return Err(PrecompileError::EmptyChildSlot { slot: 1 });
    }
    if shader.srcs.is_empty() {
        return Err(PrecompileError::EmptyChildSlot { slot: 2 });
    }
    Ok(PrecompileShader::new(shader))
}

/// [`blend`] with a list of plain blend modes.
pub fn blend_modes(
    modes: &[BlendMode],
    dsts: impl IntoIterator<Item = PrecompileShader>,
    srcs: impl IntoIterator<Item = PrecompileShader>,
) -> Result<PrecompileShader> {
    blend(modes.iter().copied().map(blenders::mode), dsts, srcs)
}
