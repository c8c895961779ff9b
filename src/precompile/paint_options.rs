//! Paint Options
//!
//! [`PaintOptions`] lists, for each paint stage, the options a workload may
//! draw with. The stages are independent axes, so the combination space is the
//! product of the per-stage counts. Within a stage the options are alternatives
//! and their counts add up.
//!
//! # Combination Layout
//!
//! A combination index is decoded least significant digit first:
//!
//! ```text
//! index = blend + B × (color_filter + C × (mask_filter + M × shader))
//! ```
//!
//! where `B`, `C` and `M` are the blend, color filter and mask filter counts.
//! The shader digit varies slowest. Keys are still emitted shader first.
//!
//! # Stage Fallbacks
//!
//! | Stage        | No options registered              |
//! |--------------|------------------------------------|
//! | Shader       | solid color shader                 |
//! | Mask filter  | geometry coverage (nothing emitted)|
//! | Color filter | identity (nothing emitted)         |
//! | Blender      | src-over (nothing emitted)         |

use crate::blend_mode::BlendMode;
use crate::errors::{PrecompileError, Result};
use crate::key::{KeyContext, PaintKeyDictionary, PaintParamsKeyBuilder, SnippetId};
use crate::settings::PrecompileSettings;

use super::base::{
    PrecompileBlender, PrecompileColorFilter, PrecompileMaskFilter, PrecompileNode,
    PrecompileShader,
};
use super::combination::{self, RadixDigits};
use super::driver::Precompiler;
use super::factory::blenders;

/// Per-stage indices of one decoded combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaintCombination {
    pub shader: usize,
    pub mask_filter: usize,
    pub color_filter: usize,
    pub blend: usize,
}

/// The option a stage index resolved to, plus the index local to it.
#[derive(Debug)]
pub struct StageSelection<'a, T> {
    pub option: &'a T,
    pub local_index: usize,
}

impl<T> Clone for StageSelection<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StageSelection<'_, T> {}

/// A decoded combination resolved to concrete options.
///
/// A `None` stage uses its fallback.
#[derive(Debug, Clone, Copy)]
pub struct PaintSelection<'a> {
    pub shader: Option<StageSelection<'a, PrecompileShader>>,
    pub mask_filter: Option<StageSelection<'a, PrecompileMaskFilter>>,
    pub color_filter: Option<StageSelection<'a, PrecompileColorFilter>>,
    pub blender: Option<StageSelection<'a, PrecompileBlender>>,
}

/// Stage radices and total of a [`PaintOptions`], computed once and reused for
/// every combination of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinationLayout {
    /// blend, color filter, mask filter, shader
    radices: [usize; 4],
    total: usize,
}

impl CombinationLayout {
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Splits a combination index into per-stage indices.
    pub fn decode(&self, desired_combination: usize) -> Result<PaintCombination> {
        if desired_combination >= self.total {
            return Err(PrecompileError::CombinationOutOfRange {
                index: desired_combination,
                total: self.total,
            });
        }

        let [blend, color_filter, mask_filter, num_shaders] = self.radices;
        let mut digits = RadixDigits::new(desired_combination);
        let blend = digits.take(blend);
        let color_filter = digits.take(color_filter);
        let mask_filter = digits.take(mask_filter);
        let shader = digits.remainder();
        debug_assert!(shader < num_shaders);

        Ok(PaintCombination {
            shader,
            mask_filter,
            color_filter,
            blend,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaintOptions {
    shader_options: Vec<PrecompileShader>,
    mask_filter_options: Vec<PrecompileMaskFilter>,
    color_filter_options: Vec<PrecompileColorFilter>,
    blender_options: Vec<PrecompileBlender>,
}

impl PaintOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ─────────────────────────────────────────────────────────

    pub fn set_shaders(&mut self, shaders: impl IntoIterator<Item = PrecompileShader>) {
        self.shader_options = shaders.into_iter().collect();
    }

    pub fn set_mask_filters(&mut self, filters: impl IntoIterator<Item = PrecompileMaskFilter>) {
        self.mask_filter_options = filters.into_iter().collect();
    }

    pub fn set_color_filters(&mut self, filters: impl IntoIterator<Item = PrecompileColorFilter>) {
        self.color_filter_options = filters.into_iter().collect();
    }

    pub fn set_blenders(&mut self, blenders: impl IntoIterator<Item = PrecompileBlender>) {
        self.blender_options = blenders.into_iter().collect();
    }

    /// Replaces the blenders with one blend-mode blender per mode.
    pub fn set_blend_modes(&mut self, modes: &[BlendMode]) {
        self.set_blenders(modes.iter().copied().map(blenders::mode));
    }

    #[inline]
    #[must_use]
    pub fn shaders(&self) -> &[PrecompileShader] {
        &self.shader_options
    }

    #[inline]
    #[must_use]
    pub fn mask_filters(&self) -> &[PrecompileMaskFilter] {
        &self.mask_filter_options
    }

    #[inline]
    #[must_use]
    pub fn color_filters(&self) -> &[PrecompileColorFilter] {
        &self.color_filter_options
    }

    #[inline]
    #[must_use]
    pub fn blenders(&self) -> &[PrecompileBlender] {
        &self.blender_options
    }

    // ── Counting ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn num_shader_combinations(&self) -> usize {
        combination::axis_count(combination::sum_combinations(&self.shader_options, |s| {
            s.num_combinations()
        }))
    }

    #[must_use]
    pub fn num_mask_filter_combinations(&self) -> usize {
        combination::axis_count(combination::sum_combinations(
            &self.mask_filter_options,
            |mf| mf.num_combinations(),
        ))
    }

    #[must_use]
    pub fn num_color_filter_combinations(&self) -> usize {
        combination::axis_count(combination::sum_combinations(
            &self.color_filter_options,
            |cf| cf.num_combinations(),
        ))
    }

    /// Blend stage count.
    ///
    /// Blend-mode blenders are mutually exclusive fixed-function states, so
    /// however many are listed they add a single combination. Other blenders
    /// add their own counts. With no blenders at all the stage falls back to
    /// src-over, which is also one combination.
    #[must_use]
    pub fn num_blend_mode_combinations(&self) -> usize {
        let mut has_blend_mode = false;
        let mut num_blend_combos = 0usize;
        for blender in &self.blender_options {
            if blender.as_blend_mode().is_some() {
                has_blend_mode = true;
            } else {
                num_blend_combos = num_blend_combos.saturating_add(blender.num_combinations());
            }
        }

        if has_blend_mode || num_blend_combos == 0 {
            num_blend_combos = num_blend_combos.saturating_add(1);
        }
        num_blend_combos
    }

    fn radices(&self) -> [usize; 4] {
        [
            self.num_blend_mode_combinations(),
            self.num_color_filter_combinations(),
            self.num_mask_filter_combinations(),
            self.num_shader_combinations(),
        ]
    }

    /// Total number of combinations, saturating at `usize::MAX`.
    #[must_use]
    pub fn num_combinations(&self) -> usize {
        self.radices()
            .into_iter()
            .fold(1usize, usize::saturating_mul)
    }

    /// Total number of combinations, failing instead of saturating.
    pub fn checked_num_combinations(&self) -> Result<usize> {
        self.layout().map(|layout| layout.total)
    }

    /// Computes the stage radices, failing if any count overflowed.
    pub fn layout(&self) -> Result<CombinationLayout> {
        let radices = self.radices();
        if radices.contains(&combination::SATURATED_COUNT) {
            return Err(PrecompileError::CombinationOverflow);
        }
        let total = radices
            .into_iter()
            .try_fold(1usize, usize::checked_mul)
            .ok_or(PrecompileError::CombinationOverflow)?;
        Ok(CombinationLayout { radices, total })
    }

    // ── Decoding ─────────────────────────────────────────────────────────────

    /// Splits a combination index into per-stage indices.
    pub fn decode(&self, desired_combination: usize) -> Result<PaintCombination> {
        self.layout()?.decode(desired_combination)
    }

    /// Inverse of [`decode`](Self::decode).
    #[must_use]
    pub fn encode(&self, combination: &PaintCombination) -> usize {
        let [blend, color_filter, mask_filter, shader] = self.radices();
        combination::encode(&[
            (combination.blend, blend),
            (combination.color_filter, color_filter),
            (combination.mask_filter, mask_filter),
            (combination.shader, shader),
        ])
    }

    /// Decodes a combination index and resolves each stage to its option.
    pub fn select(&self, desired_combination: usize) -> Result<PaintSelection<'_>> {
        self.select_in(&self.layout()?, desired_combination)
    }

    /// [`select`](Self::select) against a layout computed from these options.
    pub fn select_in(
        &self,
        layout: &CombinationLayout,
        desired_combination: usize,
    ) -> Result<PaintSelection<'_>> {
        let combo = layout.decode(desired_combination)?;
        let out_of_range = || PrecompileError::CombinationOutOfRange {
            index: desired_combination,
            total: layout.total,
        };

        Ok(PaintSelection {
            shader: select_stage(&self.shader_options, combo.shader).ok_or_else(out_of_range)?,
            mask_filter: select_stage(&self.mask_filter_options, combo.mask_filter)
                .ok_or_else(out_of_range)?,
            color_filter: select_stage(&self.color_filter_options, combo.color_filter)
                .ok_or_else(out_of_range)?,
            blender: select_stage(&self.blender_options, combo.blend).ok_or_else(out_of_range)?,
        })
    }

    // ── Key Emission ─────────────────────────────────────────────────────────

    /// Writes the key for one combination into `builder`.
    ///
    /// `builder` must be reset. Stages are emitted shader, mask filter, color
    /// filter, blender.
    pub fn create_key(
        &self,
        context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) -> Result<()> {
        self.create_key_in(&self.layout()?, context, desired_combination, builder)
    }

    /// [`create_key`](Self::create_key) against a layout computed from these
    /// options.
    pub fn create_key_in(
        &self,
        layout: &CombinationLayout,
        context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) -> Result<()> {
        debug_assert!(builder.is_reset(), "key builder was not reset");
        let selection = self.select_in(layout, desired_combination)?;

        match selection.shader {
            Some(s) => s.option.add_to_key(context, s.local_index, builder),
            None => builder.add_block(SnippetId::SolidColorShader),
        }
        if let Some(mf) = selection.mask_filter {
            mf.option.add_to_key(context, mf.local_index, builder);
        }
        if let Some(cf) = selection.color_filter {
            cf.option.add_to_key(context, cf.local_index, builder);
        }
        if let Some(b) = selection.blender {
            b.option.add_to_key(context, b.local_index, builder);
        }
        Ok(())
    }

    /// Emits every combination into `dictionary` with default settings.
    pub fn build_combinations(&self, dictionary: &dyn PaintKeyDictionary) -> Result<()> {
        Precompiler::new(dictionary, PrecompileSettings::default())
            .run(self)
            .map(|_| ())
    }
}

/// Resolves a stage index against its option list.
///
/// `Some(None)` means the stage is empty and uses its fallback; `None` means
/// the index does not land on any option.
fn select_stage<T>(options: &[T], desired: usize) -> Option<Option<StageSelection<'_, T>>>
where
    T: std::ops::Deref<Target = dyn PrecompileNode>,
{
    if options.is_empty() {
        return (desired == 0).then_some(None);
    }
    combination::select_option(options, desired, |o| o.num_combinations())
        .map(|(option, local_index)| Some(StageSelection { option, local_index }))
}
