//! Key Emission Driver
//!
//! Walks `[0, total)` for a [`PaintOptions`], builds the key of every
//! combination from a freshly reset builder and hands it to the dictionary.
//! Combinations are independent of each other, so the walk may run in
//! parallel as long as every worker owns its builder.

use rayon::prelude::*;

use crate::errors::Result;
use crate::key::{KeyContext, PaintKeyDictionary, PaintParamsKeyBuilder};
use crate::settings::{ExecutionMode, PrecompileSettings};

use super::paint_options::{CombinationLayout, PaintOptions};

/// Outcome of one warm-up pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecompileReport {
    /// Combinations the options expand to.
    pub combinations: usize,
    /// Keys handed to the dictionary.
    pub emitted: usize,
}

impl PrecompileReport {
    /// `true` if the pass stopped before covering every combination.
    #[inline]
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.emitted < self.combinations
    }
}

pub struct Precompiler<'a> {
    dictionary: &'a dyn PaintKeyDictionary,
    settings: PrecompileSettings,
}

impl std::fmt::Debug for Precompiler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Precompiler")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<'a> Precompiler<'a> {
    #[must_use]
    pub fn new(dictionary: &'a dyn PaintKeyDictionary, settings: PrecompileSettings) -> Self {
        Self {
            dictionary,
            settings,
        }
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &PrecompileSettings {
        &self.settings
    }

    /// Emits the key of every combination of `options` into the dictionary.
    pub fn run(&self, options: &PaintOptions) -> Result<PrecompileReport> {
        let layout = options.layout()?;
        let combinations = layout.total();
        let count = self
            .settings
            .combination_limit
            .map_or(combinations, |limit| limit.min(combinations));

        if count < combinations {
            log::warn!(
                "Precompile limited to {count} of {combinations} combinations; remaining variants compile on first use"
            );
        }
        log::debug!(
            "Precompiling {count} combinations (shader: {}, mask filter: {}, color filter: {}, blend: {}) [{:?}]",
            options.num_shader_combinations(),
            options.num_mask_filter_combinations(),
            options.num_color_filter_combinations(),
            options.num_blend_mode_combinations(),
            self.settings.execution,
        );

        match self.settings.execution {
            ExecutionMode::Serial => self.run_serial(options, &layout, count)?,
            ExecutionMode::Parallel => self.run_parallel(options, &layout, count)?,
        }

        Ok(PrecompileReport {
            combinations,
            emitted: count,
        })
    }

    fn run_serial(
        &self,
        options: &PaintOptions,
        layout: &CombinationLayout,
        count: usize,
    ) -> Result<()> {
        let context = KeyContext::new(self.dictionary);
        let mut builder = PaintParamsKeyBuilder::new();
        for index in 0..count {
            self.emit(&context, options, layout, index, &mut builder)?;
        }
        Ok(())
    }

    fn run_parallel(
        &self,
        options: &PaintOptions,
        layout: &CombinationLayout,
        count: usize,
    ) -> Result<()> {
        let context = KeyContext::new(self.dictionary);
        let work = || {
            (0..count).into_par_iter().try_for_each_init(
                PaintParamsKeyBuilder::new,
                |builder, index| self.emit(&context, options, layout, index, builder),
            )
        };

        match self.settings.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("myth-precompile-{i}"))
                .build()?
                .install(work),
            None => work(),
        }
    }

    fn emit(
        &self,
        context: &KeyContext<'_>,
        options: &PaintOptions,
        layout: &CombinationLayout,
        index: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) -> Result<()> {
        builder.reset();
        options.create_key_in(layout, context, index, builder)?;
        let key = builder.lock()?;
        builder.reset();

        let id = self.dictionary.find_or_create(&key);
        log::trace!("Combination {index} -> {id:?}");
        Ok(())
    }
}
