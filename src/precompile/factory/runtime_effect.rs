//! User-defined runtime effects.
//!
//! A [`RuntimeEffect`] describes a user shader program: which paint stages it
//! may be used in and the typed children it samples. Precompiling one takes a
//! [`PrecompileChildOptions`] per declared child; the effect expands to the
//! product of the per-slot alternative counts.

use std::sync::Arc;

use bitflags::bitflags;
use xxhash_rust::xxh3::xxh3_64;

use crate::errors::{PrecompileError, Result};
use crate::key::{KeyContext, PaintParamsKeyBuilder, SnippetId};
use crate::precompile::base::{
    PrecompileBlender, PrecompileColorFilter, PrecompileKind, PrecompileNode, PrecompileShader,
};
use crate::precompile::child::{ChildType, PrecompileChildOptions};
use crate::precompile::combination::RadixDigits;

bitflags! {
    /// Paint stages a runtime effect may be instantiated as.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuntimeEffectFlags: u32 {
        const ALLOW_SHADER       = 1 << 0;
        const ALLOW_COLOR_FILTER = 1 << 1;
        const ALLOW_BLENDER      = 1 << 2;
    }
}

/// A child declared by a runtime effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEffectChild {
    pub name: String,
    pub child_type: ChildType,
}

impl RuntimeEffectChild {
    #[must_use]
    pub fn new(name: impl Into<String>, child_type: ChildType) -> Self {
        Self {
            name: name.into(),
            child_type,
        }
    }
}

#[derive(Debug)]
pub struct RuntimeEffect {
    name: String,
    source: String,
    flags: RuntimeEffectFlags,
    children: Vec<RuntimeEffectChild>,
    /// Truncated xxh3 of `source`; identifies the program inside keys.
    id: u32,
}

impl RuntimeEffect {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        flags: RuntimeEffectFlags,
        children: Vec<RuntimeEffectChild>,
    ) -> Self {
        let source = source.into();
        let id = xxh3_64(source.as_bytes()) as u32;
        Self {
            name: name.into(),
            source,
            flags,
            children,
            id,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    #[must_use]
    pub fn flags(&self) -> RuntimeEffectFlags {
        self.flags
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[RuntimeEffectChild] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn allows(&self, ty: ChildType) -> bool {
        let flag = match ty {
            ChildType::Shader => RuntimeEffectFlags::ALLOW_SHADER,
            ChildType::ColorFilter => RuntimeEffectFlags::ALLOW_COLOR_FILTER,
            ChildType::Blender => RuntimeEffectFlags::ALLOW_BLENDER,
        };
        self.flags.contains(flag)
    }
}

#[derive(Debug)]
struct PrecompileRuntimeEffect {
    ty: ChildType,
    effect: Arc<RuntimeEffect>,
    child_options: Vec<PrecompileChildOptions>,
}

impl PrecompileRuntimeEffect {
    fn new(
        ty: ChildType,
        effect: Arc<RuntimeEffect>,
        child_options: Vec<PrecompileChildOptions>,
    ) -> Result<Self> {
        if !effect.allows(ty) {
            return Err(PrecompileError::EffectKindNotAllowed {
                effect: effect.name().to_owned(),
                kind: ty.into(),
            });
        }

        let declared = effect.children();
        if declared.len() != child_options.len() {
            return Err(PrecompileError::ChildCountMismatch {
                expected: declared.len(),
                actual: child_options.len(),
            });
        }

        for (slot, (child, options)) in declared.iter().zip(&child_options).enumerate() {
            if options.is_empty() {
                return Err(PrecompileError::EmptyChildSlot { slot });
            }
            for option in options.options() {
                if let Some(actual) = option.child_type()
                    && actual != child.child_type
                {
                    return Err(PrecompileError::ChildKindMismatch {
                        slot,
                        expected: child.child_type,
                        actual,
                    });
                }
            }
        }

        Ok(Self {
            ty,
            effect,
            child_options,
        })
    }

    fn snippet(&self) -> SnippetId {
        match self.ty {
            ChildType::Shader => SnippetId::RuntimeShader,
            ChildType::ColorFilter => SnippetId::RuntimeColorFilter,
            ChildType::Blender => SnippetId::RuntimeBlender,
        }
    }
}

impl PrecompileNode for PrecompileRuntimeEffect {
    fn kind(&self) -> PrecompileKind {
        self.ty.into()
    }

    fn num_child_combinations(&self) -> usize {
        self.child_options
            .iter()
            .fold(1usize, |acc, options| {
                acc.saturating_mul(options.num_combinations())
            })
    }

    fn add_to_key(
        &self,
        context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) {
        debug_assert!(desired_combination < self.num_combinations());

        builder.begin_block(self.snippet());
        builder.add_data(self.effect.id());

        let mut digits = RadixDigits::new(desired_combination);
        for (child, options) in self.effect.children().iter().zip(&self.child_options) {
            let desired_child = digits.take(options.num_combinations());
            if let Some((option, local)) = options.select(desired_child) {
                option.add_to_key(context, child.child_type, local, builder);
            }
        }
        debug_assert_eq!(digits.remainder(), 0);

        builder.end_block();
    }
}

/// Precompile options for `effect` used as a shader.
///
/// `child_options` holds one non-empty option set per declared child, each
/// matching the child's declared type.
pub fn make_precompile_shader(
    effect: Arc<RuntimeEffect>,
    child_options: Vec<PrecompileChildOptions>,
) -> Result<PrecompileShader> {
    PrecompileRuntimeEffect::new(ChildType::Shader, effect, child_options)
        .map(PrecompileShader::new)
}

/// Precompile options for `effect` used as a color filter.
pub fn make_precompile_color_filter(
    effect: Arc<RuntimeEffect>,
    child_options: Vec<PrecompileChildOptions>,
) -> Result<PrecompileColorFilter> {
    PrecompileRuntimeEffect::new(ChildType::ColorFilter, effect, child_options)
        .map(PrecompileColorFilter::new)
}

/// Precompile options for `effect` used as a blender.
pub fn make_precompile_blender(
    effect: Arc<RuntimeEffect>,
    child_options: Vec<PrecompileChildOptions>,
) -> Result<PrecompileBlender> {
    PrecompileRuntimeEffect::new(ChildType::Blender, effect, child_options)
        .map(PrecompileBlender::new)
}
