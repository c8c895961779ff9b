//! Blender options.

use crate::blend_mode::BlendMode;
use crate::key::{KeyContext, PaintParamsKeyBuilder, SnippetId};
use crate::precompile::base::{PrecompileBlender, PrecompileKind, PrecompileNode};

/// A blender that is nothing more than an algebraic blend mode.
#[derive(Debug)]
struct BlendModeBlender {
    mode: BlendMode,
}

impl PrecompileNode for BlendModeBlender {
    fn kind(&self) -> PrecompileKind {
        PrecompileKind::Blender
    }

    fn as_blend_mode(&self) -> Option<BlendMode> {
        Some(self.mode)
    }

    fn add_to_key(
        &self,
        _context: &KeyContext<'_>,
        desired_combination: usize,
        _builder: &mut PaintParamsKeyBuilder,
    ) {
        // Applied as fixed-function blend state; nothing goes into the key.
        debug_assert_eq!(desired_combination, 0);
    }
}

#[must_use]
pub fn mode(mode: BlendMode) -> PrecompileBlender {
    PrecompileBlender::new(BlendModeBlender { mode })
}

/// Writes `mode` as a shader-side blend block, for blenders nested in effects.
pub(crate) fn add_blend_mode_to_key(mode: BlendMode, builder: &mut PaintParamsKeyBuilder) {
    builder.begin_block(SnippetId::BlendModeBlender);
    builder.add_data(mode.key_word());
    builder.end_block();
}
