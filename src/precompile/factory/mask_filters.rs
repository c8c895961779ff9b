//! Mask filter options.

use crate::key::{KeyContext, PaintParamsKeyBuilder, SnippetId};
use crate::precompile::base::{PrecompileKind, PrecompileMaskFilter, PrecompileNode};

#[derive(Debug)]
struct BlurMaskFilter;

impl PrecompileNode for BlurMaskFilter {
    fn kind(&self) -> PrecompileKind {
        PrecompileKind::MaskFilter
    }

    fn add_to_key(
        &self,
        _context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) {
        debug_assert_eq!(desired_combination, 0);
        builder.add_block(SnippetId::BlurMaskFilter);
    }
}

#[must_use]
pub fn blur() -> PrecompileMaskFilter {
    PrecompileMaskFilter::new(BlurMaskFilter)
}
