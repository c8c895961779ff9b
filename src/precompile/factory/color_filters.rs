//! Color filter options.

use crate::key::{KeyContext, PaintParamsKeyBuilder, SnippetId};
use crate::precompile::base::{PrecompileColorFilter, PrecompileKind, PrecompileNode};

/// A 4x5 color matrix filter.
#[derive(Debug)]
struct MatrixColorFilter;

impl PrecompileNode for MatrixColorFilter {
    fn kind(&self) -> PrecompileKind {
        PrecompileKind::ColorFilter
    }

    fn add_to_key(
        &self,
        _context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) {
        debug_assert_eq!(desired_combination, 0);
        builder.add_block(SnippetId::MatrixColorFilter);
    }
}

#[must_use]
pub fn matrix() -> PrecompileColorFilter {
    PrecompileColorFilter::new(MatrixColorFilter)
}
