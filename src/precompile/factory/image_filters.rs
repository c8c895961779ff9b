//! Image filter options.
//!
//! Image filters run as separate passes rather than as a paint stage, so
//! [`PaintOptions`](crate::precompile::PaintOptions) does not enumerate them.
//! Hosts precompiling filter passes drive these nodes directly.

use crate::key::{KeyContext, PaintParamsKeyBuilder, SnippetId};
use crate::precompile::base::{PrecompileImageFilter, PrecompileKind, PrecompileNode};

#[derive(Debug)]
struct LeafImageFilter {
    snippet: SnippetId,
}

impl PrecompileNode for LeafImageFilter {
    fn kind(&self) -> PrecompileKind {
        PrecompileKind::ImageFilter
    }

    fn add_to_key(
        &self,
        _context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) {
        debug_assert_eq!(desired_combination, 0);
        builder.add_block(self.snippet);
    }
}

#[must_use]
pub fn blur() -> PrecompileImageFilter {
    PrecompileImageFilter::new(LeafImageFilter {
        snippet: SnippetId::BlurImageFilter,
    })
}

#[must_use]
pub fn image() -> PrecompileImageFilter {
    PrecompileImageFilter::new(LeafImageFilter {
        snippet: SnippetId::ImageImageFilter,
    })
}
