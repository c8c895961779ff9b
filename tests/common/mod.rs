//! Shared test options.
//!
//! `FixedNode` offers an arbitrary number of intrinsic variants and emits a
//! block carrying its tag and the local index it was asked for, which makes
//! decoded selections visible in the keys.

#![allow(dead_code)]

use myth_precompile::key::{KeyContext, PaintParamsKeyBuilder, SnippetId};
use myth_precompile::{
    PrecompileBlender, PrecompileColorFilter, PrecompileKind, PrecompileMaskFilter,
    PrecompileNode, PrecompileShader,
};

#[derive(Debug)]
pub struct FixedNode {
    kind: PrecompileKind,
    combinations: usize,
    tag: u32,
}

impl PrecompileNode for FixedNode {
    fn kind(&self) -> PrecompileKind {
        self.kind
    }

    fn num_intrinsic_combinations(&self) -> usize {
        self.combinations
    }

    fn add_to_key(
        &self,
        _context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) {
        assert!(desired_combination < self.combinations);
        builder.begin_block(SnippetId::RuntimeShader);
        builder.add_data(self.tag);
        builder.add_data(desired_combination as u32);
        builder.end_block();
    }
}

fn fixed(kind: PrecompileKind, tag: u32, combinations: usize) -> FixedNode {
    FixedNode {
        kind,
        combinations,
        tag,
    }
}

pub fn shader(tag: u32, combinations: usize) -> PrecompileShader {
    PrecompileShader::new(fixed(PrecompileKind::Shader, tag, combinations))
}

pub fn mask_filter(tag: u32, combinations: usize) -> PrecompileMaskFilter {
    PrecompileMaskFilter::new(fixed(PrecompileKind::MaskFilter, tag, combinations))
}

pub fn color_filter(tag: u32, combinations: usize) -> PrecompileColorFilter {
    PrecompileColorFilter::new(fixed(PrecompileKind::ColorFilter, tag, combinations))
}

pub fn blender(tag: u32, combinations: usize) -> PrecompileBlender {
    PrecompileBlender::new(fixed(PrecompileKind::Blender, tag, combinations))
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
