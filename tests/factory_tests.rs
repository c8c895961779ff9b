//! Factory Option Tests
//!
//! Tests for:
//! - Leaf options and gradient stop specializations
//! - Blend shader child slots and emitted blocks
//! - Runtime effect construction checks and child decoding order
//! - PrecompileChildPtr typing

mod common;

use std::sync::Arc;

use myth_precompile::key::{KeyBlock, PaintParamsKey};
use myth_precompile::prelude::*;
use myth_precompile::{
    KeyContext, PrecompileError, PrecompileKind, PrecompileNode, PrecompileShader, SnippetId,
};

fn emit(node: &dyn PrecompileNode, desired: usize) -> PaintParamsKey {
    let dictionary = ShaderCodeDictionary::new();
    let context = KeyContext::new(&dictionary);
    let mut builder = myth_precompile::PaintParamsKeyBuilder::new();
    node.add_to_key(&context, desired, &mut builder);
    builder.lock().unwrap()
}

fn snippets<'a>(blocks: impl Iterator<Item = KeyBlock<'a>>) -> Vec<u32> {
    blocks.map(|b| b.snippet).collect()
}

fn ids(ids: &[SnippetId]) -> Vec<u32> {
    ids.iter().map(|id| id.as_u32()).collect()
}

// ============================================================================
// Leaf Options
// ============================================================================

#[test]
fn leaf_options_have_one_combination() {
    assert_eq!(shaders::color().num_combinations(), 1);
    assert_eq!(shaders::image().num_combinations(), 1);
    assert_eq!(mask_filters::blur().num_combinations(), 1);
    assert_eq!(color_filters::matrix().num_combinations(), 1);
    assert_eq!(image_filters::blur().num_combinations(), 1);
    assert_eq!(blenders::mode(BlendMode::Xor).num_combinations(), 1);
}

#[test]
fn handles_report_their_kind() {
    assert_eq!(shaders::image().kind(), PrecompileKind::Shader);
    assert_eq!(mask_filters::blur().kind(), PrecompileKind::MaskFilter);
    assert_eq!(color_filters::matrix().kind(), PrecompileKind::ColorFilter);
    assert_eq!(image_filters::image().kind(), PrecompileKind::ImageFilter);
    assert_eq!(
        blenders::mode(BlendMode::Plus).as_blend_mode(),
        Some(BlendMode::Plus)
    );
}

#[test]
fn blend_mode_blender_emits_nothing() {
    assert!(emit(&*blenders::mode(BlendMode::Multiply), 0).is_empty());
}

#[test]
fn gradient_has_two_stop_variants() {
    let gradient = shaders::linear_gradient();
    assert_eq!(gradient.num_intrinsic_combinations(), 2);
    assert_eq!(gradient.num_combinations(), 2);

    assert_eq!(
        emit(&*gradient, 0).root_snippets(),
        ids(&[SnippetId::LinearGradientShader4])
    );
    assert_eq!(
        emit(&*gradient, 1).root_snippets(),
        ids(&[SnippetId::LinearGradientShader8])
    );
    assert_eq!(
        emit(&*shaders::two_point_conical_gradient(), 1).root_snippets(),
        ids(&[SnippetId::ConicalGradientShader8])
    );
}

// ============================================================================
// Blend Shader
// ============================================================================

fn blend_shader() -> PrecompileShader {
    shaders::blend_modes(
        &[BlendMode::Multiply, BlendMode::Screen],
        [shaders::image()],
        [shaders::linear_gradient(), shaders::color()],
    )
    .unwrap()
}

#[test]
fn blend_shader_multiplies_child_slots() {
    // blenders (2) × dsts (1) × srcs (2 + 1)
    assert_eq!(blend_shader().num_combinations(), 6);
}

#[test]
fn blend_shader_decodes_blender_first() {
    let shader = blend_shader();

    let key = emit(&*shader, 1);
    let root: Vec<_> = key.blocks().collect();
    assert_eq!(root.len(), 1);
    assert!(root[0].is(SnippetId::BlendShader));

    let children: Vec<_> = root[0].children(0).collect();
    assert_eq!(
        snippets(children.iter().copied()),
        ids(&[
            SnippetId::BlendModeBlender,
            SnippetId::ImageShader,
            SnippetId::LinearGradientShader4,
        ])
    );
    assert_eq!(children[0].payload, &[BlendMode::Screen.key_word()]);

    let key = emit(&*shader, 2);
    let children = snippets(key.blocks().next().unwrap().children(0));
    assert_eq!(children[2], SnippetId::LinearGradientShader8.as_u32());

    let key = emit(&*shader, 5);
    let children = snippets(key.blocks().next().unwrap().children(0));
    assert_eq!(children[2], SnippetId::SolidColorShader.as_u32());
}

#[test]
fn blend_shader_without_blenders_uses_src_over() {
    let shader = shaders::blend([], [shaders::color()], [shaders::image()]).unwrap();
    assert_eq!(shader.num_combinations(), 1);

    let key = emit(&*shader, 0);
    let blend = key.blocks().next().unwrap().children(0).next().unwrap();
    assert!(blend.is(SnippetId::BlendModeBlender));
    assert_eq!(blend.payload, &[BlendMode::SrcOver.key_word()]);
}

#[test]
fn blend_shader_requires_dst_and_src() {
    assert_eq!(
        shaders::blend([], [], [shaders::image()]).unwrap_err(),
        PrecompileError::EmptyChildSlot { slot: 1 }
    );
    assert_eq!(
        shaders::blend_modes(&[BlendMode::Src], [shaders::image()], []).unwrap_err(),
        PrecompileError::EmptyChildSlot { slot: 2 }
    );
}

// ============================================================================
// Runtime Effects
// ============================================================================

fn tinted_effect() -> Arc<RuntimeEffect> {
    Arc::new(RuntimeEffect::new(
        "tinted",
        "half4 main(float2 p) { return tint.eval(input.eval(p)); }",
        RuntimeEffectFlags::ALLOW_SHADER,
        vec![
            RuntimeEffectChild::new("input", ChildType::Shader),
            RuntimeEffectChild::new("tint", ChildType::ColorFilter),
        ],
    ))
}

fn tinted_options() -> Vec<PrecompileChildOptions> {
    vec![
        [shaders::color(), shaders::linear_gradient()]
            .into_iter()
            .collect(),
        PrecompileChildOptions::new(vec![
            PrecompileChildPtr::Empty,
            color_filters::matrix().into(),
        ]),
    ]
}

#[test]
fn runtime_effect_counts_product_of_slots() {
    let shader = make_precompile_shader(tinted_effect(), tinted_options()).unwrap();
    assert_eq!(shader.kind(), PrecompileKind::Shader);
    assert_eq!(shader.num_child_combinations(), 3 * 2);
    assert_eq!(shader.num_combinations(), 6);
}

#[test]
fn runtime_effect_decodes_slots_in_order() {
    let effect = tinted_effect();
    let shader = make_precompile_shader(effect.clone(), tinted_options()).unwrap();

    // 4 = slot0 digit 1 (gradient, 4 stops) + 3 × slot1 digit 1 (matrix)
    let key = emit(&*shader, 4);
    let block = key.blocks().next().unwrap();
    assert!(block.is(SnippetId::RuntimeShader));
    assert_eq!(block.payload[0], effect.id());
    assert_eq!(
        snippets(block.children(1)),
        ids(&[
            SnippetId::LinearGradientShader4,
            SnippetId::MatrixColorFilter
        ])
    );

    // 2 = slot0 digit 2 (gradient, 8 stops) + empty tint slot
    let key = emit(&*shader, 2);
    assert_eq!(
        snippets(key.blocks().next().unwrap().children(1)),
        ids(&[
            SnippetId::LinearGradientShader8,
            SnippetId::PassthroughColorFilter
        ])
    );
}

#[test]
fn runtime_effect_rejects_disallowed_kind() {
    let err = make_precompile_blender(tinted_effect(), tinted_options()).unwrap_err();
    assert_eq!(
        err,
        PrecompileError::EffectKindNotAllowed {
            effect: "tinted".to_owned(),
            kind: PrecompileKind::Blender,
        }
    );
}

#[test]
fn runtime_effect_rejects_wrong_child_count() {
    let err = make_precompile_shader(tinted_effect(), vec![]).unwrap_err();
    assert_eq!(
        err,
        PrecompileError::ChildCountMismatch {
            expected: 2,
            actual: 0
        }
    );
}

#[test]
fn runtime_effect_rejects_empty_slot() {
    let mut options = tinted_options();
    options[1] = PrecompileChildOptions::default();
    let err = make_precompile_shader(tinted_effect(), options).unwrap_err();
    assert_eq!(err, PrecompileError::EmptyChildSlot { slot: 1 });
}

#[test]
fn runtime_effect_rejects_mismatched_child() {
    let mut options = tinted_options();
    options[0] = [blenders::mode(BlendMode::Src)].into_iter().collect();
    let err = make_precompile_shader(tinted_effect(), options).unwrap_err();
    assert_eq!(
        err,
        PrecompileError::ChildKindMismatch {
            slot: 0,
            expected: ChildType::Shader,
            actual: ChildType::Blender,
        }
    );
}

#[test]
fn runtime_blender_in_paint_options() {
    let effect = Arc::new(RuntimeEffect::new(
        "mix",
        "half4 main(half4 src, half4 dst) { return mix(src, dst, 0.5); }",
        RuntimeEffectFlags::ALLOW_BLENDER | RuntimeEffectFlags::ALLOW_COLOR_FILTER,
        vec![RuntimeEffectChild::new("inner", ChildType::Blender)],
    ));
    let inner: PrecompileChildOptions = [common::blender(0, 3)].into_iter().collect();
    let blender = make_precompile_blender(effect.clone(), vec![inner]).unwrap();
    assert_eq!(blender.num_combinations(), 3);
    assert_eq!(blender.as_blend_mode(), None);

    let mut options = PaintOptions::new();
    options.set_blenders([blenders::mode(BlendMode::SrcOver), blender]);
    assert_eq!(options.num_blend_mode_combinations(), 4);

    let color_filter = make_precompile_color_filter(
        effect,
        vec![PrecompileChildOptions::new(vec![PrecompileChildPtr::Empty])],
    )
    .unwrap();
    assert_eq!(color_filter.kind(), PrecompileKind::ColorFilter);
    assert_eq!(color_filter.num_combinations(), 1);
}

#[test]
fn runtime_effect_id_follows_source() {
    let a = RuntimeEffect::new("a", "same", RuntimeEffectFlags::ALLOW_SHADER, vec![]);
    let b = RuntimeEffect::new("b", "same", RuntimeEffectFlags::ALLOW_SHADER, vec![]);
    let c = RuntimeEffect::new("c", "other", RuntimeEffectFlags::ALLOW_SHADER, vec![]);
    assert_eq!(a.id(), b.id());
    assert_ne!(a.id(), c.id());
}

// ============================================================================
// Child Pointers
// ============================================================================

#[test]
fn child_ptr_accessors_match_tag() {
    let shader: PrecompileChildPtr = shaders::image().into();
    assert_eq!(shader.child_type(), Some(ChildType::Shader));
    assert!(shader.shader().is_some());
    assert!(shader.color_filter().is_none());
    assert!(shader.blender().is_none());

    let blender: PrecompileChildPtr = blenders::mode(BlendMode::Src).into();
    assert_eq!(blender.child_type(), Some(ChildType::Blender));
    assert!(blender.blender().is_some());
    assert!(blender.shader().is_none());

    let empty = PrecompileChildPtr::default();
    assert!(empty.is_empty());
    assert_eq!(empty.child_type(), None);
    assert_eq!(empty.num_combinations(), 1);
}

#[test]
fn child_ptr_from_node_checks_kind() {
    let shader = PrecompileChildPtr::try_from(shaders::color().node().clone()).unwrap();
    assert_eq!(shader.child_type(), Some(ChildType::Shader));

    let err = PrecompileChildPtr::try_from(mask_filters::blur().node().clone()).unwrap_err();
    assert_eq!(err, PrecompileError::InvalidChildKind(PrecompileKind::MaskFilter));

    let err = PrecompileChildPtr::try_from(image_filters::blur().node().clone()).unwrap_err();
    assert_eq!(err, PrecompileError::InvalidChildKind(PrecompileKind::ImageFilter));
}

#[test]
fn child_options_select_linearly() {
    let options: PrecompileChildOptions = [
        PrecompileChildPtr::Empty,
        shaders::radial_gradient().into(),
        shaders::image().into(),
    ]
    .into_iter()
    .collect();
    assert_eq!(options.num_combinations(), 4);

    let (child, local) = options.select(2).unwrap();
    assert!(child.shader().is_some());
    assert_eq!(local, 1);
    let (child, local) = options.select(3).unwrap();
    assert!(child.shader().unwrap().ptr_eq(options.options()[2].shader().unwrap()));
    assert_eq!(local, 0);
    assert!(options.select(4).is_none());

    assert_eq!(PrecompileChildOptions::default().num_combinations(), 0);
}
