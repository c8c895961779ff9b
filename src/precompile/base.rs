//! Option node contract and typed handles.
//!
//! Every precompile option implements [`PrecompileNode`]. A node describes one
//! family of acceptable rendering behavior and how many concrete variants it
//! expands to:
//!
//! ```text
//! num_combinations = num_intrinsic_combinations × num_child_combinations
//! ```
//!
//! Nodes are immutable once built and shared through `Arc`, so the same option
//! can appear in several option lists and be decoded from many threads at once.
//!
//! The typed handles ([`PrecompileShader`], [`PrecompileBlender`], …) pin a
//! node to one [`PrecompileKind`] so option lists and child slots cannot be
//! filled with the wrong kind of node.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::blend_mode::BlendMode;
use crate::key::{KeyContext, PaintParamsKeyBuilder};

/// The paint stage (or child position) a node may be used in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecompileKind {
    Shader,
    ColorFilter,
    Blender,
    MaskFilter,
    ImageFilter,
}

/// Base contract shared by every precompile option.
pub trait PrecompileNode: fmt::Debug + Send + Sync {
    fn kind(&self) -> PrecompileKind;

    /// Variants this node offers on its own, independent of its children.
    fn num_intrinsic_combinations(&self) -> usize {
        1
    }

    /// Product of the combination counts of all child slots.
    fn num_child_combinations(&self) -> usize {
        1
    }

    /// Total number of concrete variants this node expands to.
    ///
    /// Must be stable for the lifetime of the node. Saturates at
    /// [`SATURATED_COUNT`](super::combination::SATURATED_COUNT).
    fn num_combinations(&self) -> usize {
        self.num_intrinsic_combinations()
            .saturating_mul(self.num_child_combinations())
    }

    /// `Some` for blenders that are a plain algebraic blend mode.
    fn as_blend_mode(&self) -> Option<BlendMode> {
        None
    }

    /// Appends the variant selected by `desired_combination` to `builder`.
    ///
    /// `desired_combination` must be `< self.num_combinations()`. The intrinsic
    /// variant is the fastest-varying digit, followed by the child slots in
    /// declaration order.
    fn add_to_key(
        &self,
        context: &KeyContext<'_>,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    );
}

macro_rules! precompile_handle {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(Arc<dyn PrecompileNode>);

        impl $name {
            /// Wraps `node`, which must report the matching kind.
            #[must_use]
            pub fn new<N: PrecompileNode + 'static>(node: N) -> Self {
                debug_assert_eq!(node.kind(), PrecompileKind::$kind);
                Self(Arc::new(node))
            }

            /// Wraps a shared node, returning `None` if its kind does not match.
            #[must_use]
            pub fn from_node(node: Arc<dyn PrecompileNode>) -> Option<Self> {
                (node.kind() == PrecompileKind::$kind).then(|| Self(node))
            }

            #[inline]
            #[must_use]
            pub fn node(&self) -> &Arc<dyn PrecompileNode> {
                &self.0
            }

            /// `true` if both handles share the same node.
            #[inline]
            #[must_use]
            pub fn ptr_eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0)
            }
        }

        impl Deref for $name {
            type Target = dyn PrecompileNode;

            #[inline]
            fn deref(&self) -> &Self::Target {
                self.0.as_ref()
            }
        }
    };
}

precompile_handle!(
    /// Shared handle to a shader option.
    PrecompileShader => Shader
);
precompile_handle!(
    /// Shared handle to a mask filter option.
    PrecompileMaskFilter => MaskFilter
);
precompile_handle!(
    /// Shared handle to a color filter option.
    PrecompileColorFilter => ColorFilter
);
precompile_handle!(
    /// Shared handle to a blender option.
    PrecompileBlender => Blender
);
precompile_handle!(
    /// Shared handle to an image filter option.
    PrecompileImageFilter => ImageFilter
);
