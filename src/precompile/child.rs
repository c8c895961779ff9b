//! Effect children.
//!
//! - [`PrecompileChildPtr`]: one concrete child assignment (a shader, color
//!   filter or blender option, or no child at all)
//! - [`PrecompileChildOptions`]: the mutually exclusive alternatives allowed
//!   for one child slot

use std::sync::Arc;

use crate::errors::{PrecompileError, Result};
use crate::key::{KeyContext, PaintParamsKeyBuilder, SnippetId};

use super::base::{
    PrecompileBlender, PrecompileColorFilter, PrecompileKind, PrecompileNode, PrecompileShader,
};
use super::combination;

/// The kinds of node an effect may declare as a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildType {
    Shader,
    ColorFilter,
    Blender,
}

impl ChildType {
    /// Block emitted when a slot of this type is left empty.
    #[must_use]
    pub fn passthrough_snippet(self) -> SnippetId {
        match self {
            ChildType::Shader => SnippetId::PassthroughShader,
            ChildType::ColorFilter => SnippetId::PassthroughColorFilter,
            ChildType::Blender => SnippetId::PassthroughBlender,
        }
    }
}

impl From<ChildType> for PrecompileKind {
    fn from(ty: ChildType) -> Self {
        match ty {
            ChildType::Shader => PrecompileKind::Shader,
            ChildType::ColorFilter => PrecompileKind::ColorFilter,
            ChildType::Blender => PrecompileKind::Blender,
        }
    }
}

// ─── Child Pointer ────────────────────────────────────────────────────────────

/// A typed child assignment.
///
/// `Empty` is a valid assignment meaning "no child"; it stands for exactly one
/// combination.
#[derive(Debug, Clone, Default)]
pub enum PrecompileChildPtr {
    #[default]
    Empty,
    Shader(PrecompileShader),
    ColorFilter(PrecompileColorFilter),
    Blender(PrecompileBlender),
}

impl PrecompileChildPtr {
    /// The child's type, or `None` for an empty pointer.
    #[must_use]
    pub fn child_type(&self) -> Option<ChildType> {
        match self {
            Self::Empty => None,
            Self::Shader(_) => Some(ChildType::Shader),
            Self::ColorFilter(_) => Some(ChildType::ColorFilter),
            Self::Blender(_) => Some(ChildType::Blender),
        }
    }

    #[must_use]
    pub fn shader(&self) -> Option<&PrecompileShader> {
        match self {
            Self::Shader(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn color_filter(&self) -> Option<&PrecompileColorFilter> {
        match self {
            Self::ColorFilter(cf) => Some(cf),
            _ => None,
        }
    }

    #[must_use]
    pub fn blender(&self) -> Option<&PrecompileBlender> {
        match self {
            Self::Blender(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    fn node(&self) -> Option<&dyn PrecompileNode> {
        match self {
            Self::Empty => None,
            Self::Shader(s) => Some(&**s),
            Self::ColorFilter(cf) => Some(&**cf),
            Self::Blender(b) => Some(&**b),
        }
    }

    #[must_use]
    pub fn num_combinations(&self) -> usize {
        self.node().map_or(1, |node| node.num_combinations())
    }

    /// Emits the child, or a pass-through block of type `slot_type` if empty.
    pub fn add_to_key(
        &self,
        context: &KeyContext<'_>,
        slot_type: ChildType,
        desired_combination: usize,
        builder: &mut PaintParamsKeyBuilder,
    ) {
        match self.node() {
            Some(node) => node.add_to_key(context, desired_combination, builder),
            None => {
                debug_assert_eq!(desired_combination, 0);
                builder.add_block(slot_type.passthrough_snippet());
            }
        }
    }
}

impl From<PrecompileShader> for PrecompileChildPtr {
    fn from(s: PrecompileShader) -> Self {
        Self::Shader(s)
    }
}

impl From<PrecompileColorFilter> for PrecompileChildPtr {
    fn from(cf: PrecompileColorFilter) -> Self {
        Self::ColorFilter(cf)
    }
}

impl From<PrecompileBlender> for PrecompileChildPtr {
    fn from(b: PrecompileBlender) -> Self {
        Self::Blender(b)
    }
}

impl TryFrom<Arc<dyn PrecompileNode>> for PrecompileChildPtr {
    type Error = PrecompileError;

    fn try_from(node: Arc<dyn PrecompileNode>) -> Result<Self> {
        let kind = node.kind();
        let child = match kind {
            PrecompileKind::Shader => PrecompileShader::from_node(node).map(Self::Shader),
            PrecompileKind::ColorFilter => {
                PrecompileColorFilter::from_node(node).map(Self::ColorFilter)
            }
            PrecompileKind::Blender => PrecompileBlender::from_node(node).map(Self::Blender),
            PrecompileKind::MaskFilter | PrecompileKind::ImageFilter => None,
        };
        child.ok_or(PrecompileError::InvalidChildKind(kind))
    }
}

// ─── Child Options ────────────────────────────────────────────────────────────

/// The alternatives allowed for one child slot.
///
/// Alternatives are mutually exclusive, so the slot's combination count is the
/// *sum* of theirs.
#[derive(Debug, Clone, Default)]
pub struct PrecompileChildOptions {
    options: Vec<PrecompileChildPtr>,
}

impl PrecompileChildOptions {
    #[must_use]
    pub fn new(options: Vec<PrecompileChildPtr>) -> Self {
        Self { options }
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &[PrecompileChildPtr] {
        &self.options
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Raw sum of the alternatives' counts; 0 when no alternative is registered.
    #[must_use]
    pub fn num_combinations(&self) -> usize {
        combination::sum_combinations(&self.options, PrecompileChildPtr::num_combinations)
    }

    /// Resolves a slot-level index to an alternative and its local index.
    #[must_use]
    pub fn select(&self, slot_index: usize) -> Option<(&PrecompileChildPtr, usize)> {
        combination::select_option(&self.options, slot_index, PrecompileChildPtr::num_combinations)
    }
}

impl<T: Into<PrecompileChildPtr>> FromIterator<T> for PrecompileChildOptions {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
