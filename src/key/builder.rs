//! Paint key construction.
//!
//! A [`PaintParamsKey`] is a flat `u32` stream of nested blocks. Every block is
//! laid out as `[snippet_id, payload_len, payload...]` where the payload holds
//! raw data words and child blocks. The layout is canonical: two keys are equal
//! exactly when the same snippets were emitted in the same order with the same
//! data.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use xxhash_rust::xxh3::xxh3_128;

use crate::errors::{PrecompileError, Result};

// ─── Snippet Ids ──────────────────────────────────────────────────────────────

/// Identifies the shader code snippet a key block stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SnippetId {
    // Shaders
    SolidColorShader = 1,
    ImageShader,
    LinearGradientShader4,
    LinearGradientShader8,
    RadialGradientShader4,
    RadialGradientShader8,
    SweepGradientShader4,
    SweepGradientShader8,
    ConicalGradientShader4,
    ConicalGradientShader8,
    BlendShader,
    PassthroughShader,

    // Blenders
    BlendModeBlender,
    PassthroughBlender,

    // Filters
    BlurMaskFilter,
    MatrixColorFilter,
    PassthroughColorFilter,
    BlurImageFilter,
    ImageImageFilter,

    // Runtime effects
    RuntimeShader,
    RuntimeColorFilter,
    RuntimeBlender,
}

impl SnippetId {
    #[inline]
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

// ─── Key ──────────────────────────────────────────────────────────────────────

/// Canonical, hashable key for one fully-resolved paint combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaintParamsKey {
    words: SmallVec<[u32; 16]>,
}

impl PaintParamsKey {
    #[inline]
    #[must_use]
    pub fn as_words(&self) -> &[u32] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// xxh3-128 of the key words, stable across processes.
    #[must_use]
    pub fn fingerprint(&self) -> u128 {
        xxh3_128(bytemuck::cast_slice(self.words.as_slice()))
    }

    /// Iterates the top-level blocks of the key.
    pub fn blocks(&self) -> KeyBlocks<'_> {
        KeyBlocks { words: &self.words }
    }

    /// Snippet ids of the top-level blocks, in emission order.
    #[must_use]
    pub fn root_snippets(&self) -> Vec<u32> {
        self.blocks().map(|b| b.snippet).collect()
    }
}

/// One block of a [`PaintParamsKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBlock<'a> {
    pub snippet: u32,
    pub payload: &'a [u32],
}

impl<'a> KeyBlock<'a> {
    #[inline]
    #[must_use]
    pub fn is(&self, id: SnippetId) -> bool {
        self.snippet == id.as_u32()
    }

    /// Iterates blocks nested in this block's payload, starting at word `skip`.
    ///
    /// `skip` is the number of leading data words the snippet writes before
    /// its children.
    #[must_use]
    pub fn children(&self, skip: usize) -> KeyBlocks<'a> {
        KeyBlocks {
            words: self.payload.get(skip..).unwrap_or(&[]),
        }
    }
}

/// Iterator over consecutive blocks. Stops at the first malformed header.
#[derive(Debug, Clone)]
pub struct KeyBlocks<'a> {
    words: &'a [u32],
}

impl<'a> Iterator for KeyBlocks<'a> {
    type Item = KeyBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&snippet, rest) = self.words.split_first()?;
        let (&len, rest) = rest.split_first()?;
        let len = len as usize;
        if len > rest.len() {
            self.words = &[];
            return None;
        }
        let (payload, rest) = rest.split_at(len);
        self.words = rest;
        Some(KeyBlock { snippet, payload })
    }
}

// ─── Builder ──────────────────────────────────────────────────────────────────

/// Scratch accumulator for one key.
///
/// A builder is reused across combinations, so callers must [`reset`] it
/// between keys. It is not meant to be shared between threads; parallel
/// drivers create one per worker.
///
/// [`reset`]: PaintParamsKeyBuilder::reset
#[derive(Debug, Default)]
pub struct PaintParamsKeyBuilder {
    data: Vec<u32>,
    /// Positions of the length words of currently open blocks.
    open_blocks: SmallVec<[usize; 8]>,
}

impl PaintParamsKeyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(32),
            open_blocks: SmallVec::new(),
        }
    }

    pub fn begin_block(&mut self, id: SnippetId) {
        self.data.push(id.as_u32());
        self.open_blocks.push(self.data.len());
        self.data.push(0);
    }

    pub fn end_block(&mut self) {
        let Some(len_pos) = self.open_blocks.pop() else {
            debug_assert!(false, "end_block() without a matching begin_block()");
            return;
        };
        self.data[len_pos] = (self.data.len() - len_pos - 1) as u32;
    }

    /// Appends a block with no payload.
    pub fn add_block(&mut self, id: SnippetId) {
        self.begin_block(id);
        self.end_block();
    }

    /// Appends a raw data word to the innermost open block.
    pub fn add_data(&mut self, word: u32) {
        debug_assert!(!self.open_blocks.is_empty(), "data written outside a block");
        self.data.push(word);
    }

    /// Clears all accumulated state.
    pub fn reset(&mut self) {
        self.data.clear();
        self.open_blocks.clear();
    }

    /// `true` when nothing has been written since the last [`reset`](Self::reset).
    #[inline]
    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.data.is_empty() && self.open_blocks.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Snapshots the accumulated words as a finished key.
    pub fn lock(&self) -> Result<PaintParamsKey> {
        if !self.open_blocks.is_empty() {
            return Err(PrecompileError::UnbalancedKey {
                open_blocks: self.open_blocks.len(),
            });
        }
        Ok(PaintParamsKey {
            words: SmallVec::from_slice(&self.data),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_block_lengths() {
        let mut builder = PaintParamsKeyBuilder::new();
        builder.begin_block(SnippetId::BlendShader);
        builder.add_block(SnippetId::SolidColorShader);
        builder.add_block(SnippetId::ImageShader);
        builder.end_block();

        let key = builder.lock().unwrap();
        assert_eq!(
            key.as_words(),
            &[
                SnippetId::BlendShader.as_u32(),
                4,
                SnippetId::SolidColorShader.as_u32(),
                0,
                SnippetId::ImageShader.as_u32(),
                0,
            ]
        );

        let root: Vec<_> = key.blocks().collect();
        assert_eq!(root.len(), 1);
        assert!(root[0].is(SnippetId::BlendShader));
        let children: Vec<_> = root[0].children(0).map(|b| b.snippet).collect();
        assert_eq!(
            children,
            vec![
                SnippetId::SolidColorShader.as_u32(),
                SnippetId::ImageShader.as_u32()
            ]
        );
    }

    #[test]
    fn test_lock_rejects_open_blocks() {
        let mut builder = PaintParamsKeyBuilder::new();
        builder.begin_block(SnippetId::RuntimeShader);
        assert_eq!(
            builder.lock(),
            Err(PrecompileError::UnbalancedKey { open_blocks: 1 })
        );
    }

    #[test]
    fn test_reset() {
        let mut builder = PaintParamsKeyBuilder::new();
        assert!(builder.is_reset());
        builder.add_block(SnippetId::BlurMaskFilter);
        assert!(!builder.is_reset());
        builder.reset();
        assert!(builder.is_reset());
        assert!(builder.lock().unwrap().is_empty());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let mut builder = PaintParamsKeyBuilder::new();
        builder.add_block(SnippetId::SolidColorShader);
        let a = builder.lock().unwrap();
        builder.reset();
        builder.add_block(SnippetId::SolidColorShader);
        let b = builder.lock().unwrap();
        builder.reset();
        builder.add_block(SnippetId::ImageShader);
        let c = builder.lock().unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_malformed_words_stop_iteration() {
        let key = PaintParamsKey {
            words: SmallVec::from_slice(&[SnippetId::ImageShader.as_u32(), 5, 1]),
        };
        assert_eq!(key.blocks().count(), 0);
    }
}
