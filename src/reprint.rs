//! Reprints a rewritten module by patching the original text.
//!
//! Only the ranges touched by the rewriter change. Every other byte of the
//! input is copied through, so formatting and comments survive.

use swc_core::common::{BytePos, Span};

use crate::error::TransformError;

/// A piece of replacement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Text(String),
    /// Original source text of a node that is reused as-is.
    Source(Span),
}

/// Replace `span` of the original text with `chunks`. An empty span is an
/// insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub span: Span,
    pub chunks: Vec<Chunk>,
}

impl Patch {
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            chunks: vec![Chunk::Text(text.into())],
        }
    }

    pub fn remove(lo: BytePos, hi: BytePos) -> Self {
        Self {
            span: Span::new(lo, hi),
            chunks: Vec::new(),
        }
    }

    pub fn insert(at: BytePos, chunks: Vec<Chunk>) -> Self {
        Self {
            span: Span::new(at, at),
            chunks,
        }
    }
}

/// Apply `patches` to `source`, whose first byte sits at `base` in the
/// source map. Overlapping patches are rejected.
pub fn apply_patches(
    source: &str,
    base: BytePos,
    mut patches: Vec<Patch>,
) -> Result<String, TransformError> {
    patches.sort_by_key(|patch| (patch.span.lo, patch.span.hi));

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;

    for patch in &patches {
        let (start, end) = offsets(source, base, patch.span)?;
        if start < cursor {
            return Err(patch_error(patch.span, "overlaps a previous patch"));
        }

        out.push_str(&source[cursor..start]);
        for chunk in &patch.chunks {
            match chunk {
                Chunk::Text(text) => out.push_str(text),
                Chunk::Source(span) => {
                    let (lo, hi) = offsets(source, base, *span)?;
                    out.push_str(&source[lo..hi]);
                }
            }
        }
        cursor = end;
    }

    out.push_str(&source[cursor..]);
    Ok(out)
}

fn offsets(source: &str, base: BytePos, span: Span) -> Result<(usize, usize), TransformError> {
    if span.lo < base || span.hi < span.lo {
        return Err(patch_error(span, "span is outside the source file"));
    }
    let start = (span.lo.0 - base.0) as usize;
    let end = (span.hi.0 - base.0) as usize;
    if source.get(start..end).is_none() {
        return Err(patch_error(span, "span is outside the source file"));
    }
    Ok((start, end))
}

fn patch_error(span: Span, reason: &str) -> TransformError {
    TransformError::Patch {
        lo: span.lo.0,
        hi: span.hi.0,
        reason: reason.to_string(),
    }
}
