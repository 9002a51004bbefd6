// src/region.rs
//
// Balanced-region extraction.
//
// Given a marker, find the nearest container opening tag that precedes it and
// return the span through its matching closing tag. Depth counts every tag of
// the container's element type, related or not; other element types are never
// counted. The backward search is a heuristic: a marker that follows a closed
// sibling container resolves to that sibling (see the tests below).

use memchr::{memchr, memmem};

use crate::error::{Error, Result};
use crate::tag::{self, Token};

/// The element wrapping a panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Container {
    /// Element name counted for depth, e.g. `div`.
    pub tag: &'static str,
    /// Exact opening-tag signature searched backward from the marker.
    pub opening: &'static str,
}

/// A half-open byte span `[start, end)` into a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Region start must be <= end");
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The region's text. `doc` must be the document it was extracted from.
    #[inline]
    pub fn text<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.start..self.end]
    }
}

/// Locate the container enclosing the first occurrence of `marker`.
pub fn extract(document: &str, marker: &str, container: &Container) -> Result<Region> {
    debug_assert!(container.opening.starts_with(&format!("<{}", container.tag)));

    let s = document.as_bytes();
    let at = memmem::find(s, marker.as_bytes()).ok_or_else(|| Error::missing(marker))?;

    let start = memmem::rfind(&s[..at], container.opening.as_bytes())
        .ok_or_else(|| Error::missing(format!("{} before {}", container.opening, marker)))?;

    let end = balanced_end(s, start, container.tag.as_bytes()).map_err(|depth| {
        Error::UnbalancedStructure {
            marker: marker.to_string(),
            start,
            depth,
        }
    })?;

    log::debug!(
        "{} -> container at {}..{} ({} bytes)",
        marker,
        start,
        end,
        end - start
    );
    Ok(Region::new(start, end))
}

/// Scan forward from the opening tag at `start` until depth returns to zero.
/// Returns the offset just past the matching closing tag, or the depth still
/// open when the document runs out.
fn balanced_end(s: &[u8], start: usize, name: &[u8]) -> std::result::Result<usize, usize> {
    let mut depth = 0usize;
    let mut i = start;

    while let Some(off) = memchr(b'<', &s[i..]) {
        i += off;
        match tag::token_at(s, i, name) {
            Some(Token::Open(len)) => {
                depth += 1;
                i += len;
            }
            Some(Token::Close(len)) => {
                i += len;
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Ok(i);
                }
            }
            None => i += 1,
        }
    }
    Err(depth)
}
