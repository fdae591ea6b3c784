//! A non-owning view into an [`InputBuffer`](crate::buffer::InputBuffer)'s bytes.
//!
//! `StringView` is the zero-copy currency of the whole crate: every name, every
//! segment of literal text, every output path is a `StringView` rather than an
//! owned `String`. It never copies and is never mutated after construction; its
//! lifetime is tied to the arena that owns the buffer it slices.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

/// A read-only slice of an [`InputBuffer`](crate::buffer::InputBuffer)'s text.
///
/// Equality, ordering, and hashing all delegate to the wrapped `&str`, so a
/// `StringView` can be used directly as a hash-map key (see
/// [`NameRegistry`](crate::registry::NameRegistry)) without ever allocating an
/// owned copy of the name it carries.
#[derive(Clone, Copy)]
pub struct StringView<'buf> {
    text: &'buf str,
}

impl<'buf> StringView<'buf> {
    /// Wraps a borrowed string slice. Zero-copy: no bytes are touched.
    pub fn new(text: &'buf str) -> Self {
        StringView { text }
    }

    /// An empty view, useful as a placeholder before a value is known.
    pub fn empty() -> Self {
        StringView { text: "" }
    }

    pub fn as_str(&self) -> &'buf str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Trims leading/trailing ASCII whitespace without copying.
    pub fn trim(&self) -> StringView<'buf> {
        StringView::new(self.text.trim())
    }
}

impl<'buf> Deref for StringView<'buf> {
    type Target = str;

    fn deref(&self) -> &str {
        self.text
    }
}

impl<'buf> PartialEq for StringView<'buf> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl<'buf> Eq for StringView<'buf> {}

impl<'buf> PartialOrd for StringView<'buf> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'buf> Ord for StringView<'buf> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(other.text)
    }
}

impl<'buf> Hash for StringView<'buf> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl<'buf> fmt::Display for StringView<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

impl<'buf> fmt::Debug for StringView<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.text)
    }
}

impl<'buf> From<&'buf str> for StringView<'buf> {
    fn from(text: &'buf str) -> Self {
        StringView::new(text)
    }
}
