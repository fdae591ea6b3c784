//! Owns the raw text of one source document and exposes it a line at a time.
//!
//! This is the only place in the crate that reads files or owns text data;
//! everything downstream borrows from an `InputBuffer` via [`StringView`].

use std::fs;
use std::io;
use std::path::Path;

use typed_arena::Arena;

use crate::view::StringView;

/// The in-memory bytes of one source document, plus its file name.
///
/// `InputBuffer`s are allocated out of a [`DocumentArena`] so that every
/// `StringView` derived from their text is valid for as long as the arena
/// itself lives — the "master ownership invariant" that makes the rest of the
/// crate's zero-copy segments sound.
pub struct InputBuffer {
    path: String,
    text: String,
}

impl InputBuffer {
    /// The document's path, as given when it was loaded.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// A zero-copy view over the path, for use as a `source_file` field.
    pub fn path_view(&self) -> StringView<'_> {
        StringView::new(&self.path)
    }

    /// The full document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterates the document one line at a time.
    ///
    /// Each item is a byte range ending at the next `\n` inclusive (the final
    /// line of a document that does not end in `\n` is yielded without one),
    /// paired with its monotone 1-based line number. The trailing newline is
    /// never stripped: downstream parsing observes it, and it ends up
    /// preserved verbatim in any Text segment built from the line.
    pub fn lines(&self) -> LineIter<'_> {
        LineIter {
            remaining: &self.text,
            line_number: 0,
        }
    }
}

/// Owns every [`InputBuffer`] loaded for a run, at stable addresses.
///
/// All documents are loaded up front, before parsing begins (see §3's
/// "Lifecycle"), and the arena is then held alive by the top-level entry point
/// for the whole run: nothing the parser or writer produces may outlive it.
#[derive(Default)]
pub struct DocumentArena {
    arena: Arena<InputBuffer>,
}

impl DocumentArena {
    pub fn new() -> Self {
        DocumentArena {
            arena: Arena::new(),
        }
    }

    /// Reads `path` from disk and allocates it into the arena.
    pub fn load_file(&self, path: &Path) -> io::Result<&InputBuffer> {
        let text = fs::read_to_string(path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("could not read {}: {}", path.display(), e),
            )
        })?;
        Ok(self.load_text(path.display().to_string(), text))
    }

    /// Allocates an in-memory document (a name plus its already-resident text)
    /// into the arena, for callers that don't read from disk (tests, embedded
    /// documents resolved by a front end).
    pub fn load_text(&self, path: String, text: String) -> &InputBuffer {
        self.arena.alloc(InputBuffer { path, text })
    }
}

/// Iterator over the lines of an [`InputBuffer`], see
/// [`InputBuffer::lines`].
pub struct LineIter<'buf> {
    remaining: &'buf str,
    line_number: u64,
}

impl<'buf> Iterator for LineIter<'buf> {
    type Item = (StringView<'buf>, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        self.line_number += 1;
        let split = self.remaining.find('\n').map(|i| i + 1);
        let (line, rest) = match split {
            Some(i) => self.remaining.split_at(i),
            None => (self.remaining, ""),
        };
        self.remaining = rest;
        Some((StringView::new(line), self.line_number))
    }
}
