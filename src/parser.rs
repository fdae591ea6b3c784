//! The line-oriented state machine that turns org documents into blocks,
//! segments, and file bindings (component G).

use regex::Regex;

use crate::buffer::InputBuffer;
use crate::error::{Result as TangleResult, TangleError};
use crate::filelist::FileList;
use crate::registry::{BlockHandle, NameRegistry};
use crate::segment::Segment;
use crate::view::StringView;

/// Where the parser is within the current document's fence structure.
#[derive(Clone, Copy)]
enum State<'arena, 'buf> {
    /// Scanning prose between code blocks.
    OrgMode,
    /// A `#+NAME:` line was just seen; the next non-empty line must open a
    /// `#+BEGIN_SRC` fence for `1`.
    ExpectingBegin(BlockHandle<'arena, 'buf>),
    /// Inside a code block belonging to `0`.
    CodeMode(BlockHandle<'arena, 'buf>),
}

/// A span of accumulated literal text awaiting a flush into a [`Segment`].
struct PendingText {
    start: usize,
    end: usize,
    line: u64,
}

/// Drives the parser's state machine over one or more [`InputBuffer`]s,
/// appending to a shared [`NameRegistry`] and [`FileList`] as it goes.
pub struct Parser<'registry, 'arena, 'buf> {
    registry: &'registry mut NameRegistry<'arena, 'buf>,
    files: &'registry mut FileList<'arena, 'buf>,
    next_segment_id: u64,
    tangle_path: Regex,
    reference_line: Regex,
}

impl<'registry, 'arena, 'buf> Parser<'registry, 'arena, 'buf> {
    pub fn new(
        registry: &'registry mut NameRegistry<'arena, 'buf>,
        files: &'registry mut FileList<'arena, 'buf>,
    ) -> Self {
        Parser {
            registry,
            files,
            next_segment_id: 1,
            tangle_path: Regex::new(r":tangle\s+(\S+)").unwrap(),
            reference_line: Regex::new(r"^<<([^>\n]+)>>$").unwrap(),
        }
    }

    /// Parses every buffer in `buffers`, in order. Document order across
    /// buffers is the ordering used for multi-definition concatenation (§4.G).
    pub fn parse_all<I>(&mut self, buffers: I) -> TangleResult<()>
    where
        I: IntoIterator<Item = &'buf InputBuffer>,
    {
        for buf in buffers {
            self.parse_document(buf)?;
        }
        Ok(())
    }

    /// Parses one document, mutating the registry and file list in place.
    pub fn parse_document(&mut self, buf: &'buf InputBuffer) -> TangleResult<()> {
        let text = buf.text();
        let path = buf.path_view();
        let mut state = State::OrgMode;
        let mut pending: Option<PendingText> = None;
        let mut last_line = 0u64;

        for (line, start, line_no) in LineOffsets::new(text) {
            last_line = line_no;
            match state {
                State::OrgMode => {
                    if let Some(classified) = classify_name_line(line) {
                        let name = classified.map_err(|()| TangleError::Parse {
                            file: path.as_str().to_string(),
                            line: line_no,
                            message: "#+NAME line missing ':'".to_string(),
                        })?;
                        let handle = self.registry.get_or_create(StringView::new(name));
                        handle.borrow_mut().begin_definition();
                        state = State::ExpectingBegin(handle);
                    }
                }
                State::ExpectingBegin(handle) => {
                    if line.starts_with("#+BEGIN_SRC") {
                        if let Some(captures) = self.tangle_path.captures(line) {
                            let path_arg = captures.get(1).unwrap().as_str();
                            self.files.push(StringView::new(path_arg), handle);
                        }
                        state = State::CodeMode(handle);
                        pending = None;
                    } else if line.trim().is_empty() {
                        state = State::ExpectingBegin(handle);
                    } else {
                        return Err(TangleError::Parse {
                            file: path.as_str().to_string(),
                            line: line_no,
                            message: "expected #+BEGIN_SRC after #+NAME:".to_string(),
                        });
                    }
                }
                State::CodeMode(handle) => {
                    if line.trim_end_matches(['\n', '\r']) == "#+END_SRC" {
                        self.flush_text(handle, &mut pending, text, path);
                        state = State::OrgMode;
                    } else if let Some(captures) = self.reference_line.captures(line.trim()) {
                        self.flush_text(handle, &mut pending, text, path);
                        let name = captures.get(1).unwrap().as_str();
                        let id = self.next_id();
                        handle
                            .borrow_mut()
                            .push_segment(Segment::reference(StringView::new(name), path, line_no, id));
                        state = State::CodeMode(handle);
                    } else {
                        match &mut pending {
                            Some(p) => p.end = start + line.len(),
                            None => {
                                pending = Some(PendingText {
                                    start,
                                    end: start + line.len(),
                                    line: line_no,
                                })
                            }
                        }
                        state = State::CodeMode(handle);
                    }
                }
            }
        }

        match state {
            State::OrgMode => Ok(()),
            State::ExpectingBegin(_) => Err(TangleError::Parse {
                file: path.as_str().to_string(),
                line: last_line,
                message: "unterminated #+NAME: block, expected #+BEGIN_SRC".to_string(),
            }),
            State::CodeMode(_) => Err(TangleError::Parse {
                file: path.as_str().to_string(),
                line: last_line,
                message: "unterminated code block, expected #+END_SRC".to_string(),
            }),
        }
    }

    fn flush_text(
        &mut self,
        handle: BlockHandle<'arena, 'buf>,
        pending: &mut Option<PendingText>,
        text: &'buf str,
        path: StringView<'buf>,
    ) {
        if let Some(p) = pending.take() {
            if p.end > p.start {
                let id = self.next_id();
                handle.borrow_mut().push_segment(Segment::text(
                    StringView::new(&text[p.start..p.end]),
                    path,
                    p.line,
                    id,
                ));
            }
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_segment_id;
        self.next_segment_id += 1;
        id
    }
}

/// Returns `None` if `line` does not begin with `#+NAME`, `Some(Ok(name))` if
/// it is a well-formed `#+NAME: <name>` line, `Some(Err(()))` if the `#+NAME`
/// prefix is present but the colon is missing.
fn classify_name_line(line: &str) -> Option<std::result::Result<&str, ()>> {
    let rest = line.strip_prefix("#+NAME")?;
    match rest.strip_prefix(':') {
        Some(after_colon) => {
            let name = after_colon.trim_start_matches(' ').trim_end_matches(['\n', '\r']);
            Some(Ok(name))
        }
        None => Some(Err(())),
    }
}

/// Yields `(line, byte_offset, 1_based_line_number)` for each line of `text`,
/// where `line` includes its trailing `\n` (absent only for a final line with
/// none). Unlike [`crate::buffer::InputBuffer::lines`], this also yields the
/// byte offset, needed to slice a contiguous multi-line [`StringView`] out of
/// `text` for text-segment accumulation.
struct LineOffsets<'buf> {
    text: &'buf str,
    pos: usize,
    line_number: u64,
}

impl<'buf> LineOffsets<'buf> {
    fn new(text: &'buf str) -> Self {
        LineOffsets {
            text,
            pos: 0,
            line_number: 0,
        }
    }
}

impl<'buf> Iterator for LineOffsets<'buf> {
    type Item = (&'buf str, usize, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }
        self.line_number += 1;
        let start = self.pos;
        let end = match self.text[start..].find('\n') {
            Some(i) => start + i + 1,
            None => self.text.len(),
        };
        self.pos = end;
        Some((&self.text[start..end], start, self.line_number))
    }
}
