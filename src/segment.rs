//! One piece of a [`Block`](crate::block::Block): literal text or a reference.

use crate::view::StringView;

/// What kind of content a [`Segment`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Literal text, copied verbatim into output.
    Text,
    /// A `<<name>>` marker; `body` holds the referenced block's name.
    Reference,
}

/// One element of a block's ordered segment sequence.
///
/// Immutable once built. `body` is the literal text for [`SegmentKind::Text`]
/// or the referenced name for [`SegmentKind::Reference`]; `source_file` and
/// `line` record where the segment began, for debug-line directives and
/// diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'buf> {
    pub kind: SegmentKind,
    pub body: StringView<'buf>,
    pub source_file: StringView<'buf>,
    pub line: u64,
    pub id: u64,
}

impl<'buf> Segment<'buf> {
    pub fn text(body: StringView<'buf>, source_file: StringView<'buf>, line: u64, id: u64) -> Self {
        Segment {
            kind: SegmentKind::Text,
            body,
            source_file,
            line,
            id,
        }
    }

    pub fn reference(
        name: StringView<'buf>,
        source_file: StringView<'buf>,
        line: u64,
        id: u64,
    ) -> Self {
        Segment {
            kind: SegmentKind::Reference,
            body: name,
            source_file,
            line,
            id,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == SegmentKind::Text
    }

    pub fn is_reference(&self) -> bool {
        self.kind == SegmentKind::Reference
    }
}
