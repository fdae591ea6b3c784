//! A named, ordered sequence of segments (component D).

use crate::segment::Segment;
use crate::view::StringView;

/// A block, as assembled from one or more `#+NAME:` definitions.
///
/// A block's identity is its name: the [`NameRegistry`](crate::registry::NameRegistry)
/// guarantees that every parse-time reference to the same name resolves to the
/// same `Block` instance, so `Block` is mutated in place (through a `RefCell`,
/// see the registry) rather than rebuilt.
#[derive(Debug)]
pub struct Block<'buf> {
    id: u64,
    name: StringView<'buf>,
    segments: Vec<Segment<'buf>>,
    definition_count: u32,
    used: bool,
}

impl<'buf> Block<'buf> {
    /// Creates an empty, freshly-registered block. `name` is the view captured
    /// at whichever site (a `#+NAME:` definition or a forward `<<name>>`
    /// reference) first caused the block to be registered.
    pub fn new(id: u64, name: StringView<'buf>) -> Self {
        Block {
            id,
            name,
            segments: Vec::new(),
            definition_count: 0,
            used: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> StringView<'buf> {
        self.name
    }

    pub fn segments(&self) -> &[Segment<'buf>] {
        &self.segments
    }

    pub fn definition_count(&self) -> u32 {
        self.definition_count
    }

    pub fn used(&self) -> bool {
        self.used
    }

    /// The file and line of this block's first segment, i.e. its first
    /// definition site — used by the usage checker's diagnostics.
    pub fn first_definition_site(&self) -> Option<(StringView<'buf>, u64)> {
        self.segments.first().map(|s| (s.source_file, s.line))
    }

    /// Appends a segment, as the parser builds up a definition.
    pub fn push_segment(&mut self, segment: Segment<'buf>) {
        self.segments.push(segment);
    }

    /// Records that another `#+NAME:` occurrence named this block.
    pub fn begin_definition(&mut self) {
        self.definition_count += 1;
    }

    /// Marks the block as reached by the expansion writer.
    pub fn mark_used(&mut self) {
        self.used = true;
    }
}
