//! The ordered list of output files, each bound to a root block (component F).

use crate::registry::BlockHandle;
use crate::view::StringView;

/// One `:tangle <path>` directive: an output path paired with the block that
/// is its expansion root.
pub struct FileBinding<'arena, 'buf> {
    pub output_path: StringView<'buf>,
    pub root_block: BlockHandle<'arena, 'buf>,
}

/// The ordered sequence of [`FileBinding`]s collected during parsing.
///
/// Emission order (see [`crate::tangle`]) matches insertion order, which in
/// turn matches the order `:tangle` directives were encountered across all
/// parsed documents.
#[derive(Default)]
pub struct FileList<'arena, 'buf> {
    bindings: Vec<FileBinding<'arena, 'buf>>,
}

impl<'arena, 'buf> FileList<'arena, 'buf> {
    pub fn new() -> Self {
        FileList {
            bindings: Vec::new(),
        }
    }

    pub fn push(&mut self, output_path: StringView<'buf>, root_block: BlockHandle<'arena, 'buf>) {
        self.bindings.push(FileBinding {
            output_path,
            root_block,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileBinding<'arena, 'buf>> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
