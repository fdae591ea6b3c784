//! The global name-indexed block registry (component E).
//!
//! Blocks are allocated out of a [`BlockArena`] that outlives the registry
//! (and outlives the whole parse/tangle run), so `get_or_create` can hand back
//! a `&RefCell<Block>` whose address never changes — the stable identity that
//! lets forward references and repeated `#+NAME:` definitions all land on the
//! same `Block` instance, mirroring the C original's never-`realloc`'d
//! `worgle_block *`.

use std::cell::{Cell, RefCell};

use fnv::FnvBuildHasher;
use std::collections::HashMap;
use typed_arena::Arena;

use crate::block::Block;
use crate::view::StringView;

/// Arena owning every [`Block`] allocated during a run.
pub type BlockArena<'buf> = Arena<RefCell<Block<'buf>>>;

/// A stable handle to a registered block, valid for the life of the arena.
pub type BlockHandle<'arena, 'buf> = &'arena RefCell<Block<'buf>>;

/// Maps block names to [`BlockHandle`]s.
///
/// Hashing uses `fnv`, matching the teacher crate's choice for its own label
/// tables: block names are short identifiers, exactly the case `fnv` is built
/// for. Keys are `StringView`s, not owned `String`s, so no allocation happens
/// on lookup.
pub struct NameRegistry<'arena, 'buf> {
    arena: &'arena BlockArena<'buf>,
    index: HashMap<StringView<'buf>, BlockHandle<'arena, 'buf>, FnvBuildHasher>,
    next_block_id: Cell<u64>,
}

impl<'arena, 'buf> NameRegistry<'arena, 'buf> {
    pub fn new(arena: &'arena BlockArena<'buf>) -> Self {
        NameRegistry {
            arena,
            index: HashMap::default(),
            next_block_id: Cell::new(1),
        }
    }

    /// Returns the block named `name`, creating an empty placeholder block if
    /// this is the first time `name` has been seen (whether via a definition
    /// or a forward reference). Idempotent in effect on block identity: later
    /// calls with the same name always return the same handle.
    pub fn get_or_create(&mut self, name: StringView<'buf>) -> BlockHandle<'arena, 'buf> {
        if let Some(handle) = self.index.get(&name) {
            return handle;
        }
        let id = self.next_block_id.get();
        self.next_block_id.set(id + 1);
        let handle = self.arena.alloc(RefCell::new(Block::new(id, name)));
        self.index.insert(name, handle);
        handle
    }

    /// Looks up a block by name without creating one. Used by the expansion
    /// writer, which must distinguish "no such block" from "empty block".
    pub fn find(&self, name: StringView<'buf>) -> Option<BlockHandle<'arena, 'buf>> {
        self.index.get(&name).copied()
    }

    /// Iterates every registered block, in unspecified order (per §3, the
    /// registry's iteration order is never observable — callers that need a
    /// stable order drive traversal through the file list instead).
    pub fn iter(&self) -> impl Iterator<Item = BlockHandle<'arena, 'buf>> + '_ {
        self.index.values().copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_is_idempotent() {
        let arena = BlockArena::new();
        let mut registry = NameRegistry::new(&arena);

        let a = registry.get_or_create(StringView::new("foo"));
        let b = registry.get_or_create(StringView::new("foo"));
        assert!(std::ptr::eq(a, b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_names_get_distinct_blocks() {
        let arena = BlockArena::new();
        let mut registry = NameRegistry::new(&arena);

        let a = registry.get_or_create(StringView::new("foo"));
        let b = registry.get_or_create(StringView::new("bar"));
        assert!(!std::ptr::eq(a, b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn find_does_not_create() {
        let arena = BlockArena::new();
        let mut registry = NameRegistry::new(&arena);
        registry.get_or_create(StringView::new("foo"));

        assert!(registry.find(StringView::new("bar")).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn handles_remain_valid_after_further_inserts() {
        let arena = BlockArena::new();
        let mut registry = NameRegistry::new(&arena);

        let foo = registry.get_or_create(StringView::new("foo"));
        foo.borrow_mut().begin_definition();
        for n in 0..64 {
            registry.get_or_create(StringView::new(Box::leak(
                n.to_string().into_boxed_str(),
            )));
        }
        assert_eq!(foo.borrow().definition_count(), 1);
    }
}
