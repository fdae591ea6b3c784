//! Optional human-readable re-rendering of the expansion tree (component J).
//!
//! Shares its segment-walking shape with [`crate::tangle`] but differs in
//! what it emits and in never touching a block's `used` flag: this is a
//! read-only traversal, driven purely for review, not for output generation.

use std::io::Write;

use crate::error::Result as TangleResult;
use crate::filelist::FileList;
use crate::registry::{BlockHandle, NameRegistry};
use crate::segment::SegmentKind;

/// Writes a code map for every [`crate::filelist::FileBinding`] in `files` to
/// `out`: one top-level heading per output path, followed by a recursive
/// rendering of its root block.
pub fn write_code_map<'arena, 'buf, W: Write>(
    files: &FileList<'arena, 'buf>,
    registry: &NameRegistry<'arena, 'buf>,
    out: &mut W,
) -> TangleResult<()> {
    for binding in files.iter() {
        writeln!(out, "* {}", binding.output_path.as_str())?;
        render_block(binding.root_block, registry, out, 1)?;
    }
    Ok(())
}

fn render_block<'arena, 'buf, W: Write>(
    handle: BlockHandle<'arena, 'buf>,
    registry: &NameRegistry<'arena, 'buf>,
    out: &mut W,
    depth: usize,
) -> TangleResult<()> {
    let block = handle.borrow();
    for (index, segment) in block.segments().iter().enumerate() {
        match segment.kind {
            SegmentKind::Text => {
                writeln!(out, "#+NAME: {}_{}", block.name().as_str(), index)?;
                writeln!(out, "#+BEGIN_SRC")?;
                out.write_all(segment.body.as_bytes())?;
                if !segment.body.as_str().ends_with('\n') {
                    writeln!(out)?;
                }
                writeln!(out, "#+END_SRC")?;
            }
            SegmentKind::Reference => {
                writeln!(out, "{} {}", "*".repeat(depth + 1), segment.body.as_str())?;
                match registry.find(segment.body) {
                    Some(referenced) => render_block(referenced, registry, out, depth + 1)?,
                    None => writeln!(out, "(unresolved reference)")?,
                }
            }
        }
    }
    Ok(())
}
