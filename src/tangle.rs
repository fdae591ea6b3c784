//! Depth-first expansion of a root block into its output file (component H).

use std::fs;
use std::io::Write;

use crate::config::Config;
use crate::diag::Diagnostic;
use crate::error::{Result as TangleResult, TangleError};
use crate::filelist::FileList;
use crate::registry::{BlockHandle, NameRegistry};
use crate::segment::SegmentKind;

/// Emits every [`crate::filelist::FileBinding`] in `files`, recursively
/// expanding each root block's references through `registry`. Diagnostics
/// from unresolved references are appended to `diagnostics` as they are
/// found, including the one that triggers a fatal `Err` under
/// `warnings = error` — so a caller that propagates the error can still
/// inspect what was collected up to that point.
///
/// Recursion is unguarded: a corpus with a reference cycle (`a` refers to `b`
/// refers back to `a`) will overflow the call stack, matching the original
/// tool's behavior. Cycle detection was explicitly out of scope (see
/// DESIGN.md's Open Question decisions).
pub fn tangle<'arena, 'buf>(
    files: &FileList<'arena, 'buf>,
    registry: &NameRegistry<'arena, 'buf>,
    config: &Config,
    diagnostics: &mut Vec<Diagnostic>,
) -> TangleResult<()> {
    for binding in files.iter() {
        let mut out = fs::File::create(binding.output_path.as_str())?;
        expand_block(binding.root_block, registry, config, &mut out, diagnostics)?;
    }
    Ok(())
}

/// Writes one block's fully expanded bytes to `out`, recursing through any
/// Reference segments. Exposed at `pub(crate)` visibility so the engine and
/// tests can drive expansion into an in-memory buffer without touching the
/// filesystem.
pub(crate) fn expand_block<'arena, 'buf, W: Write>(
    handle: BlockHandle<'arena, 'buf>,
    registry: &NameRegistry<'arena, 'buf>,
    config: &Config,
    out: &mut W,
    diagnostics: &mut Vec<Diagnostic>,
) -> TangleResult<()> {
    handle.borrow_mut().mark_used();
    // Segments are Copy; cloning the slice here lets the recursive call below
    // re-borrow `handle` (a reference may be a forward reference to itself
    // indirectly, and a later definition could still be appending to it).
    let segments = handle.borrow().segments().to_vec();

    for segment in segments {
        match segment.kind {
            SegmentKind::Text => {
                if config.debug_line_markers {
                    writeln!(out, "#line {} \"{}\"", segment.line, segment.source_file.as_str())?;
                }
                out.write_all(segment.body.as_bytes())?;
            }
            SegmentKind::Reference => match registry.find(segment.body) {
                Some(referenced) => expand_block(referenced, registry, config, out, diagnostics)?,
                None => {
                    let diag = Diagnostic::unresolved_reference(
                        segment.body.as_str(),
                        segment.source_file.as_str(),
                        segment.line,
                    );
                    diag.log();
                    let fatal = config.warnings.is_fatal();
                    let name = segment.body.as_str().to_string();
                    let file = segment.source_file.as_str().to_string();
                    let line = segment.line;
                    diagnostics.push(diag);
                    if fatal {
                        return Err(TangleError::UnresolvedReference { name, file, line });
                    }
                }
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::DocumentArena;
    use crate::config::WarningsPolicy;
    use crate::filelist::FileList;
    use crate::parser::Parser;
    use crate::registry::BlockArena;
    use crate::view::StringView;

    fn expand(text: &str, config: &Config) -> (String, usize) {
        let doc_arena = DocumentArena::new();
        let block_arena = BlockArena::new();
        let buf = doc_arena.load_text("in.org".to_string(), text.to_string());
        let mut registry = NameRegistry::new(&block_arena);
        let mut files = FileList::new();
        {
            let mut parser = Parser::new(&mut registry, &mut files);
            parser.parse_document(buf).expect("parse should succeed");
        }
        let main = registry.find(StringView::new("main")).expect("main block");
        let mut out = Vec::new();
        let mut diagnostics = Vec::new();
        expand_block(main, &registry, config, &mut out, &mut diagnostics).expect("expand should succeed");
        (String::from_utf8(out).unwrap(), diagnostics.len())
    }

    #[test]
    fn plain_block_emits_its_text_verbatim() {
        let (out, warnings) = expand(
            "#+NAME: main\n#+BEGIN_SRC :tangle out.txt\nhello\n#+END_SRC\n",
            &Config::new(),
        );
        assert_eq!(out, "hello\n");
        assert_eq!(warnings, 0);
    }

    #[test]
    fn reference_expands_inline() {
        let (out, warnings) = expand(
            "#+NAME: greet\n#+BEGIN_SRC\nworld\n#+END_SRC\n#+NAME: main\n#+BEGIN_SRC :tangle out.txt\nhello \n<<greet>>\n!\n#+END_SRC\n",
            &Config::new(),
        );
        assert_eq!(out, "hello world\n!\n");
        assert_eq!(warnings, 0);
    }

    #[test]
    fn forward_reference_matches_backward_reference() {
        let (forward, _) = expand(
            "#+NAME: main\n#+BEGIN_SRC :tangle out.txt\nhello \n<<greet>>\n!\n#+END_SRC\n#+NAME: greet\n#+BEGIN_SRC\nworld\n#+END_SRC\n",
            &Config::new(),
        );
        let (backward, _) = expand(
            "#+NAME: greet\n#+BEGIN_SRC\nworld\n#+END_SRC\n#+NAME: main\n#+BEGIN_SRC :tangle out.txt\nhello \n<<greet>>\n!\n#+END_SRC\n",
            &Config::new(),
        );
        assert_eq!(forward, backward);
    }

    #[test]
    fn multi_definition_concatenates_in_order() {
        let (out, _) = expand(
            "#+NAME: body\n#+BEGIN_SRC\na\n#+END_SRC\n#+NAME: body\n#+BEGIN_SRC\nb\n#+END_SRC\n#+NAME: main\n#+BEGIN_SRC :tangle out.txt\n<<body>>\n#+END_SRC\n",
            &Config::new(),
        );
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn unresolved_reference_is_soft_by_default() {
        let (out, warnings) = expand(
            "#+NAME: main\n#+BEGIN_SRC :tangle out.txt\nhello \n<<missing>>\n#+END_SRC\n",
            &Config::new(),
        );
        assert_eq!(out, "hello \n");
        assert_eq!(warnings, 1);
    }

    #[test]
    fn unresolved_reference_aborts_under_error_policy() {
        let mut config = Config::new();
        config.warnings = WarningsPolicy::Error;
        let doc_arena = DocumentArena::new();
        let block_arena = BlockArena::new();
        let buf = doc_arena.load_text(
            "in.org".to_string(),
            "#+NAME: main\n#+BEGIN_SRC :tangle out.txt\n<<missing>>\n#+END_SRC\n".to_string(),
        );
        let mut registry = NameRegistry::new(&block_arena);
        let mut files = FileList::new();
        {
            let mut parser = Parser::new(&mut registry, &mut files);
            parser.parse_document(buf).unwrap();
        }
        let main = registry.find(StringView::new("main")).unwrap();
        let mut out = Vec::new();
        let mut diagnostics = Vec::new();
        let result = expand_block(main, &registry, &config, &mut out, &mut diagnostics);
        assert_matches::assert_matches!(result, Err(TangleError::UnresolvedReference { .. }));
    }

    #[test]
    fn debug_line_markers_precede_text_segments() {
        let mut config = Config::new();
        config.debug_line_markers = true;
        let (out, _) = expand(
            "#+NAME: main\n#+BEGIN_SRC :tangle out.txt\nhello\n#+END_SRC\n",
            &config,
        );
        assert!(out.starts_with("#line 3 \"in.org\"\n"));
        assert!(out.ends_with("hello\n"));
    }
}
