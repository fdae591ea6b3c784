//! End-to-end exercises of the six concrete scenarios from the design's
//! testable-properties section, driven entirely through the public API.

use std::fs;
use std::path::PathBuf;

use worg::buffer::DocumentArena;
use worg::config::{Config, WarningsPolicy};
use worg::engine::Tangler;
use worg::registry::BlockArena;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("worg-scenarios-{tag}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// S1 — identity: a single block tangles to exactly its own text.
#[test]
fn s1_identity() {
    let dir = scratch_dir("s1");
    let out = dir.join("out.txt");
    let doc_arena = DocumentArena::new();
    let block_arena = BlockArena::new();
    let buf = doc_arena.load_text(
        "doc.org".to_string(),
        format!(
            "#+NAME: main\n#+BEGIN_SRC :tangle {}\nhello\n#+END_SRC\n",
            out.display()
        ),
    );

    let mut tangler = Tangler::new(&block_arena, Config::new());
    tangler.run(std::iter::once(buf)).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "hello\n");
    fs::remove_dir_all(&dir).ok();
}

/// S2 — single reference: a reference in the middle of a block expands
/// inline with no extra separator bytes.
#[test]
fn s2_single_reference() {
    let dir = scratch_dir("s2");
    let out = dir.join("out.txt");
    let doc_arena = DocumentArena::new();
    let block_arena = BlockArena::new();
    let buf = doc_arena.load_text(
        "doc.org".to_string(),
        format!(
            "#+NAME: greet\n#+BEGIN_SRC\nworld\n#+END_SRC\n#+NAME: main\n#+BEGIN_SRC :tangle {}\nhello \n<<greet>>\n!\n#+END_SRC\n",
            out.display()
        ),
    );

    let mut tangler = Tangler::new(&block_arena, Config::new());
    tangler.run(std::iter::once(buf)).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "hello world\n!\n");
    fs::remove_dir_all(&dir).ok();
}

/// S3 — forward reference: `main` appears before `greet` is defined and
/// output is unchanged.
#[test]
fn s3_forward_reference_matches_s2() {
    let dir = scratch_dir("s3");
    let out = dir.join("out.txt");
    let doc_arena = DocumentArena::new();
    let block_arena = BlockArena::new();
    let buf = doc_arena.load_text(
        "doc.org".to_string(),
        format!(
            "#+NAME: main\n#+BEGIN_SRC :tangle {}\nhello \n<<greet>>\n!\n#+END_SRC\n#+NAME: greet\n#+BEGIN_SRC\nworld\n#+END_SRC\n",
            out.display()
        ),
    );

    let mut tangler = Tangler::new(&block_arena, Config::new());
    tangler.run(std::iter::once(buf)).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "hello world\n!\n");
    fs::remove_dir_all(&dir).ok();
}

/// S4 — multi-definition: two `#+NAME: body` blocks concatenate in document
/// order at the reference site.
#[test]
fn s4_multi_definition_concatenates() {
    let dir = scratch_dir("s4");
    let out = dir.join("out.txt");
    let doc_arena = DocumentArena::new();
    let block_arena = BlockArena::new();
    let buf = doc_arena.load_text(
        "doc.org".to_string(),
        format!(
            "#+NAME: body\n#+BEGIN_SRC\na\n#+END_SRC\n#+NAME: body\n#+BEGIN_SRC\nb\n#+END_SRC\n#+NAME: main\n#+BEGIN_SRC :tangle {}\n<<body>>\n#+END_SRC\n",
            out.display()
        ),
    );

    let mut tangler = Tangler::new(&block_arena, Config::new());
    tangler.run(std::iter::once(buf)).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "a\nb\n");
    fs::remove_dir_all(&dir).ok();
}

/// S5 — unresolved reference under `warnings = soft`: the run still
/// succeeds, the reference contributes no bytes, and a diagnostic is
/// recorded.
#[test]
fn s5_unresolved_reference_soft() {
    let dir = scratch_dir("s5");
    let out = dir.join("out.txt");
    let doc_arena = DocumentArena::new();
    let block_arena = BlockArena::new();
    let buf = doc_arena.load_text(
        "doc.org".to_string(),
        format!(
            "#+NAME: main\n#+BEGIN_SRC :tangle {}\nhello \n<<missing>>\n#+END_SRC\n",
            out.display()
        ),
    );

    let mut config = Config::new();
    config.warnings = WarningsPolicy::Soft;
    let mut tangler = Tangler::new(&block_arena, config);
    tangler.run(std::iter::once(buf)).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "hello \n");
    assert_eq!(tangler.diagnostics().len(), 1);
    assert!(!tangler.has_fatal_diagnostics());
    fs::remove_dir_all(&dir).ok();
}

/// S6 — unused block: `stray` is never referenced; under `warnings = error`
/// the run's diagnostics are flagged fatal.
#[test]
fn s6_unused_block_is_fatal_under_error_policy() {
    let dir = scratch_dir("s6");
    let out = dir.join("out.txt");
    let doc_arena = DocumentArena::new();
    let block_arena = BlockArena::new();
    let buf = doc_arena.load_text(
        "doc.org".to_string(),
        format!(
            "#+NAME: main\n#+BEGIN_SRC :tangle {}\nhello\n#+END_SRC\n#+NAME: stray\n#+BEGIN_SRC\nunused\n#+END_SRC\n",
            out.display()
        ),
    );

    let mut config = Config::new();
    config.warnings = WarningsPolicy::Error;
    let mut tangler = Tangler::new(&block_arena, config);

    tangler.parse(std::iter::once(buf)).unwrap();
    tangler.tangle().unwrap();
    let result = tangler.check_usage();

    assert!(result.is_err());
    assert!(tangler.has_fatal_diagnostics());
    fs::remove_dir_all(&dir).ok();
}
