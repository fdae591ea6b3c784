//! The crate's public entry type, orchestrating load → parse → tangle →
//! check → map (component N).
//!
//! In the style of the teacher crate's `Database` facade, but straight-line
//! and single-threaded rather than lazily recomputed: there is no
//! incremental operation to support here (see §5), so each pass runs exactly
//! once, in order, over a fixed set of already-loaded input buffers.

use std::fs;
use std::time::Instant;

use crate::buffer::InputBuffer;
use crate::codemap;
use crate::config::Config;
use crate::diag::Diagnostic;
use crate::error::Result as TangleResult;
use crate::filelist::FileList;
use crate::parser::Parser;
use crate::registry::{BlockArena, NameRegistry};
use crate::tangle;
use crate::usage;

/// Logs how long `f` takes under the name `name`, if `config.timing` is set.
/// Mirrors the teacher crate's own `time()` helper around each of its passes.
fn time<R>(config: &Config, name: &str, f: impl FnOnce() -> R) -> R {
    let start = Instant::now();
    let result = f();
    if config.timing {
        log::debug!("{name}: {:?}", start.elapsed());
    }
    result
}

/// The crate's single public entry type. Owns the name registry and file
/// list for one run; borrows the block arena from its caller, which must
/// outlive it (see §3/§5 on the master ownership invariant).
pub struct Tangler<'arena, 'buf> {
    registry: NameRegistry<'arena, 'buf>,
    files: FileList<'arena, 'buf>,
    config: Config,
    diagnostics: Vec<Diagnostic>,
}

impl<'arena, 'buf> Tangler<'arena, 'buf> {
    /// Creates an empty `Tangler`. `block_arena` must outlive the returned
    /// value and every `InputBuffer` later passed to [`Tangler::parse`].
    pub fn new(block_arena: &'arena BlockArena<'buf>, config: Config) -> Self {
        Tangler {
            registry: NameRegistry::new(block_arena),
            files: FileList::new(),
            config,
            diagnostics: Vec::new(),
        }
    }

    /// Parses every buffer in `buffers`, in order, populating the registry
    /// and file list.
    pub fn parse<I>(&mut self, buffers: I) -> TangleResult<()>
    where
        I: IntoIterator<Item = &'buf InputBuffer>,
    {
        time(&self.config, "parse", || {
            let mut parser = Parser::new(&mut self.registry, &mut self.files);
            parser.parse_all(buffers)
        })
    }

    /// Expands every file binding to disk, per `config.tangle_code`. A no-op
    /// if tangling was disabled (the CLI's `-n`/`--no-tangle`). Diagnostics
    /// are recorded in `self.diagnostics` even on the `Err` path, so a caller
    /// that propagates the error can still inspect what was found.
    pub fn tangle(&mut self) -> TangleResult<()> {
        if !self.config.tangle_code {
            return Ok(());
        }
        let files = &self.files;
        let registry = &self.registry;
        let config = &self.config;
        let diagnostics = &mut self.diagnostics;
        time(config, "tangle", || {
            tangle::tangle(files, registry, config, diagnostics)
        })
    }

    /// Runs the usage checker over every registered block. Diagnostics are
    /// recorded in `self.diagnostics` even on the `Err` path, so a caller
    /// that propagates the error can still inspect what was found.
    pub fn check_usage(&mut self) -> TangleResult<()> {
        let registry = &self.registry;
        let config = &self.config;
        let diagnostics = &mut self.diagnostics;
        time(config, "check_usage", || {
            usage::check_usage(registry, config, diagnostics)
        })
    }

    /// Writes a code map to `config.map_filename`, if set. A no-op otherwise.
    pub fn write_code_map(&self) -> TangleResult<()> {
        let Some(path) = &self.config.map_filename else {
            return Ok(());
        };
        time(&self.config, "write_code_map", || {
            let mut out = fs::File::create(path)?;
            codemap::write_code_map(&self.files, &self.registry, &mut out)
        })
    }

    /// Runs the full pipeline: parse, tangle, check usage, write the code
    /// map. Equivalent to calling each stage in order.
    pub fn run<I>(&mut self, buffers: I) -> TangleResult<()>
    where
        I: IntoIterator<Item = &'buf InputBuffer>,
    {
        self.parse(buffers)?;
        self.tangle()?;
        self.check_usage()?;
        self.write_code_map()?;
        Ok(())
    }

    /// Every diagnostic collected so far, across all passes run.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether any collected diagnostic should fail the run, given
    /// `config.warnings`. The tangle/usage passes already return `Err` for
    /// the `warnings = error` case as soon as they detect it, but they record
    /// the triggering diagnostic into `self.diagnostics` before doing so —
    /// this is for callers that call the stages individually, catch (rather
    /// than propagate) that `Err`, and want a single boolean to check after
    /// the fact instead of matching on the error variant.
    pub fn has_fatal_diagnostics(&self) -> bool {
        self.config.warnings.is_fatal() && !self.diagnostics.is_empty()
    }
}
