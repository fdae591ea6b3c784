//! Run-wide flags (component K), threaded explicitly instead of kept as the
//! original tool's module-level statics.

use std::path::PathBuf;

/// How the expansion writer and usage checker should treat warnings.
///
/// Mirrors the original tool's `use_warnings` (0/1/2), but as a named enum
/// rather than a magic integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarningsPolicy {
    /// Diagnostics are recorded but never fail the run.
    #[default]
    None,
    /// Diagnostics are recorded, emission continues, the run still succeeds.
    ///
    /// Distinguished from `None` only at the CLI/reporting layer: the core
    /// engine treats `None` and `Soft` identically (both log and continue),
    /// per §4.H's literal wording. See DESIGN.md's "Usage checker gating"
    /// decision for the one place this crate's behavior deliberately departs
    /// from the original tool's, which skipped the check entirely under
    /// `None`.
    Soft,
    /// Any unresolved reference or unused block fails the run.
    Error,
}

impl WarningsPolicy {
    pub fn is_fatal(self) -> bool {
        self == WarningsPolicy::Error
    }
}

/// Run-wide configuration, threaded by shared reference through the parser,
/// expansion writer, usage checker, and code-map writer.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// If true, precede each Text segment's output with a `#line` directive.
    /// Was `use_debug`.
    pub debug_line_markers: bool,
    /// Warning policy for unresolved references and unused blocks. Was
    /// `use_warnings`.
    pub warnings: WarningsPolicy,
    /// If true, run the expansion writer at all. Was `tangle_code` (default
    /// true upstream; the CLI's `-n`/`--no-tangle` clears it).
    pub tangle_code: bool,
    /// If set, write a code map to this path after tangling. Was
    /// `map_source_code`/`map_filename` collapsed into one `Option`.
    pub map_filename: Option<PathBuf>,
    /// If true, log how long each pass of the [`crate::engine::Tangler`]
    /// pipeline took, in the tradition of the teacher crate's
    /// `DbOptions::timing`.
    pub timing: bool,
}

impl Config {
    pub fn new() -> Self {
        Config {
            tangle_code: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_not_fatal() {
        assert!(!WarningsPolicy::default().is_fatal());
    }

    #[test]
    fn only_error_is_fatal() {
        assert!(!WarningsPolicy::None.is_fatal());
        assert!(!WarningsPolicy::Soft.is_fatal());
        assert!(WarningsPolicy::Error.is_fatal());
    }

    #[test]
    fn new_config_tangles_by_default() {
        let config = Config::new();
        assert!(config.tangle_code);
        assert!(!config.debug_line_markers);
        assert_eq!(config.warnings, WarningsPolicy::None);
        assert_eq!(config.map_filename, None);
    }
}
