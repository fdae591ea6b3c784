//! Structured warnings (component L), produced by the expansion writer and
//! the usage checker before they are ever rendered or logged.
//!
//! Mirrors the shape of the teacher crate's `diag` module as referenced from
//! `Database::diag_notations` (`DiagnosticClass`, `Notation`,
//! `diag::to_annotations`): a small enum of diagnostic kinds, a value type
//! carrying the data needed to render one, and a rendering step kept separate
//! from the policy that decides whether a diagnostic is fatal (see
//! `Config::warnings` and `WarningsPolicy`).

use annotate_snippets::display_list::DisplayList;
use annotate_snippets::snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation};

/// What kind of condition a [`Diagnostic`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A `<<name>>` reference named a block with no definition.
    UnresolvedReference,
    /// A parsed block was never reached during expansion.
    UnusedBlock,
}

/// One warning, fully described but not yet rendered.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub block_name: String,
    pub file: String,
    pub line: u64,
    /// The source line's text, if available, for the `annotate-snippets`
    /// rendering; `None` falls back to a plain message in `render`.
    pub source_line: Option<String>,
}

impl Diagnostic {
    pub fn unresolved_reference(block_name: &str, file: &str, line: u64) -> Self {
        Diagnostic {
            kind: DiagnosticKind::UnresolvedReference,
            block_name: block_name.to_string(),
            file: file.to_string(),
            line,
            source_line: None,
        }
    }

    pub fn unused_block(block_name: &str, file: &str, line: u64) -> Self {
        Diagnostic {
            kind: DiagnosticKind::UnusedBlock,
            block_name: block_name.to_string(),
            file: file.to_string(),
            line,
            source_line: None,
        }
    }

    pub fn with_source_line(mut self, line: &str) -> Self {
        self.source_line = Some(line.trim_end_matches('\n').to_string());
        self
    }

    /// A single-line, plain-text rendering, matching §6's warning sink
    /// contract ("one per line ... must identify the block name and, where
    /// applicable, the source file and line").
    pub fn plain_message(&self) -> String {
        match self.kind {
            DiagnosticKind::UnresolvedReference => format!(
                "could not find reference segment '{}' ({}:{})",
                self.block_name, self.file, self.line
            ),
            DiagnosticKind::UnusedBlock => format!(
                "block '{}' unused, first declared in {}:{}",
                self.block_name, self.file, self.line
            ),
        }
    }

    /// Records this diagnostic through the `log` facade at `warn` level. This
    /// is the crate's warning sink: what appender renders it, and where, is
    /// deliberately not specified (§1).
    pub fn log(&self) {
        log::warn!("{}", self.plain_message());
    }

    /// A richer, source-quoting rendering via `annotate-snippets`, for
    /// front ends (like the CLI) that want to print a detailed report rather
    /// than the plain one-liner from [`Diagnostic::plain_message`].
    pub fn render(&self) -> String {
        let label = self.plain_message();
        let Some(source_line) = self.source_line.as_deref() else {
            return label;
        };

        let annotation_range = (0, source_line.len());
        let snippet = Snippet {
            title: Some(Annotation {
                id: None,
                label: Some(&label),
                annotation_type: AnnotationType::Warning,
            }),
            footer: vec![],
            slices: vec![Slice {
                source: source_line,
                line_start: self.line as usize,
                origin: Some(&self.file),
                fold: false,
                annotations: vec![SourceAnnotation {
                    range: annotation_range,
                    label: "",
                    annotation_type: AnnotationType::Warning,
                }],
            }],
        };

        DisplayList::from(snippet).to_string()
    }
}
