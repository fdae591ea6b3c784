//! Post-pass reporting blocks that were never reached during expansion
//! (component I).

use itertools::Itertools;

use crate::config::Config;
use crate::diag::Diagnostic;
use crate::error::{Result as TangleResult, TangleError};
use crate::registry::NameRegistry;

/// Iterates every block in `registry`; each with `used() == false` produces a
/// [`Diagnostic`], appended to `diagnostics` as it is found. This pass always
/// runs, independent of `config.warnings` — it is cheap and purely diagnostic
/// — but only fails the caller's run when `config.warnings` is
/// [`crate::config::WarningsPolicy::Error`], in which case the triggering
/// diagnostic is still in `diagnostics` by the time `Err` is returned. See
/// DESIGN.md's "Usage checker gating" decision.
///
/// The registry's own iteration order is unspecified (§3), so blocks are
/// visited here in name order — `itertools::sorted_by_key` over the
/// otherwise-arbitrary hash map iterator — to keep diagnostic output
/// deterministic across runs of the same input.
pub fn check_usage<'arena, 'buf>(
    registry: &NameRegistry<'arena, 'buf>,
    config: &Config,
    diagnostics: &mut Vec<Diagnostic>,
) -> TangleResult<()> {
    let mut first_unused = None;

    for handle in registry.iter().sorted_by_key(|h| h.borrow().name()) {
        let block = handle.borrow();
        if block.used() {
            continue;
        }
        let (file, line) = block
            .first_definition_site()
            .unwrap_or_else(|| (crate::view::StringView::empty(), 0));
        let diag = Diagnostic::unused_block(block.name().as_str(), file.as_str(), line);
        diag.log();
        if first_unused.is_none() {
            first_unused = Some((block.name().as_str().to_string(), file.as_str().to_string(), line));
        }
        diagnostics.push(diag);
    }

    if config.warnings.is_fatal() {
        if let Some((name, file, line)) = first_unused {
            return Err(TangleError::UnusedBlock { name, file, line });
        }
    }
    Ok(())
}
