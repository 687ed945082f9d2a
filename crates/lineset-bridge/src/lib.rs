//! LineSet Bridge - side-by-side alignment through an external diff program
//!
//! The line-set comparison in `lineset-core` ignores line order. For a
//! positional view, this crate hands both source texts to an external diff
//! utility. How the texts reach the program is an [`AlignedDiffStrategy`];
//! [`FifoDiff`] streams them through two named pipes in a scoped temporary
//! directory so neither text is ever written to a file.
//!
//! The bridge only reads sources.

use std::time::Instant;

use lineset_core::errors::Result;
use lineset_core::lineset_core_types::RequestId;
use lineset_core::ops::Workspace;
use lineset_core::{log_op_end, log_op_error, log_op_start, SourceId};

mod config;
mod fifo;
mod strategy;

pub use config::BridgeConfig;
pub use fifo::FifoDiff;
pub use strategy::{AlignedDiff, AlignedDiffStrategy, SourceText};

/// Run an aligned diff of two live sources
///
/// # Errors
///
/// * `SourceNotFound` / `SourceClosed` - If either handle does not resolve
/// * `BridgeProcessFailure` / `BridgeTimeout` - As reported by the strategy
pub fn compare_aligned(
    ws: &Workspace,
    a: &SourceId,
    b: &SourceId,
    strategy: &dyn AlignedDiffStrategy,
) -> Result<AlignedDiff> {
    let request_id = RequestId::new();
    log_op_start!(
        "compare_aligned",
        source_a = %a,
        source_b = %b,
        strategy = strategy.name(),
        request_id = %request_id
    );
    let start = Instant::now();

    let result = compare_aligned_impl(ws, a, b, strategy).map_err(|e| {
        log_op_error!(
            "compare_aligned",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = %request_id
        );
        e
    })?;

    log_op_end!(
        "compare_aligned",
        duration_ms = start.elapsed().as_millis() as u64,
        output_len = result.output.len(),
        request_id = %request_id
    );

    Ok(result)
}

fn compare_aligned_impl(
    ws: &Workspace,
    a: &SourceId,
    b: &SourceId,
    strategy: &dyn AlignedDiffStrategy,
) -> Result<AlignedDiff> {
    let source_a = ws.get_source(a)?;
    let source_b = ws.get_source(b)?;

    let text_a = SourceText::new(source_a.name.clone(), source_a.text());
    let text_b = SourceText::new(source_b.name.clone(), source_b.text());

    strategy.aligned(&text_a, &text_b)
}
