// ─────────────────────────────────────────────────────────────────────
// MLQ Coil Core — Result Report
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Plain-text result report. Port of the `main.py` result panel:
//! best-design block, candidate count, five-row table preview.

use coil_types::design::{OptimizationResult, QSample};

/// Rows shown in the candidate preview. Python: DataFrame.head().
const PREVIEW_ROWS: usize = 5;

/// Render a sweep outcome as a stable plain-text block.
///
/// The preview lists the first [`PREVIEW_ROWS`] candidates in grid
/// order; a hand-built result with an empty band falls back to
/// previewing the raw curve instead.
pub fn format_result(result: &OptimizationResult) -> String {
    let mut out = String::new();
    out.push_str("Best Design:\n");
    out.push_str(&format!("Tw = {:.4} mm\n", result.best_trace_width_mm));
    out.push_str(&format!("Max Q = {:.4}\n", result.best_q));
    out.push_str(&format!(
        "\nTop-{:.0}% Region Candidates: {}\n",
        result.top_k_percent,
        result.candidates.len()
    ));

    let preview: &[QSample] = if result.candidates.is_empty() {
        &result.samples
    } else {
        &result.candidates
    };
    out.push_str(&preview_table(preview));
    out
}

fn preview_table(samples: &[QSample]) -> String {
    let mut table = format!("{:>8} {:>9}\n", "Tw [mm]", "Q");
    for sample in samples.iter().take(PREVIEW_ROWS) {
        table.push_str(&format!(
            "{:>8.4} {:>9.4}\n",
            sample.trace_width_mm, sample.q
        ));
    }
    table
}
