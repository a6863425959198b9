//! Terminal rendering of the engine view: prediction box, countdown and the
//! draw list with each draw's size pattern. Presentation only.

use std::fmt::Write;

use crate::state::{EngineView, PollPhase};

const MAX_ROWS: usize = 10;

/// Render the whole view as a block of text.
pub fn render(view: &EngineView) -> String {
    let mut out = String::new();

    match &view.prediction {
        Some(p) => {
            let _ = writeln!(
                out,
                "Next #{}  {}  ({})",
                p.next_issue_number, p.size_class, p.color_class
            );
        }
        None => out.push_str("Next: waiting for first draw\n"),
    }

    let _ = write!(out, "Draw in {:>2}s", view.seconds_remaining);
    if let Some(e) = &view.last_error {
        let _ = write!(out, "  [stale: {}]", e);
    } else if view.phase == PollPhase::Polling {
        out.push_str("  [fetching]");
    }
    out.push('\n');

    for draw in view.draws.iter().take(MAX_ROWS) {
        let _ = writeln!(
            out,
            "{}  {}  {:<5}  {}",
            draw.issue_number,
            draw.number,
            draw.size_class(),
            draw.color
        );
    }

    out
}
