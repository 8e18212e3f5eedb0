//! Presentation of an analysis.
//!
//! Front ends only depend on [`Render`]; the terminal and the dashboard API
//! each plug in their own renderer.

mod json;
mod terminal;

pub use json::JsonRenderer;
pub use terminal::TerminalRenderer;

use crate::types::{Analysis, Metrics, PlaylistSummary, TrackTable};

pub trait Render {
    type Output;

    fn render(&self, summary: &PlaylistSummary, metrics: &Metrics, table: &TrackTable)
    -> Self::Output;

    fn render_analysis(&self, analysis: &Analysis) -> Self::Output {
        self.render(&analysis.summary, &analysis.metrics, &analysis.table)
    }
}
