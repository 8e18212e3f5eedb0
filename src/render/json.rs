use serde_json::{Value, json};

use crate::{
    render::Render,
    types::{Metrics, PlaylistSummary, TrackTable},
};

/// Renders an analysis as the JSON document served by the dashboard API.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Render for JsonRenderer {
    type Output = Value;

    fn render(&self, summary: &PlaylistSummary, metrics: &Metrics, table: &TrackTable) -> Value {
        json!({
            "playlist": {
                "name": summary.name,
                "owner": summary.owner,
                "total_tracks": summary.total_tracks,
                "description": summary.description,
                "display_description": summary.display_description(),
                "image": summary.image,
            },
            "metrics": metrics,
            "analyzed_tracks": table.len(),
            "tracks": table,
        })
    }
}
