use std::fmt::Write;

use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};

use crate::{
    render::Render,
    types::{Metrics, PlaylistSummary, TrackTable},
    utils,
};

const BAR_WIDTH: usize = 40;

#[derive(Tabled)]
struct MetricRow {
    metric: &'static str,
    value: String,
}

#[derive(Tabled)]
struct ArtistRow {
    artist: String,
    tracks: usize,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct TrackRow {
    #[tabled(rename = "#")]
    position: usize,
    name: String,
    artist: String,
    album: String,
    popularity: String,
}

/// Renders an analysis as colored text for the terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    /// Include the full track table.
    pub show_tracks: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self { show_tracks: true }
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title.green().bold());
}

impl Render for TerminalRenderer {
    type Output = String;

    fn render(&self, summary: &PlaylistSummary, metrics: &Metrics, table: &TrackTable) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", summary.name.green().bold().underline());
        let _ = writeln!(out, "Total Tracks: {}", summary.total_tracks);
        let _ = writeln!(out, "Owner:        {}", summary.owner);
        let _ = writeln!(out, "Description:  {}", summary.display_description());
        if let Some(image) = &summary.image {
            let _ = writeln!(out, "Cover:        {}", image);
        }

        heading(&mut out, "Track Popularity");
        let rows = match metrics.popularity {
            Some(stats) => vec![
                MetricRow {
                    metric: "Average Popularity",
                    value: format!("{:.2}", stats.mean),
                },
                MetricRow {
                    metric: "Median Popularity",
                    value: format!("{:.2}", stats.median),
                },
                MetricRow {
                    metric: "Min Popularity",
                    value: stats.min.to_string(),
                },
                MetricRow {
                    metric: "Max Popularity",
                    value: stats.max.to_string(),
                },
                MetricRow {
                    metric: "Distinct Artists",
                    value: metrics.distinct_artists.to_string(),
                },
            ],
            None => vec![MetricRow {
                metric: "Popularity",
                value: "no data".to_string(),
            }],
        };
        let _ = writeln!(out, "{}", Table::new(rows).with(Style::rounded()));

        heading(&mut out, "Popularity Distribution");
        let max_count = metrics.histogram.iter().map(|b| b.count).max().unwrap_or(0);
        for bucket in &metrics.histogram {
            let _ = writeln!(
                out,
                "{:>3}-{:<3} {:>4} {}",
                bucket.lower,
                bucket.upper,
                bucket.count,
                utils::bar(bucket.count, max_count, BAR_WIDTH).green()
            );
        }

        heading(
            &mut out,
            &format!("Top {} Artists", metrics.top_artists.len()),
        );
        let max_artist = metrics.top_artists.first().map(|a| a.count).unwrap_or(0);
        let artist_rows: Vec<ArtistRow> = metrics
            .top_artists
            .iter()
            .map(|a| ArtistRow {
                artist: a.artist.clone(),
                tracks: a.count,
                bar: utils::bar(a.count, max_artist, BAR_WIDTH / 2),
            })
            .collect();
        let _ = writeln!(out, "{}", Table::new(artist_rows).with(Style::rounded()));

        if self.show_tracks {
            heading(&mut out, "Track Details");
            let max_popularity = metrics.popularity.map(|s| s.max);
            let track_rows: Vec<TrackRow> = table
                .iter()
                .enumerate()
                .map(|(i, t)| TrackRow {
                    position: i + 1,
                    name: t.name.clone(),
                    artist: t.artist.clone(),
                    album: t.album.clone(),
                    popularity: if Some(t.popularity) == max_popularity {
                        format!("{} ▲", t.popularity)
                    } else {
                        t.popularity.to_string()
                    },
                })
                .collect();
            let _ = writeln!(out, "{}", Table::new(track_rows).with(Style::rounded()));
        }

        out
    }
}
