use std::collections::{HashMap, HashSet};

use crate::types::{ArtistCount, HistogramBucket, Metrics, PopularityStats, TrackTable};

/// Number of artists listed by [`aggregate`].
pub const DEFAULT_TOP_ARTISTS: usize = 10;

/// Width of the popularity buckets used by [`aggregate`].
pub const DEFAULT_BUCKET_WIDTH: u8 = 10;

pub fn aggregate(table: &TrackTable) -> Metrics {
    aggregate_with(table, DEFAULT_TOP_ARTISTS)
}

pub fn aggregate_with(table: &TrackTable, top_n: usize) -> Metrics {
    Metrics {
        popularity: popularity_stats(table),
        distinct_artists: distinct_artists(table),
        top_artists: top_artists(table, top_n),
        histogram: popularity_histogram(table, DEFAULT_BUCKET_WIDTH),
    }
}

/// Mean, median, min and max of the popularity column, or `None` for an
/// empty table.
pub fn popularity_stats(table: &TrackTable) -> Option<PopularityStats> {
    if table.is_empty() {
        return None;
    }

    let mut values: Vec<u8> = table.iter().map(|t| t.popularity).collect();
    values.sort_unstable();

    let len = values.len();
    let sum: u64 = values.iter().map(|&v| v as u64).sum();
    let median = if len % 2 == 0 {
        (values[len / 2 - 1] as f64 + values[len / 2] as f64) / 2.0
    } else {
        values[len / 2] as f64
    };

    Some(PopularityStats {
        mean: sum as f64 / len as f64,
        median,
        min: values[0],
        max: values[len - 1],
    })
}

/// Number of unique artist names, compared exactly.
pub fn distinct_artists(table: &TrackTable) -> usize {
    table
        .iter()
        .map(|t| t.artist.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// The `n` most frequent artists, by descending count. Artists with equal
/// counts keep the order in which they first appear in the table.
pub fn top_artists(table: &TrackTable, n: usize) -> Vec<ArtistCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ArtistCount> = Vec::new();

    for track in table {
        match index.get(track.artist.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(track.artist.as_str(), counts.len());
                counts.push(ArtistCount {
                    artist: track.artist.clone(),
                    count: 1,
                });
            }
        }
    }

    // stable sort keeps first-appearance order among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

/// Counts tracks per popularity bucket of `bucket_width` points covering
/// 0 to 100. The last bucket is closed at 100.
pub fn popularity_histogram(table: &TrackTable, bucket_width: u8) -> Vec<HistogramBucket> {
    let width = bucket_width.clamp(1, 100);
    let mut buckets: Vec<HistogramBucket> = Vec::new();

    let mut lower: u8 = 0;
    loop {
        let upper = lower.saturating_add(width - 1);
        if upper >= 100 || 100 - upper < width {
            buckets.push(HistogramBucket {
                lower,
                upper: 100,
                count: 0,
            });
            break;
        }
        buckets.push(HistogramBucket {
            lower,
            upper,
            count: 0,
        });
        lower = upper + 1;
    }

    for track in table {
        let popularity = track.popularity.min(100);
        if let Some(bucket) = buckets
            .iter_mut()
            .find(|b| popularity >= b.lower && popularity <= b.upper)
        {
            bucket.count += 1;
        }
    }

    buckets
}
