use plyzer::analysis::aggregate;
use plyzer::render::{JsonRenderer, Render, TerminalRenderer};
use plyzer::types::{PlaylistSummary, TrackRecord, TrackTable};

fn create_test_track(name: &str, artist: &str, popularity: u8) -> TrackRecord {
    TrackRecord {
        name: name.to_string(),
        artist: artist.to_string(),
        album: "Album".to_string(),
        id: format!("{}_id", name),
        popularity,
    }
}

fn create_test_summary() -> PlaylistSummary {
    PlaylistSummary {
        name: "Road Trip".to_string(),
        owner: "Alex".to_string(),
        total_tracks: 3,
        description: "x".repeat(80),
        image: Some("https://images.example/cover.jpg".to_string()),
    }
}

fn create_test_table() -> TrackTable {
    vec![
        create_test_track("One", "A", 10),
        create_test_track("Two", "B", 90),
        create_test_track("Three", "A", 50),
    ]
}

#[test]
fn test_terminal_renderer() {
    colored::control::set_override(false);
    let table = create_test_table();
    let metrics = aggregate(&table);

    let out = TerminalRenderer::default().render(&create_test_summary(), &metrics, &table);

    assert!(out.contains("Road Trip"));
    assert!(out.contains(&format!("{}...", "x".repeat(50))));
    assert!(out.contains("Average Popularity"));
    assert!(out.contains("50.00"));
    assert!(out.contains("Top 2 Artists"));
    assert!(out.contains("Three"));
    // the most popular track is marked
    assert!(out.contains("90 ▲"));
}

#[test]
fn test_terminal_renderer_without_tracks() {
    colored::control::set_override(false);
    let table = create_test_table();
    let metrics = aggregate(&table);

    let out = TerminalRenderer { show_tracks: false }.render(
        &create_test_summary(),
        &metrics,
        &table,
    );

    assert!(!out.contains("Track Details"));
    assert!(out.contains("Popularity Distribution"));
}

#[test]
fn test_terminal_renderer_no_data() {
    colored::control::set_override(false);
    let table = TrackTable::new();
    let metrics = aggregate(&table);

    let out = TerminalRenderer::default().render(&create_test_summary(), &metrics, &table);

    assert!(out.contains("no data"));
    assert!(!out.contains("NaN"));
}

#[test]
fn test_json_renderer() {
    let table = create_test_table();
    let metrics = aggregate(&table);

    let value = JsonRenderer.render(&create_test_summary(), &metrics, &table);

    assert_eq!(value["playlist"]["name"], "Road Trip");
    assert_eq!(value["playlist"]["display_description"], format!("{}...", "x".repeat(50)));
    assert_eq!(value["analyzed_tracks"], 3);
    assert_eq!(value["metrics"]["popularity"]["mean"], 50.0);
    assert_eq!(value["metrics"]["popularity"]["median"], 50.0);
    assert_eq!(value["metrics"]["distinct_artists"], 2);
    assert_eq!(value["metrics"]["top_artists"][0]["artist"], "A");
    assert_eq!(value["metrics"]["top_artists"][0]["count"], 2);
    assert_eq!(value["tracks"][1]["name"], "Two");
}

#[test]
fn test_json_renderer_no_data_is_null() {
    let table = TrackTable::new();
    let metrics = aggregate(&table);

    let value = JsonRenderer.render(&create_test_summary(), &metrics, &table);

    assert!(value["metrics"]["popularity"].is_null());
}
