use plyzer::export::*;
use plyzer::types::{TrackRecord, TrackTable};

fn create_test_track(name: &str, artist: &str, album: &str, id: &str, popularity: u8) -> TrackRecord {
    TrackRecord {
        name: name.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        id: id.to_string(),
        popularity,
    }
}

#[test]
fn test_csv_header_and_rows() {
    let table = vec![create_test_track("Song", "Artist", "Album", "abc", 42)];

    let csv = to_csv_string(&table).unwrap();

    assert_eq!(csv, "name,artist,album,id,popularity\nSong,Artist,Album,abc,42\n");
}

#[test]
fn test_csv_quotes_special_values() {
    let table = vec![create_test_track(
        "Hello, \"World\"",
        "Artist",
        "Line\nBreak",
        "q1",
        7,
    )];

    let csv = to_csv_string(&table).unwrap();

    assert!(csv.contains("\"Hello, \"\"World\"\"\""));
    assert!(csv.contains("\"Line\nBreak\""));
}

#[test]
fn test_csv_round_trip() {
    let table: TrackTable = vec![
        create_test_track("Plain", "A", "Album A", "1", 0),
        create_test_track("Comma, inside", "B", "Album \"B\"", "2", 100),
        create_test_track("Ünïcödé ♫", "Sigur Rós", "( )", "3", 55),
        create_test_track("Plain", "A", "Album A", "1", 0),
    ];

    let csv = to_csv_string(&table).unwrap();
    let parsed = read_csv(csv.as_bytes()).unwrap();

    assert_eq!(parsed, table);
}

#[test]
fn test_csv_empty_table_has_header() {
    let csv = to_csv_string(&TrackTable::new()).unwrap();
    assert_eq!(csv, "name,artist,album,id,popularity\n");
    assert!(read_csv(csv.as_bytes()).unwrap().is_empty());
}

#[tokio::test]
async fn test_save_csv_writes_file() {
    let dir = std::env::temp_dir().join(format!("plyzer-export-{}", std::process::id()));
    let path = dir.join(DEFAULT_FILE_NAME);
    let table = vec![create_test_track("Song", "Artist", "Album", "abc", 42)];

    save_csv(&table, &path).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(read_csv(content.as_bytes()).unwrap(), table);
    let _ = std::fs::remove_dir_all(dir);
}
