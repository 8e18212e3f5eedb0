//! CSV export of a track table.
//!
//! The header row is `name,artist,album,id,popularity`; fields are quoted
//! following RFC 4180 where needed.

use std::{
    io::{Read, Write},
    path::Path,
};

use crate::{
    error::Result,
    types::{TrackRecord, TrackTable},
};

pub const DEFAULT_FILE_NAME: &str = "playlist_tracks.csv";

pub fn write_csv<W: Write>(table: &TrackTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in table {
        wtr.serialize(record)?;
    }
    if table.is_empty() {
        wtr.write_record(["name", "artist", "album", "id", "popularity"])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(table: &TrackTable) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_csv(table, &mut buf)?;
    // csv output of String fields is always valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn read_csv<R: Read>(reader: R) -> Result<TrackTable> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut table = TrackTable::new();
    for record in rdr.deserialize::<TrackRecord>() {
        table.push(record?);
    }
    Ok(table)
}

pub async fn save_csv(table: &TrackTable, path: &Path) -> Result<()> {
    let content = to_csv_string(table)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await?;
    }
    async_fs::write(path, content).await?;
    Ok(())
}
