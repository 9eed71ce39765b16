// src/ingest/mod.rs
use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::info;

use crate::cards::RawCardRecord;

/// Read the scraped card table into memory, one `RawCardRecord` per row.
///
/// Empty category-mapping cells deserialize to `None` (card has no offerings
/// in that domain); columns the record shape does not name are ignored, since
/// the scraper carries more fields than the benefit pipelines consume.
pub fn read_card_table<P: AsRef<Path>>(path: P) -> Result<Vec<RawCardRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("opening card table {:?}", path))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        let record: RawCardRecord = result
            .with_context(|| format!("card table parse error at record {} in {:?}", idx, path))?;
        records.push(record);
    }

    info!(cards = records.len(), path = %path.display(), "loaded card table");
    Ok(records)
}
