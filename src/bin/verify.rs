// src/bin/verify.rs
//
// Re-reads the output tables emitted by the main binary and checks the
// published invariants hold on what actually landed on disk: row counts
// agree between the CSV and Parquet renditions, spending ranges are ordered,
// and caps are positive or exactly the uncapped sentinel.
use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use arrow::array::{Array, Int64Array, StringArray};
use cardscraper::cards::UNCAPPED;
use clap::Parser;
use glob::glob;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::{FileReader, SerializedFileReader};

#[derive(Parser)]
#[command(name = "verify")]
#[command(about = "Checks emitted reward/cashback tables against their invariants")]
struct Args {
    /// Output directory produced by the cardscraper binary
    #[arg(default_value = "out")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut failures = 0usize;

    // 1) Row counts must agree between the two renditions of each table.
    println!("{:<20} {:>12} {:>12} {:>10}", "Table", "CSV rows", "Parquet", "Status");
    println!("{:-<58}", "");
    for table in ["reward_points", "cashback"] {
        let csv_rows = count_csv_rows(&args.output.join(format!("{table}.csv")))?;
        let parquet_rows = count_parquet_rows(&args.output.join(format!("{table}.parquet")))?;
        let ok = csv_rows == parquet_rows;
        if !ok {
            failures += 1;
        }
        println!(
            "{:<20} {:>12} {:>12} {:>10}",
            table,
            csv_rows,
            parquet_rows,
            if ok { "ok" } else { "MISMATCH" }
        );
    }

    // 2) Column invariants, checked over every parquet file in the directory.
    let pattern = format!("{}/cashback*.parquet", args.output.display());
    for entry in glob(&pattern).context("reading output glob")? {
        let path = entry?;
        failures += check_cashback_invariants(&path)?;
    }

    if failures > 0 {
        eprintln!("{failures} invariant violation(s) found");
        std::process::exit(1);
    }
    println!("all invariants hold");
    Ok(())
}

fn count_csv_rows(path: &Path) -> Result<usize> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("opening {:?}", path))?;
    let mut rows = 0;
    for record in rdr.records() {
        record.with_context(|| format!("reading {:?}", path))?;
        rows += 1;
    }
    Ok(rows)
}

fn count_parquet_rows(path: &Path) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("opening {:?}", path))?;
    let reader =
        SerializedFileReader::new(file).with_context(|| format!("reading {:?}", path))?;
    Ok(reader.metadata().file_metadata().num_rows() as usize)
}

/// Returns the number of violated rows in one cashback parquet file.
fn check_cashback_invariants(path: &Path) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("opening {:?}", path))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("reading {:?}", path))?
        .build()?;

    let mut violations = 0;
    for batch in reader {
        let batch = batch?;
        let from = downcast_i64(&batch, "cashback_from")?;
        let till = downcast_i64(&batch, "cashback_till")?;
        let cap = downcast_i64(&batch, "cashback_cap")?;
        let card = batch
            .column_by_name("card_name")
            .and_then(|c| c.as_any().downcast_ref::<StringArray>().cloned())
            .context("card_name column missing")?;

        for row in 0..batch.num_rows() {
            if !till.is_null(row) && from.value(row) > till.value(row) {
                eprintln!(
                    "{}: range inverted for {} ({} > {})",
                    path.display(),
                    card.value(row),
                    from.value(row),
                    till.value(row)
                );
                violations += 1;
            }
            let cap_value = cap.value(row);
            if cap_value <= 0 || cap_value > UNCAPPED {
                eprintln!(
                    "{}: bad cap {} for {}",
                    path.display(),
                    cap_value,
                    card.value(row)
                );
                violations += 1;
            }
        }
    }
    Ok(violations)
}

fn downcast_i64(batch: &arrow::record_batch::RecordBatch, name: &str) -> Result<Int64Array> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<Int64Array>().cloned())
        .with_context(|| format!("column {name} missing or not Int64"))
}
