// src/sink/mod.rs
//
// Persistence boundary: the typed row sets land as CSV (for the analysis
// side) and Parquet (columnar archive). Every write goes to a temp path and
// is renamed into place, so a failed run leaves no partial output behind.
use std::{fs, fs::File, path::Path, sync::Arc};

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::Serialize;
use tracing::info;

use crate::cards::{CashbackRow, RewardRow};

/// Serialize rows to CSV with a header derived from the row struct.
pub fn write_csv<T: Serialize>(rows: &[T], path: &Path) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    {
        let mut writer = csv::Writer::from_path(&temp_path)
            .with_context(|| format!("creating {:?}", temp_path))?;
        for row in rows {
            writer.serialize(row).with_context(|| format!("writing row to {:?}", temp_path))?;
        }
        writer.flush().with_context(|| format!("flushing {:?}", temp_path))?;
    }
    fs::rename(&temp_path, path)
        .with_context(|| format!("renaming {:?} into place", temp_path))?;
    info!(rows = rows.len(), path = %path.display(), "wrote csv");
    Ok(())
}

fn card_attr_fields() -> Vec<Field> {
    vec![
        Field::new("img", DataType::Utf8, false),
        Field::new("bank", DataType::Utf8, false),
        Field::new("card_name", DataType::Utf8, false),
        Field::new("card_type", DataType::Utf8, false),
        Field::new("required_income", DataType::Utf8, false),
        Field::new("required_applicant_type", DataType::Utf8, false),
    ]
}

fn card_attr_arrays<'a, I>(rows: I) -> Vec<ArrayRef>
where
    I: Iterator<Item = (&'a str, &'a str, &'a str, &'a str, &'a str, &'a str)> + Clone,
{
    vec![
        Arc::new(StringArray::from_iter_values(rows.clone().map(|r| r.0))),
        Arc::new(StringArray::from_iter_values(rows.clone().map(|r| r.1))),
        Arc::new(StringArray::from_iter_values(rows.clone().map(|r| r.2))),
        Arc::new(StringArray::from_iter_values(rows.clone().map(|r| r.3))),
        Arc::new(StringArray::from_iter_values(rows.clone().map(|r| r.4))),
        Arc::new(StringArray::from_iter_values(rows.map(|r| r.5))),
    ]
}

/// Write the reward rows as a single Parquet file.
pub fn write_reward_parquet(rows: &[RewardRow], path: &Path) -> Result<()> {
    let mut fields = card_attr_fields();
    fields.extend([
        Field::new("reward_points", DataType::Int64, true),
        Field::new("each_spending", DataType::Int64, true),
        Field::new("reward_category", DataType::Utf8, false),
    ]);
    let schema = Arc::new(Schema::new(fields));

    let mut columns = card_attr_arrays(rows.iter().map(|r| {
        (
            r.img.as_str(),
            r.bank.as_str(),
            r.card_name.as_str(),
            r.card_type.as_str(),
            r.required_income.as_str(),
            r.required_applicant_type.as_str(),
        )
    }));
    columns.push(Arc::new(Int64Array::from_iter(
        rows.iter().map(|r| r.reward_points),
    )));
    columns.push(Arc::new(Int64Array::from_iter(
        rows.iter().map(|r| r.each_spending),
    )));
    columns.push(Arc::new(StringArray::from_iter_values(
        rows.iter().map(|r| r.reward_category.as_str()),
    )));

    let batch =
        RecordBatch::try_new(schema, columns).context("building reward record batch")?;
    write_parquet_batch(batch, path)
}

/// Write the cashback rows as a single Parquet file.
pub fn write_cashback_parquet(rows: &[CashbackRow], path: &Path) -> Result<()> {
    let mut fields = card_attr_fields();
    fields.extend([
        Field::new("cashback_rate", DataType::Int64, false),
        Field::new("cashback_cap", DataType::Int64, false),
        Field::new("cashback_from", DataType::Int64, false),
        Field::new("cashback_till", DataType::Int64, true),
        Field::new("cashback_weekends_only", DataType::Boolean, false),
        Field::new("cashback_monthly_basis", DataType::Boolean, false),
        Field::new("cashback_single_receipt", DataType::Boolean, false),
        Field::new("cashback_category", DataType::Utf8, false),
    ]);
    let schema = Arc::new(Schema::new(fields));

    let mut columns = card_attr_arrays(rows.iter().map(|r| {
        (
            r.img.as_str(),
            r.bank.as_str(),
            r.card_name.as_str(),
            r.card_type.as_str(),
            r.required_income.as_str(),
            r.required_applicant_type.as_str(),
        )
    }));
    columns.push(Arc::new(Int64Array::from_iter_values(
        rows.iter().map(|r| r.cashback_rate),
    )));
    columns.push(Arc::new(Int64Array::from_iter_values(
        rows.iter().map(|r| r.cashback_cap),
    )));
    columns.push(Arc::new(Int64Array::from_iter_values(
        rows.iter().map(|r| r.cashback_from),
    )));
    columns.push(Arc::new(Int64Array::from_iter(
        rows.iter().map(|r| r.cashback_till),
    )));
    columns.push(Arc::new(BooleanArray::from_iter(
        rows.iter().map(|r| Some(r.cashback_weekends_only)),
    )));
    columns.push(Arc::new(BooleanArray::from_iter(
        rows.iter().map(|r| Some(r.cashback_monthly_basis)),
    )));
    columns.push(Arc::new(BooleanArray::from_iter(
        rows.iter().map(|r| Some(r.cashback_single_receipt)),
    )));
    columns.push(Arc::new(StringArray::from_iter_values(
        rows.iter().map(|r| r.cashback_category.as_str()),
    )));

    let batch =
        RecordBatch::try_new(schema, columns).context("building cashback record batch")?;
    write_parquet_batch(batch, path)
}

fn write_parquet_batch(batch: RecordBatch, path: &Path) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let file =
        File::create(&temp_path).with_context(|| format!("creating {:?}", temp_path))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .with_context(|| format!("opening parquet writer for {:?}", temp_path))?;
    writer.write(&batch).with_context(|| format!("writing batch to {:?}", temp_path))?;
    writer.close().with_context(|| format!("closing {:?}", temp_path))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("renaming {:?} into place", temp_path))?;
    info!(rows = batch.num_rows(), path = %path.display(), "wrote parquet");
    Ok(())
}
