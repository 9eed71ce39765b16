// src/process/explode.rs
use std::collections::BTreeMap;

use tracing::trace;

use crate::cards::RawCardRecord;
use crate::error::{BenefitError, Result};

/// One reward category entry, still string-typed. Identifying card
/// attributes are carried verbatim from the source record.
#[derive(Debug, Clone)]
pub struct RewardCategoryRow {
    pub img: String,
    pub bank: String,
    pub card_name: String,
    pub card_type: String,
    pub required_income: String,
    pub required_applicant_type: String,
    pub category: String,
    pub description: String,
}

/// One cashback category entry, still string-typed: rate, cap, and benchmark
/// are the three positional components of the mapping value.
#[derive(Debug, Clone)]
pub struct CashbackCategoryRow {
    pub img: String,
    pub bank: String,
    pub card_name: String,
    pub card_type: String,
    pub required_income: String,
    pub required_applicant_type: String,
    pub category: String,
    pub rate: String,
    pub cap: String,
    pub benchmark: String,
}

/// Decode a category-mapping field as category name → value components.
///
/// `BTreeMap` gives the mapping's natural key order; row order across
/// categories carries no meaning downstream.
fn decode_mapping(
    raw: &str,
    record: &RawCardRecord,
    field: &'static str,
) -> Result<BTreeMap<String, Vec<String>>> {
    serde_json::from_str(raw).map_err(|e| BenefitError::MalformedCategoryMapping {
        bank: record.bank.clone(),
        card_name: record.card_name.clone(),
        field,
        detail: e.to_string(),
    })
}

fn malformed(record: &RawCardRecord, field: &'static str, detail: String) -> BenefitError {
    BenefitError::MalformedCategoryMapping {
        bank: record.bank.clone(),
        card_name: record.card_name.clone(),
        field,
        detail,
    }
}

/// Fan the record's reward mapping out into one row per category.
///
/// An absent mapping contributes zero rows; malformed JSON or a value list
/// without its single description element aborts the batch.
pub fn explode_reward(record: &RawCardRecord) -> Result<Vec<RewardCategoryRow>> {
    let Some(raw) = record.reward_category.as_deref() else {
        return Ok(Vec::new());
    };

    let mapping = decode_mapping(raw, record, "reward_category")?;
    let mut rows = Vec::with_capacity(mapping.len());
    for (category, values) in mapping {
        let description = values.first().ok_or_else(|| {
            malformed(
                record,
                "reward_category",
                format!("category {:?} has an empty value list", category),
            )
        })?;
        trace!(card = %record.card_name, category = %category, "reward category row");
        rows.push(RewardCategoryRow {
            img: record.img.clone(),
            bank: record.bank.clone(),
            card_name: record.card_name.clone(),
            card_type: record.card_type.clone(),
            required_income: record.required_income.clone(),
            required_applicant_type: record.required_applicant_type.clone(),
            category,
            description: description.clone(),
        });
    }
    Ok(rows)
}

/// Fan the record's cashback mapping out into one row per category. The value
/// list must carry exactly [rate, cap, benchmark].
pub fn explode_cashback(record: &RawCardRecord) -> Result<Vec<CashbackCategoryRow>> {
    let Some(raw) = record.cashback_category.as_deref() else {
        return Ok(Vec::new());
    };

    let mapping = decode_mapping(raw, record, "cashback_category")?;
    let mut rows = Vec::with_capacity(mapping.len());
    for (category, values) in mapping {
        let [rate, cap, benchmark]: [String; 3] = values.try_into().map_err(|v: Vec<String>| {
            malformed(
                record,
                "cashback_category",
                format!("category {:?} has {} value components, expected 3", category, v.len()),
            )
        })?;
        trace!(card = %record.card_name, category = %category, "cashback category row");
        rows.push(CashbackCategoryRow {
            img: record.img.clone(),
            bank: record.bank.clone(),
            card_name: record.card_name.clone(),
            card_type: record.card_type.clone(),
            required_income: record.required_income.clone(),
            required_applicant_type: record.required_applicant_type.clone(),
            category,
            rate,
            cap,
            benchmark,
        });
    }
    Ok(rows)
}
