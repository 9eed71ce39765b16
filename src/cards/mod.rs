// src/cards/mod.rs
use serde::{Deserialize, Serialize};

/// Sentinel written for an "uncapped" cashback cap. Larger than any realistic
/// cap so threshold queries still behave; exported so consumers can test
/// against it instead of hardcoding the magic number.
pub const UNCAPPED: i64 = 10_000_000_000;

/// One scraped row per (bank, card), as the scraping side delivers it.
///
/// The two category-mapping fields hold JSON text or nothing at all. `None`
/// means the card has no offerings in that domain and contributes zero rows
/// downstream; JSON text that fails to decode is an upstream extraction
/// defect and aborts the batch.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCardRecord {
    pub img: String,
    pub bank: String,
    pub card_name: String,
    pub card_type: String,
    pub required_income: String,
    pub required_applicant_type: String,
    /// JSON: category name → [points/spending description].
    #[serde(default)]
    pub reward_category: Option<String>,
    /// JSON: category name → [rate, cap, benchmark].
    #[serde(default)]
    pub cashback_category: Option<String>,
}

/// Final typed reward row, one per (card, reward category).
///
/// `reward_points` and `each_spending` are `None` when the source description
/// did not match the corresponding extraction pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardRow {
    pub img: String,
    pub bank: String,
    pub card_name: String,
    pub card_type: String,
    pub required_income: String,
    pub required_applicant_type: String,
    pub reward_points: Option<i64>,
    pub each_spending: Option<i64>,
    pub reward_category: String,
}

/// Final typed cashback row, one per (card, cashback category).
///
/// Invariant: when `cashback_till` is present, `cashback_from <= cashback_till`.
/// `cashback_cap` is a positive amount or exactly [`UNCAPPED`], never null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashbackRow {
    pub img: String,
    pub bank: String,
    pub card_name: String,
    pub card_type: String,
    pub required_income: String,
    pub required_applicant_type: String,
    pub cashback_rate: i64,
    pub cashback_cap: i64,
    pub cashback_from: i64,
    pub cashback_till: Option<i64>,
    pub cashback_weekends_only: bool,
    pub cashback_monthly_basis: bool,
    pub cashback_single_receipt: bool,
    pub cashback_category: String,
}
