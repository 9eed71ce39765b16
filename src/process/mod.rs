// src/process/mod.rs
//
// The extraction-and-normalization engine. Both pipelines run the same
// strict stage order — filter → explode → parse → coerce — over the whole
// batch, producing a new collection at each stage. The first fatal error
// aborts the batch so no partial result can escape to a sink.
pub mod coerce;
pub mod explode;
pub mod filter;
pub mod parse;

use tracing::info;

use crate::cards::{CashbackRow, RawCardRecord, RewardRow};
use crate::config::PipelineConfig;
use crate::error::Result;

/// Extract one typed reward row per (qualified card, reward category).
#[tracing::instrument(level = "info", skip_all, fields(cards = cards.len()))]
pub fn extract_reward_points(
    cards: &[RawCardRecord],
    config: &PipelineConfig,
) -> Result<Vec<RewardRow>> {
    let qualified = filter::filter_qualified(cards, &config.qualified_applicants);

    let mut rows = Vec::new();
    for record in qualified {
        for category_row in explode::explode_reward(record)? {
            let extract = parse::parse_reward_description(&category_row.description);
            rows.push(coerce::finalize_reward(category_row, extract)?);
        }
    }
    info!(rows = rows.len(), "extracted reward point rows");
    Ok(rows)
}

/// Extract one typed cashback row per (qualified card, cashback category).
/// Cards on the exclusion list are dropped before explosion.
#[tracing::instrument(level = "info", skip_all, fields(cards = cards.len()))]
pub fn extract_cashback(
    cards: &[RawCardRecord],
    config: &PipelineConfig,
) -> Result<Vec<CashbackRow>> {
    let qualified = filter::filter_qualified(cards, &config.qualified_applicants);
    let qualified = filter::drop_excluded_cards(qualified, &config.excluded_cashback_cards);

    let mut rows = Vec::new();
    for record in qualified {
        for category_row in explode::explode_cashback(record)? {
            let extract = parse::parse_benchmark(&category_row.benchmark);
            rows.push(coerce::finalize_cashback(category_row, extract)?);
        }
    }
    info!(rows = rows.len(), "extracted cashback rows");
    Ok(rows)
}
