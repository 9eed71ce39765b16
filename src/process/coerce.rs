// src/process/coerce.rs
//
// Final typing step: strip decorations, resolve sentinels and nulls, coerce
// to integers, and repair inverted ranges. Runs after parsing so that
// pattern-miss (`None`) and business default (0, uncapped) stay separable.
use crate::cards::{CashbackRow, RewardRow, UNCAPPED};
use crate::error::{BenefitError, Result};
use crate::process::explode::{CashbackCategoryRow, RewardCategoryRow};
use crate::process::parse::{BenchmarkExtract, RewardExtract};

/// Strip digit-group commas and surrounding whitespace.
fn strip_commas(raw: &str) -> String {
    raw.trim().replace(',', "")
}

/// Coerce a decorated numeric string to `i64`. Failure is fatal for the
/// batch and names the field and row so the source text can be diagnosed.
fn coerce_number(
    raw: &str,
    field: &'static str,
    bank: &str,
    card_name: &str,
    category: &str,
) -> Result<i64> {
    strip_commas(raw)
        .parse::<i64>()
        .map_err(|_| BenefitError::NumericCoercion {
            field,
            bank: bank.to_string(),
            card_name: card_name.to_string(),
            category: category.to_string(),
            text: raw.to_string(),
        })
}

/// Type a reward row. A dash in the spending position means "per RM1 spent";
/// pattern misses stay null.
pub fn finalize_reward(row: RewardCategoryRow, extract: RewardExtract) -> Result<RewardRow> {
    let reward_points = extract
        .reward_points
        .map(|text| coerce_number(&text, "reward_points", &row.bank, &row.card_name, &row.category))
        .transpose()?;

    let each_spending = extract
        .each_spending
        .map(|text| {
            let text = if text.trim() == "-" { "1".to_string() } else { text };
            coerce_number(&text, "each_spending", &row.bank, &row.card_name, &row.category)
        })
        .transpose()?;

    Ok(RewardRow {
        img: row.img,
        bank: row.bank,
        card_name: row.card_name,
        card_type: row.card_type,
        required_income: row.required_income,
        required_applicant_type: row.required_applicant_type,
        reward_points,
        each_spending,
        reward_category: row.category.to_lowercase(),
    })
}

/// Type a cashback row: rate loses its `%`, cap loses its `RM` (with
/// "uncapped" mapping to the [`UNCAPPED`] sentinel), a missing lower
/// threshold becomes 0, and an inverted from/till range is swapped back.
pub fn finalize_cashback(
    row: CashbackCategoryRow,
    extract: BenchmarkExtract,
) -> Result<CashbackRow> {
    let rate_text = row.rate.replace('%', "");
    let cashback_rate =
        coerce_number(&rate_text, "cashback_rate", &row.bank, &row.card_name, &row.category)?;

    let cap_text = row.cap.replace("RM", "");
    let cashback_cap = if strip_commas(&cap_text).eq_ignore_ascii_case("uncapped") {
        UNCAPPED
    } else {
        coerce_number(&cap_text, "cashback_cap", &row.bank, &row.card_name, &row.category)?
    };

    // Absence of an explicit lower bound means no lower bound.
    let mut cashback_from = match extract.from {
        Some(text) => {
            coerce_number(&text, "cashback_from", &row.bank, &row.card_name, &row.category)?
        }
        None => 0,
    };
    let mut cashback_till = extract
        .till
        .map(|text| coerce_number(&text, "cashback_till", &row.bank, &row.card_name, &row.category))
        .transpose()?;

    // Some source records state the two benchmark numbers in reverse order.
    // Direction matters for from/till semantics, so this is a swap, not a
    // sort, and never runs against a null till.
    if let Some(till) = cashback_till {
        if cashback_from > till {
            cashback_till = Some(cashback_from);
            cashback_from = till;
        }
    }

    Ok(CashbackRow {
        img: row.img,
        bank: row.bank,
        card_name: row.card_name,
        card_type: row.card_type,
        required_income: row.required_income,
        required_applicant_type: row.required_applicant_type,
        cashback_rate,
        cashback_cap,
        cashback_from,
        cashback_till,
        cashback_weekends_only: extract.weekends_only,
        cashback_monthly_basis: extract.monthly_basis,
        cashback_single_receipt: extract.single_receipt,
        cashback_category: row.category.to_lowercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reward_row(category: &str) -> RewardCategoryRow {
        RewardCategoryRow {
            img: "img.png".to_string(),
            bank: "hsbc".to_string(),
            card_name: "hsbc_amanah_mpower_visa".to_string(),
            card_type: "visa".to_string(),
            required_income: "36000".to_string(),
            required_applicant_type: "Anybody".to_string(),
            category: category.to_string(),
            description: String::new(),
        }
    }

    fn cashback_row(rate: &str, cap: &str) -> CashbackCategoryRow {
        CashbackCategoryRow {
            img: "img.png".to_string(),
            bank: "hsbc".to_string(),
            card_name: "hsbc_amanah_mpower_visa".to_string(),
            card_type: "visa".to_string(),
            required_income: "36000".to_string(),
            required_applicant_type: "Anybody".to_string(),
            category: "Petrol".to_string(),
            rate: rate.to_string(),
            cap: cap.to_string(),
            benchmark: String::new(),
        }
    }

    #[test]
    fn dash_spending_means_per_unit() {
        let extract = RewardExtract {
            reward_points: Some("5".to_string()),
            each_spending: Some("-".to_string()),
        };
        let row = finalize_reward(reward_row("Dining"), extract).unwrap();
        assert_eq!(row.reward_points, Some(5));
        assert_eq!(row.each_spending, Some(1));
        assert_eq!(row.reward_category, "dining");
    }

    #[test]
    fn comma_grouping_is_stripped_before_coercion() {
        let extract = RewardExtract {
            reward_points: Some("10,000".to_string()),
            each_spending: Some("1,000".to_string()),
        };
        let row = finalize_reward(reward_row("Overseas"), extract).unwrap();
        assert_eq!(row.reward_points, Some(10_000));
        assert_eq!(row.each_spending, Some(1_000));
    }

    #[test]
    fn pattern_misses_stay_null() {
        let row = finalize_reward(reward_row("Dining"), RewardExtract::default()).unwrap();
        assert_eq!(row.reward_points, None);
        assert_eq!(row.each_spending, None);
    }

    #[test]
    fn uncapped_coerces_to_the_sentinel() {
        let row =
            finalize_cashback(cashback_row("8%", "uncapped"), BenchmarkExtract::default()).unwrap();
        assert_eq!(row.cashback_rate, 8);
        assert_eq!(row.cashback_cap, UNCAPPED);
        assert!(row.cashback_cap > 1_000_000);
    }

    #[test]
    fn rate_and_cap_lose_their_markers() {
        let row = finalize_cashback(cashback_row("5%", "RM1,200"), BenchmarkExtract::default())
            .unwrap();
        assert_eq!(row.cashback_rate, 5);
        assert_eq!(row.cashback_cap, 1200);
        assert_eq!(row.cashback_category, "petrol");
    }

    #[test]
    fn missing_lower_threshold_defaults_to_zero() {
        let extract = BenchmarkExtract {
            till: Some("500".to_string()),
            ..Default::default()
        };
        let row = finalize_cashback(cashback_row("5%", "RM50"), extract).unwrap();
        assert_eq!(row.cashback_from, 0);
        assert_eq!(row.cashback_till, Some(500));
    }

    #[test]
    fn inverted_range_is_swapped_back() {
        let extract = BenchmarkExtract {
            from: Some("800".to_string()),
            till: Some("200".to_string()),
            ..Default::default()
        };
        let row = finalize_cashback(cashback_row("5%", "RM50"), extract).unwrap();
        assert_eq!(row.cashback_from, 200);
        assert_eq!(row.cashback_till, Some(800));
    }

    #[test]
    fn no_swap_against_a_null_till() {
        let extract = BenchmarkExtract {
            from: Some("800".to_string()),
            ..Default::default()
        };
        let row = finalize_cashback(cashback_row("5%", "RM50"), extract).unwrap();
        assert_eq!(row.cashback_from, 800);
        assert_eq!(row.cashback_till, None);
    }

    #[test]
    fn non_numeric_residual_names_field_and_row() {
        let err = finalize_cashback(cashback_row("waived", "RM50"), BenchmarkExtract::default())
            .unwrap_err();
        match err {
            BenefitError::NumericCoercion { field, ref card_name, .. } => {
                assert_eq!(field, "cashback_rate");
                assert_eq!(card_name, "hsbc_amanah_mpower_visa");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
