// src/process/parse.rs
//
// Pattern extraction from the free-text benefit descriptions. Every pattern
// here is independent and a miss yields `None`, never an error; the
// null-to-default rules live in `coerce`, not at the match site.
use once_cell::sync::Lazy;
use regex::Regex;

/// Spending amount after the currency marker: digits with optional comma
/// grouping, or a literal dash standing in for "per unit spent".
static RE_EACH_SPENDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"RM\s*([0-9][0-9,]*|-)").unwrap());

/// Points count immediately preceding the word "point(s)".
static RE_REWARD_POINTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9][0-9,]*)\s+point").unwrap());

static RE_CASHBACK_FROM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"from RM([0-9][0-9,]*)").unwrap());

static RE_CASHBACK_TILL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"up to RM([0-9][0-9,]*)").unwrap());

/// Raw substrings pulled out of a reward points/spending description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardExtract {
    pub reward_points: Option<String>,
    pub each_spending: Option<String>,
}

/// Extract the two numeric substrings of a reward description, e.g.
/// `"5 points for every RM1 spent"`. The two patterns match independently.
pub fn parse_reward_description(description: &str) -> RewardExtract {
    RewardExtract {
        reward_points: RE_REWARD_POINTS
            .captures(description)
            .map(|c| c[1].to_string()),
        each_spending: RE_EACH_SPENDING
            .captures(description)
            .map(|c| c[1].to_string()),
    }
}

/// Raw fields pulled out of a cashback benchmark string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkExtract {
    pub from: Option<String>,
    pub till: Option<String>,
    pub weekends_only: bool,
    pub monthly_basis: bool,
    pub single_receipt: bool,
}

/// Extract the spending range and condition flags from a benchmark string,
/// e.g. `"spend from RM2,000 up to RM5,000 monthly"`.
///
/// "any amount" phrasings never carry a "from RM" clause; they force the
/// lower threshold to zero here so the miss does not read as unknown.
pub fn parse_benchmark(benchmark: &str) -> BenchmarkExtract {
    let mut from = RE_CASHBACK_FROM
        .captures(benchmark)
        .map(|c| c[1].to_string());
    if benchmark.contains("any amount") {
        from = Some("0".to_string());
    }

    BenchmarkExtract {
        from,
        till: RE_CASHBACK_TILL
            .captures(benchmark)
            .map(|c| c[1].to_string()),
        weekends_only: benchmark.contains("weekends"),
        monthly_basis: benchmark.contains("monthly"),
        single_receipt: benchmark.contains("single receipt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_description_extracts_both_numbers() {
        let extract = parse_reward_description("5 points RM1 spent");
        assert_eq!(extract.reward_points.as_deref(), Some("5"));
        assert_eq!(extract.each_spending.as_deref(), Some("1"));
    }

    #[test]
    fn reward_patterns_match_independently() {
        // Points pattern misses on the dash; spending still extracts.
        let extract = parse_reward_description("- points RM1 spent");
        assert_eq!(extract.reward_points, None);
        assert_eq!(extract.each_spending.as_deref(), Some("1"));
    }

    #[test]
    fn dash_spending_is_captured_verbatim() {
        let extract = parse_reward_description("1 point for every RM- spent");
        assert_eq!(extract.reward_points.as_deref(), Some("1"));
        assert_eq!(extract.each_spending.as_deref(), Some("-"));
    }

    #[test]
    fn grouped_digits_are_captured_whole() {
        let extract = parse_reward_description("10,000 points for every RM1,000 spent");
        assert_eq!(extract.reward_points.as_deref(), Some("10,000"));
        assert_eq!(extract.each_spending.as_deref(), Some("1,000"));
    }

    #[test]
    fn benchmark_range_and_flags() {
        let extract = parse_benchmark("spend from RM2,000 up to RM5,000 monthly");
        assert_eq!(extract.from.as_deref(), Some("2,000"));
        assert_eq!(extract.till.as_deref(), Some("5,000"));
        assert!(extract.monthly_basis);
        assert!(!extract.weekends_only);
        assert!(!extract.single_receipt);
    }

    #[test]
    fn any_amount_forces_zero_lower_threshold() {
        let extract = parse_benchmark("any amount, up to RM500, monthly");
        assert_eq!(extract.from.as_deref(), Some("0"));
        assert_eq!(extract.till.as_deref(), Some("500"));
        assert!(extract.monthly_basis);
    }

    #[test]
    fn misses_yield_none_not_errors() {
        let extract = parse_benchmark("on weekends, single receipt");
        assert_eq!(extract.from, None);
        assert_eq!(extract.till, None);
        assert!(extract.weekends_only);
        assert!(extract.single_receipt);
    }
}
