// src/error.rs
use thiserror::Error;

/// Fatal transformation errors. A value of this type aborts the whole batch;
/// nothing downstream may persist a partial result.
///
/// Pattern misses are not errors — they surface as `None` fields and are
/// resolved by the defaulting rules in `process::coerce`.
#[derive(Error, Debug)]
pub enum BenefitError {
    #[error("malformed {field} mapping for {bank}/{card_name}: {detail}")]
    MalformedCategoryMapping {
        bank: String,
        card_name: String,
        field: &'static str,
        detail: String,
    },

    #[error(
        "cannot coerce {field}={text:?} to a number for {bank}/{card_name} category {category:?}"
    )]
    NumericCoercion {
        field: &'static str,
        bank: String,
        card_name: String,
        category: String,
        text: String,
    },
}

pub type Result<T> = std::result::Result<T, BenefitError>;
