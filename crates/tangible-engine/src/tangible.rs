//! Tangible book value and the canonical per-period financials.

use serde::{Deserialize, Serialize};

/// Canonical balance-sheet figures for one fiscal period.
///
/// Every field is either a resolved number or `None`; nothing is defaulted
/// to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFinancials {
    /// Goodwill
    pub goodwill: Option<f64>,
    /// Intangible assets excluding goodwill
    pub other_intangible_assets: Option<f64>,
    /// Total shareholders' equity
    pub total_equity: Option<f64>,
    /// Total equity less goodwill and other intangibles
    pub tangible_book_value: Option<f64>,
}

impl CanonicalFinancials {
    /// Assemble canonical financials, deriving tangible book value.
    pub fn new(
        goodwill: Option<f64>,
        other_intangible_assets: Option<f64>,
        total_equity: Option<f64>,
    ) -> Self {
        Self {
            goodwill,
            other_intangible_assets,
            total_equity,
            tangible_book_value: tangible_book_value(
                total_equity,
                goodwill,
                other_intangible_assets,
            ),
        }
    }
}

/// Total equity less goodwill and other intangibles.
///
/// Returns `None` when equity is unresolved. An unresolved goodwill or
/// other-intangibles term is skipped rather than subtracted as zero.
pub fn tangible_book_value(
    total_equity: Option<f64>,
    goodwill: Option<f64>,
    other_intangible_assets: Option<f64>,
) -> Option<f64> {
    let mut value = total_equity?;
    if let Some(goodwill) = goodwill {
        value -= goodwill;
    }
    if let Some(other) = other_intangible_assets {
        value -= other;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_subtraction() {
        assert_eq!(tangible_book_value(Some(500.0), Some(100.0), Some(40.0)), Some(360.0));
    }

    #[test]
    fn test_unresolved_equity_is_unresolved() {
        assert_eq!(tangible_book_value(None, Some(100.0), Some(40.0)), None);
        assert_eq!(tangible_book_value(None, None, None), None);
    }

    #[test]
    fn test_unresolved_terms_are_skipped() {
        assert_eq!(tangible_book_value(Some(500.0), None, Some(40.0)), Some(460.0));
        assert_eq!(tangible_book_value(Some(500.0), Some(100.0), None), Some(400.0));
        assert_eq!(tangible_book_value(Some(500.0), None, None), Some(500.0));
    }

    #[test]
    fn test_negative_result_is_kept() {
        assert_eq!(tangible_book_value(Some(50.0), Some(100.0), Some(40.0)), Some(-90.0));
    }

    #[test]
    fn test_canonical_financials_derives_tbv() {
        let financials = CanonicalFinancials::new(Some(100.0), Some(50.0), Some(600.0));
        assert_eq!(financials.tangible_book_value, Some(450.0));

        let financials = CanonicalFinancials::new(Some(100.0), Some(50.0), None);
        assert_eq!(financials.tangible_book_value, None);
    }
}
