//! Provider field names for the canonical balance-sheet concepts.
//!
//! The same line item shows up under different names depending on the
//! provider, the API version and sometimes the period. Candidate lists are
//! priority-ordered: the first name with a value wins.

/// Goodwill, looked up directly.
pub const GOODWILL: &str = "Goodwill";

/// Combined goodwill and other intangibles.
pub const GOODWILL_AND_OTHER_INTANGIBLES: &str = "GoodwillAndOtherIntangibleAssets";

/// Generic intangible-asset candidates, most specific first.
pub const INTANGIBLE_ASSETS: [&str; 7] = [
    "Other Intangible Assets",
    "Other_Intangible_Assets",
    "Intangible Assets",
    "IntangibleAssets",
    "IntangibleAssetsNetExcludingGoodwill",
    "OtherIntangibleAssets",
    "OtherNonCurrentAssets",
];

/// Total equity candidates, in priority order.
pub const TOTAL_EQUITY: [&str; 4] = [
    "Total Equity Gross Minority Interest",
    "TotalEquityGrossMinorityInterest",
    "StockholdersEquity",
    "TotalStockholdersEquity",
];

/// Canonical concepts the resolver looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Concept {
    /// Goodwill
    Goodwill,
    /// Combined goodwill and other intangibles
    GoodwillAndOtherIntangibles,
    /// Intangible assets under any generic name
    IntangibleAssets,
    /// Total shareholders' equity
    TotalEquity,
}

impl Concept {
    /// All concepts.
    pub const fn all() -> [Self; 4] {
        [
            Self::Goodwill,
            Self::GoodwillAndOtherIntangibles,
            Self::IntangibleAssets,
            Self::TotalEquity,
        ]
    }

    /// Default candidate field names, in priority order.
    pub const fn default_candidates(&self) -> &'static [&'static str] {
        match self {
            Self::Goodwill => &[GOODWILL],
            Self::GoodwillAndOtherIntangibles => &[GOODWILL_AND_OTHER_INTANGIBLES],
            Self::IntangibleAssets => &INTANGIBLE_ASSETS,
            Self::TotalEquity => &TOTAL_EQUITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order_is_fixed() {
        assert_eq!(INTANGIBLE_ASSETS[0], "Other Intangible Assets");
        assert_eq!(INTANGIBLE_ASSETS[6], "OtherNonCurrentAssets");
        assert_eq!(TOTAL_EQUITY[0], "Total Equity Gross Minority Interest");
        assert_eq!(TOTAL_EQUITY[3], "TotalStockholdersEquity");
    }

    #[test]
    fn test_every_concept_has_candidates() {
        for concept in Concept::all() {
            assert!(!concept.default_candidates().is_empty(), "{concept:?}");
        }
    }

    #[test]
    fn test_yahoo_request_matches_candidates() {
        use tangible_data::yahoo::BALANCE_SHEET_FIELDS;

        let candidates: Vec<&str> = Concept::all()
            .into_iter()
            .flat_map(|concept| concept.default_candidates().iter().copied())
            .collect();

        for name in candidates
            .iter()
            .filter(|name| !name.contains([' ', '_']))
        {
            assert!(BALANCE_SHEET_FIELDS.contains(name), "{name} is not requested");
        }
        for field in BALANCE_SHEET_FIELDS {
            assert!(candidates.contains(field), "{field} is never read");
        }
    }
}
