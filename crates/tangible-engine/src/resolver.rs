//! Field resolution from raw provider records to canonical financials.

use crate::fields::Concept;
use crate::tangible::CanonicalFinancials;
use std::collections::HashMap;
use tangible_data::RawPeriodRecord;

/// Maps canonical concepts to priority-ordered provider field names.
///
/// Lookups walk the candidate list in order and return the first field that
/// carries a value, so precedence stays deterministic when several naming
/// variants coexist in one record.
#[derive(Debug, Clone)]
pub struct FieldResolver {
    candidates: HashMap<Concept, Vec<String>>,
}

impl FieldResolver {
    /// Create a resolver with the standard candidate lists.
    pub fn new() -> Self {
        let candidates = Concept::all()
            .into_iter()
            .map(|concept| {
                let names = concept
                    .default_candidates()
                    .iter()
                    .map(|name| (*name).to_string())
                    .collect();
                (concept, names)
            })
            .collect();

        Self { candidates }
    }

    /// Replace the candidate list for one concept.
    #[must_use]
    pub fn with_candidates<I, S>(mut self, concept: Concept, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates
            .insert(concept, names.into_iter().map(Into::into).collect());
        self
    }

    /// Candidate field names for a concept, in priority order.
    pub fn candidates(&self, concept: Concept) -> &[String] {
        self.candidates.get(&concept).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First present value among the concept's candidates.
    pub fn lookup(&self, record: &RawPeriodRecord, concept: Concept) -> Option<f64> {
        self.candidates(concept)
            .iter()
            .find_map(|field| record.get(field))
    }

    /// Intangible assets excluding goodwill.
    ///
    /// When a combined goodwill-and-intangibles value is present, the result
    /// is `combined - goodwill`, and unresolved if goodwill is. Otherwise a
    /// generic intangibles value larger than goodwill has goodwill removed;
    /// any other generic value is taken as reported.
    pub fn other_intangible_assets(
        &self,
        record: &RawPeriodRecord,
        goodwill: Option<f64>,
    ) -> Option<f64> {
        if let Some(combined) = self.lookup(record, Concept::GoodwillAndOtherIntangibles) {
            return goodwill.map(|goodwill| combined - goodwill);
        }

        let intangibles = self.lookup(record, Concept::IntangibleAssets)?;
        match goodwill {
            Some(goodwill) if intangibles > goodwill => Some(intangibles - goodwill),
            _ => Some(intangibles),
        }
    }

    /// Resolve all canonical fields for one period.
    pub fn resolve(&self, record: &RawPeriodRecord) -> CanonicalFinancials {
        let goodwill = self.lookup(record, Concept::Goodwill);
        let other_intangible_assets = self.other_intangible_assets(record, goodwill);
        let total_equity = self.lookup(record, Concept::TotalEquity);

        CanonicalFinancials::new(goodwill, other_intangible_assets, total_equity)
    }
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(fields: &[(&str, f64)]) -> CanonicalFinancials {
        let record: RawPeriodRecord = fields.iter().copied().collect();
        FieldResolver::new().resolve(&record)
    }

    #[test]
    fn test_generic_path_kept_when_not_above_goodwill() {
        let financials = resolve(&[
            ("Goodwill", 100.0),
            ("Other Intangible Assets", 40.0),
            ("Total Equity Gross Minority Interest", 500.0),
        ]);

        assert_eq!(financials.total_equity, Some(500.0));
        assert_eq!(financials.goodwill, Some(100.0));
        assert_eq!(financials.other_intangible_assets, Some(40.0));
        assert_eq!(financials.tangible_book_value, Some(360.0));
    }

    #[test]
    fn test_combined_path_subtracts_goodwill() {
        let financials = resolve(&[
            ("GoodwillAndOtherIntangibleAssets", 150.0),
            ("Goodwill", 100.0),
            ("StockholdersEquity", 600.0),
        ]);

        assert_eq!(financials.other_intangible_assets, Some(50.0));
        assert_eq!(financials.tangible_book_value, Some(450.0));
    }

    #[test]
    fn test_combined_path_wins_over_generic() {
        let financials = resolve(&[
            ("GoodwillAndOtherIntangibleAssets", 150.0),
            ("Goodwill", 100.0),
            ("IntangibleAssets", 900.0),
        ]);
        assert_eq!(financials.other_intangible_assets, Some(50.0));
    }

    #[test]
    fn test_combined_without_goodwill_is_unresolved() {
        let financials = resolve(&[
            ("GoodwillAndOtherIntangibleAssets", 150.0),
            ("IntangibleAssets", 30.0),
            ("StockholdersEquity", 600.0),
        ]);

        assert_eq!(financials.goodwill, None);
        assert_eq!(financials.other_intangible_assets, None);
        assert_eq!(financials.tangible_book_value, Some(600.0));
    }

    #[test]
    fn test_generic_above_goodwill_has_goodwill_removed() {
        let financials = resolve(&[("Goodwill", 100.0), ("IntangibleAssets", 250.0)]);
        assert_eq!(financials.other_intangible_assets, Some(150.0));
    }

    #[test]
    fn test_generic_equal_to_goodwill_is_kept() {
        let financials = resolve(&[("Goodwill", 100.0), ("IntangibleAssets", 100.0)]);
        assert_eq!(financials.other_intangible_assets, Some(100.0));
    }

    #[test]
    fn test_generic_without_goodwill_is_kept() {
        let financials = resolve(&[("IntangibleAssetsNetExcludingGoodwill", 75.0)]);
        assert_eq!(financials.goodwill, None);
        assert_eq!(financials.other_intangible_assets, Some(75.0));
    }

    #[test]
    fn test_intangible_candidates_first_match_wins() {
        let financials = resolve(&[
            ("OtherNonCurrentAssets", 999.0),
            ("Intangible Assets", 20.0),
            ("OtherIntangibleAssets", 30.0),
        ]);
        assert_eq!(financials.other_intangible_assets, Some(20.0));
    }

    #[test]
    fn test_empty_candidate_is_skipped() {
        let mut record = RawPeriodRecord::new().with("IntangibleAssets", 20.0);
        record.insert("Other Intangible Assets", None);

        let financials = FieldResolver::new().resolve(&record);
        assert_eq!(financials.other_intangible_assets, Some(20.0));
    }

    #[test]
    fn test_equity_priority() {
        let financials = resolve(&[
            ("TotalStockholdersEquity", 1.0),
            ("StockholdersEquity", 2.0),
            ("TotalEquityGrossMinorityInterest", 3.0),
        ]);
        assert_eq!(financials.total_equity, Some(3.0));
    }

    #[test]
    fn test_zero_equity_is_resolved() {
        let financials = resolve(&[
            ("TotalEquityGrossMinorityInterest", 0.0),
            ("StockholdersEquity", 10.0),
        ]);
        assert_eq!(financials.total_equity, Some(0.0));
        assert_eq!(financials.tangible_book_value, Some(0.0));
    }

    #[test]
    fn test_nothing_resolvable() {
        let financials = resolve(&[("TotalAssets", 1_000.0)]);
        assert_eq!(financials, CanonicalFinancials::default());
    }

    #[test]
    fn test_missing_equity_leaves_tbv_unresolved() {
        let financials = resolve(&[("Goodwill", 10.0), ("IntangibleAssets", 5.0)]);
        assert_eq!(financials.goodwill, Some(10.0));
        assert_eq!(financials.other_intangible_assets, Some(5.0));
        assert_eq!(financials.tangible_book_value, None);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let record: RawPeriodRecord = [
            ("Goodwill", 12.5),
            ("OtherIntangibleAssets", 3.0),
            ("StockholdersEquity", 80.0),
        ]
        .into_iter()
        .collect();
        let resolver = FieldResolver::new();

        assert_eq!(resolver.resolve(&record), resolver.resolve(&record));
    }

    #[test]
    fn test_custom_candidates() {
        let resolver =
            FieldResolver::new().with_candidates(Concept::TotalEquity, ["CommonStockEquity"]);
        let record = RawPeriodRecord::new()
            .with("CommonStockEquity", 42.0)
            .with("StockholdersEquity", 7.0);

        assert_eq!(resolver.candidates(Concept::TotalEquity), ["CommonStockEquity"]);
        assert_eq!(resolver.resolve(&record).total_equity, Some(42.0));
    }
}
