//! Per-company record assembly.
//!
//! Each company moves through profile lookup, balance-sheet lookup and a
//! period loop. A failed profile or balance-sheet fetch skips the company; a
//! failed price fetch only leaves that period's market cap unresolved.

use crate::error::FetchError;
use crate::industry::{IndustryClassifier, IndustryProfile};
use crate::market_value::{MarketValueEstimator, normalize_report_date};
use crate::resolver::FieldResolver;
use crate::tangible::CanonicalFinancials;
use chrono::Datelike;
use tangible_data::{BalanceSheetPeriod, CompanyProfile, DataError, MarketDataProvider};
use tangible_output::OutputRow;
use tracing::{debug, warn};

/// Rows and recovered failures for one company.
#[derive(Debug)]
pub struct AssembledCompany {
    /// Ticker as given by the universe
    pub symbol: String,
    /// Company-level classification shared by every row
    pub industry: IndustryProfile,
    /// Canonical figures per period, aligned with `rows`
    pub financials: Vec<CanonicalFinancials>,
    /// One row per balance-sheet period, in provider order
    pub rows: Vec<OutputRow>,
    /// Periods whose price history could not be fetched
    pub price_failures: Vec<FetchError>,
}

/// Result of assembling one company.
#[derive(Debug)]
pub enum CompanyOutcome {
    /// At least one period was turned into a row
    Assembled(AssembledCompany),
    /// The provider returned a balance sheet without periods
    EmptyBalanceSheet,
    /// Profile or balance sheet could not be fetched
    Skipped(FetchError),
}

impl CompanyOutcome {
    /// Rows produced, empty unless assembled.
    pub fn rows(&self) -> &[OutputRow] {
        match self {
            Self::Assembled(company) => &company.rows,
            Self::EmptyBalanceSheet | Self::Skipped(_) => &[],
        }
    }
}

/// Turns one company's provider data into output rows.
pub struct RecordAssembler<'a> {
    provider: &'a dyn MarketDataProvider,
    resolver: FieldResolver,
    estimator: MarketValueEstimator,
    classifier: IndustryClassifier,
}

impl<'a> RecordAssembler<'a> {
    /// Create an assembler with the default resolver, estimator and classifier.
    pub fn new(provider: &'a dyn MarketDataProvider) -> Self {
        Self {
            provider,
            resolver: FieldResolver::new(),
            estimator: MarketValueEstimator::default(),
            classifier: IndustryClassifier::new(),
        }
    }

    /// Replace the field resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: FieldResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the market value estimator.
    #[must_use]
    pub const fn with_estimator(mut self, estimator: MarketValueEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Field resolver in use.
    pub const fn resolver(&self) -> &FieldResolver {
        &self.resolver
    }

    /// Assemble every period of one company.
    pub async fn assemble(&self, symbol: &str) -> CompanyOutcome {
        let profile = match self.provider.profile(symbol).await {
            Ok(profile) => profile,
            Err(source) => return Self::skip(symbol, source),
        };
        let industry = self.classifier.profile(&profile);

        let balance_sheet = match self.provider.balance_sheet(symbol).await {
            Ok(sheet) => sheet,
            Err(source) => return Self::skip(symbol, source),
        };
        if balance_sheet.is_empty() {
            debug!(symbol, "Empty balance sheet");
            return CompanyOutcome::EmptyBalanceSheet;
        }

        let mut company = AssembledCompany {
            symbol: symbol.to_string(),
            industry,
            financials: Vec::with_capacity(balance_sheet.len()),
            rows: Vec::with_capacity(balance_sheet.len()),
            price_failures: Vec::new(),
        };

        for period in &balance_sheet.periods {
            let market_cap = match self.market_cap(symbol, &profile, period).await {
                Ok(value) => value,
                Err(err) => {
                    warn!(symbol, error = %err, "Market cap unresolved");
                    company.price_failures.push(err);
                    None
                }
            };
            let financials = self.resolver.resolve(&period.record);
            let row = Self::row(
                symbol,
                &profile,
                &company.industry,
                period,
                financials,
                market_cap,
            );
            company.rows.push(row);
            company.financials.push(financials);
        }

        debug!(
            symbol,
            periods = company.rows.len(),
            failed_windows = company.price_failures.len(),
            "Assembled company"
        );
        CompanyOutcome::Assembled(company)
    }

    fn skip(symbol: &str, source: DataError) -> CompanyOutcome {
        let err = FetchError::Company {
            symbol: symbol.to_string(),
            source,
        };
        warn!(symbol, error = %err, "Skipping company");
        CompanyOutcome::Skipped(err)
    }

    /// Historical market cap for one period.
    ///
    /// Without a share count or a representable window the estimate is
    /// unresolved, and no price history is requested.
    async fn market_cap(
        &self,
        symbol: &str,
        profile: &CompanyProfile,
        period: &BalanceSheetPeriod,
    ) -> Result<Option<f64>, FetchError> {
        let Some(shares) = profile.shares_outstanding else {
            return Ok(None);
        };
        let Some(window) = self.estimator.window(period.report_date) else {
            warn!(symbol, report_date = %period.report_date, "Price window out of calendar range");
            return Ok(None);
        };

        let prices = self
            .provider
            .price_history(symbol, window.start, window.end)
            .await
            .map_err(|source| FetchError::PeriodPrice {
                symbol: symbol.to_string(),
                report_date: window.report_date,
                source,
            })?;

        Ok(self.estimator.estimate(&prices, &window, Some(shares)))
    }

    fn row(
        symbol: &str,
        profile: &CompanyProfile,
        industry: &IndustryProfile,
        period: &BalanceSheetPeriod,
        financials: CanonicalFinancials,
        market_cap: Option<f64>,
    ) -> OutputRow {
        OutputRow {
            ticker: symbol.to_string(),
            company_name: profile.long_name.clone(),
            industry: industry.industry.clone(),
            sector: industry.sector.clone(),
            year: normalize_report_date(period.report_date).year(),
            market_cap,
            tangible_book_value: financials.tangible_book_value,
            goodwill: financials.goodwill,
            other_intangible_assets: financials.other_intangible_assets,
            multiplier: industry.multiplier,
        }
    }
}

impl std::fmt::Debug for RecordAssembler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordAssembler")
            .field("resolver", &self.resolver)
            .field("estimator", &self.estimator)
            .finish_non_exhaustive()
    }
}
