#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tangible/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod assembler;
pub mod config;
pub mod error;
pub mod fields;
pub mod industry;
pub mod market_value;
pub mod resolver;
pub mod scheduler;
pub mod tangible;
pub mod throttle;

pub use assembler::{AssembledCompany, CompanyOutcome, RecordAssembler};
pub use config::RunConfig;
pub use error::{ConfigError, FetchError};
pub use fields::Concept;
pub use industry::{
    DATA_COMPANY_MULTIPLIER, DATA_INDUSTRY_KEYWORDS, GENERIC_MULTIPLIER, IndustryClass,
    IndustryClassifier, IndustryProfile,
};
pub use market_value::{
    MAX_WINDOW_DAYS, MarketValueEstimator, PriceWindow, market_value, normalize_report_date,
};
pub use resolver::FieldResolver;
pub use scheduler::{RunReport, Scheduler};
pub use tangible::{CanonicalFinancials, tangible_book_value};
pub use throttle::{FixedDelay, NoThrottle, Throttle, TokenBucket};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
