#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tangible/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod universe;

// Re-export main types from sub-crates
pub use tangible_data as data;
pub use tangible_engine as engine;
pub use tangible_output as output;

// Re-export common universe types
pub use universe::{
    StaticTickers, TickerFile, TickerUniverse, Universe, UniverseSource, load_or_empty,
    sp500::Sp500Wikipedia,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
