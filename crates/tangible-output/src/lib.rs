#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tangible/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dataset;
pub mod export;
pub mod summary;

pub use dataset::{COLUMNS, Dataset, OutputRow};
pub use export::{
    DEFAULT_PREFIX, ExportError, ExportFormat, Exporter, persist, timestamped_filename,
};
pub use summary::RunSummary;
