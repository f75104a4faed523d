//! Industry classification into valuation multipliers.

use serde::{Deserialize, Serialize};
use tangible_data::CompanyProfile;

/// Multiplier for data and financial-infrastructure companies.
pub const DATA_COMPANY_MULTIPLIER: f64 = 0.45;

/// Multiplier for every other company.
pub const GENERIC_MULTIPLIER: f64 = 0.1625;

/// Lower-case substrings that mark a data or financial-infrastructure industry.
pub const DATA_INDUSTRY_KEYWORDS: [&str; 10] = [
    "financial data",
    "stock exchanges",
    "data solutions",
    "research and consulting",
    "investment and capital markets",
    "banking technology",
    "information technology services",
    "credit services",
    "internet content & information",
    "information",
];

/// Industry class driving the multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndustryClass {
    /// Data or financial-infrastructure company
    Data,
    /// Any other company
    Generic,
}

impl IndustryClass {
    /// Multiplier for this class.
    pub const fn multiplier(&self) -> f64 {
        match self {
            Self::Data => DATA_COMPANY_MULTIPLIER,
            Self::Generic => GENERIC_MULTIPLIER,
        }
    }
}

/// Company-level labels and their classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryProfile {
    /// Industry label as reported, empty when absent
    pub industry: String,
    /// Sector label as reported, empty when absent
    pub sector: String,
    /// Derived class
    pub class: IndustryClass,
    /// Multiplier for every period of the company
    pub multiplier: f64,
}

/// Substring classifier over a fixed keyword set.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndustryClassifier;

impl IndustryClassifier {
    /// Create a classifier.
    pub const fn new() -> Self {
        Self
    }

    /// Classify a free-text industry label. Absent labels are generic.
    pub fn classify(&self, industry: Option<&str>) -> IndustryClass {
        let label = industry.unwrap_or_default().to_lowercase();
        if DATA_INDUSTRY_KEYWORDS
            .iter()
            .any(|keyword| label.contains(keyword))
        {
            IndustryClass::Data
        } else {
            IndustryClass::Generic
        }
    }

    /// Multiplier for a free-text industry label.
    pub fn multiplier(&self, industry: Option<&str>) -> f64 {
        self.classify(industry).multiplier()
    }

    /// Build the industry profile of a company.
    pub fn profile(&self, company: &CompanyProfile) -> IndustryProfile {
        let class = self.classify(company.industry.as_deref());
        IndustryProfile {
            industry: company.industry.clone().unwrap_or_default(),
            sector: company.sector.clone().unwrap_or_default(),
            class,
            multiplier: class.multiplier(),
        }
    }
}
