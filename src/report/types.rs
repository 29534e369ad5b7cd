//! Structured mammography report extraction
//!
//! Field names follow the JSON contract the language model is constrained to
//! (camelCase, nullable scalars, evidence arrays of quoted report text).

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Highest BI-RADS category
pub const BIRADS_MAX: u8 = 6;

/// Confidence in the BI-RADS assignment. Ordered low < medium < high.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    Low,
    Medium,
    High,
}

/// ACR breast density category. Ordered A < B < C < D.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum BreastDensity {
    A,
    B,
    C,
    D,
}

/// Side(s) an exam covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExamLaterality {
    Left,
    Right,
    Bilateral,
}

/// Side(s) a finding applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FindingLaterality {
    Left,
    Right,
    Bilateral,
    Unknown,
}

/// Radiologist's assessment of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Benign,
    ProbablyBenign,
    Suspicious,
    HighlySuggestiveMalignancy,
    Incomplete,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Birads {
    /// BI-RADS category, 0-6
    #[schemars(range(min = 0, max = 6))]
    pub value: Option<u8>,
    pub confidence: Confidence,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Density {
    pub value: Option<BreastDensity>,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Exam {
    /// Exam type as written in the report, e.g. "screening mammogram"
    #[serde(rename = "type")]
    pub exam_type: Option<String>,
    pub laterality: Option<ExamLaterality>,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Date of the prior exam, as written (ISO-like preferred)
    pub prior_exam_date: Option<String>,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub laterality: FindingLaterality,
    pub location: Option<String>,
    pub description: String,
    pub assessment: Assessment,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    pub action: String,
    pub timeframe: Option<String>,
    #[serde(default)]
    pub evidence: Vec<String>,
}

/// One document's structured extraction, as returned by the language model
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StructuredExtraction {
    #[serde(default)]
    pub summary: String,
    pub birads: Birads,
    pub breast_density: Density,
    pub exam: Exam,
    pub comparison: Comparison,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub red_flags: Vec<String>,
}

impl StructuredExtraction {
    /// Check the constraints the type system does not already enforce
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(value) = self.birads.value {
            if value > BIRADS_MAX {
                return Err(format!(
                    "birads.value {} is outside 0-{}",
                    value, BIRADS_MAX
                ));
            }
        }
        Ok(())
    }

    /// Parse and validate one extraction from the model's JSON output
    pub fn from_json(json: &str) -> Result<Self> {
        let extraction: Self = serde_json::from_str(json)?;
        extraction
            .validate()
            .map_err(|reason| Error::ExtractionSchema { reason })?;
        Ok(extraction)
    }
}

/// How the merged `comparison.priorExamDate` was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PriorDateBasis {
    /// Latest of the values that parse as dates
    MostRecent,
    /// No value parsed as a date; the first one present was kept verbatim
    FirstUnparsed,
}

/// Merge output for a batch of documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MergedReport {
    /// Number of extractions that were merged
    pub document_count: usize,
    pub prior_exam_date_basis: Option<PriorDateBasis>,
    pub extraction: StructuredExtraction,
}
