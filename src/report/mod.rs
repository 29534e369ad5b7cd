//! Structured report types and the multi-document merge

mod merge;
pub mod types;

pub use merge::{max_option, merge, parse_exam_date, EvidenceSet, SUMMARY_BULLET};
pub use types::{
    Assessment, Birads, BreastDensity, Comparison, Confidence, Density, Exam, ExamLaterality,
    Finding, FindingLaterality, MergedReport, PriorDateBasis, Recommendation,
    StructuredExtraction, BIRADS_MAX,
};
