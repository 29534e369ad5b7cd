//! Merge per-document extractions into one report
//!
//! Each field has its own reducer. A reducer starts from an empty
//! accumulator, absorbs the documents in order, and is finished into the
//! merged value. Evidence lists are unioned in first-seen order, so merging a
//! report with itself gives the same report back.

use super::types::{
    Birads, BreastDensity, Comparison, Confidence, Density, Exam, ExamLaterality, Finding,
    MergedReport, PriorDateBasis, Recommendation, StructuredExtraction,
};
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::HashSet;

/// Prefix for each summary line when several documents contribute one
pub const SUMMARY_BULLET: &str = "- ";

/// Merge a batch of validated extractions
///
/// Fails on an empty batch, or when any extraction violates a value
/// constraint. The error names the offending index.
pub fn merge(extractions: &[StructuredExtraction]) -> Result<MergedReport> {
    if extractions.is_empty() {
        return Err(Error::EmptyMerge);
    }

    for (index, extraction) in extractions.iter().enumerate() {
        extraction
            .validate()
            .map_err(|reason| Error::InvalidExtraction { index, reason })?;
    }

    let report = extractions
        .iter()
        .fold(Accumulator::default(), Accumulator::absorb)
        .finish(extractions.len());

    tracing::debug!(
        documents = report.document_count,
        findings = report.extraction.findings.len(),
        recommendations = report.extraction.recommendations.len(),
        "Merged extractions"
    );

    Ok(report)
}

/// Ordered set of trimmed, non-empty strings
#[derive(Debug, Clone, Default)]
pub struct EvidenceSet {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl EvidenceSet {
    pub fn absorb<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            let item = item.as_ref().trim();
            if !item.is_empty() && self.seen.insert(item.to_string()) {
                self.items.push(item.to_string());
            }
        }
        self
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

fn normalize_evidence(evidence: &[String]) -> Vec<String> {
    EvidenceSet::default().absorb(evidence).into_vec()
}

/// Keep the greater of two optional ranked values
pub fn max_option<T: Ord>(acc: Option<T>, next: Option<T>) -> Option<T> {
    match (acc, next) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Distinct non-blank summaries in input order
#[derive(Debug, Default)]
struct Summaries(Vec<String>);

impl Summaries {
    fn absorb(mut self, summary: &str) -> Self {
        if !summary.trim().is_empty() && !self.0.iter().any(|s| s == summary) {
            self.0.push(summary.to_string());
        }
        self
    }

    /// A lone summary is kept verbatim; several become a bulleted list
    fn finish(mut self) -> String {
        if self.0.len() == 1 {
            return self.0.remove(0);
        }
        self.0
            .iter()
            .map(|summary| format!("{}{}", SUMMARY_BULLET, summary))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Tracks which sides any document reported
#[derive(Debug, Default)]
pub struct LateralityVotes {
    left: bool,
    right: bool,
    bilateral: bool,
}

impl LateralityVotes {
    pub fn absorb(mut self, laterality: Option<ExamLaterality>) -> Self {
        match laterality {
            Some(ExamLaterality::Left) => self.left = true,
            Some(ExamLaterality::Right) => self.right = true,
            Some(ExamLaterality::Bilateral) => self.bilateral = true,
            None => {}
        }
        self
    }

    /// Bilateral if any document said so or both sides appear, else the single side seen
    pub fn finish(self) -> Option<ExamLaterality> {
        match (self.bilateral, self.left, self.right) {
            (true, _, _) | (false, true, true) => Some(ExamLaterality::Bilateral),
            (false, true, false) => Some(ExamLaterality::Left),
            (false, false, true) => Some(ExamLaterality::Right),
            (false, false, false) => None,
        }
    }
}

/// Parse the date forms reports commonly carry
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY.MM.DD`,
/// `YYYY-MM-DDTHH:MM:SS`, US-style `MM/DD/YYYY` and `MM/DD/YY`, `YYYY-MM` and
/// bare `YYYY`. Two-digit years pivot at 70: `00`-`69` are 20xx, `70`-`99` are 19xx.
/// Partial dates resolve to the first day of the period.
pub fn parse_exam_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    // chrono's %Y takes any digit count; only four-digit leading years are year-first
    let year_first = |sep: char| raw.split(sep).next().is_some_and(|year| year.len() == 4);

    if year_first('-') {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(timestamp.date());
        }
    }

    for (sep, format) in [('-', "%Y-%m-%d"), ('/', "%Y/%m/%d"), ('.', "%Y.%m.%d")] {
        if year_first(sep) {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return Some(date);
            }
        }
    }

    if let Some((_, year)) = raw.rsplit_once('/') {
        let format = match year.len() {
            4 => "%m/%d/%Y",
            2 => "%m/%d/%y",
            _ => return None,
        };
        return NaiveDate::parse_from_str(raw, format).ok();
    }

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match raw.split_once('-') {
        Some((year, month)) if year.len() == 4 && digits(year) && digits(month) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        None if raw.len() == 4 && digits(raw) => NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1),
        _ => None,
    }
}

/// Picks the most recent parseable prior exam date
#[derive(Debug, Default)]
pub struct PriorDateVotes {
    latest: Option<(NaiveDate, String)>,
    first_raw: Option<String>,
}

impl PriorDateVotes {
    pub fn absorb(mut self, raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return self;
        };

        if self.first_raw.is_none() {
            self.first_raw = Some(raw.to_string());
        }

        if let Some(date) = parse_exam_date(raw) {
            let newer = match &self.latest {
                Some((current, _)) => date > *current,
                None => true,
            };
            if newer {
                self.latest = Some((date, raw.to_string()));
            }
        }
        self
    }

    /// The chosen value, verbatim, and how it was chosen
    pub fn finish(self) -> (Option<String>, Option<PriorDateBasis>) {
        match (self.latest, self.first_raw) {
            (Some((_, raw)), _) => (Some(raw), Some(PriorDateBasis::MostRecent)),
            (None, Some(raw)) => {
                tracing::debug!(value = %raw, "No prior exam date parsed, keeping first value");
                (Some(raw), Some(PriorDateBasis::FirstUnparsed))
            }
            (None, None) => (None, None),
        }
    }
}

/// Structurally distinct items in first-seen order
#[derive(Debug)]
struct Distinct<T>(Vec<T>);

impl<T> Default for Distinct<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: PartialEq> Distinct<T> {
    fn absorb(mut self, items: impl IntoIterator<Item = T>) -> Self {
        for item in items {
            if !self.0.contains(&item) {
                self.0.push(item);
            }
        }
        self
    }
}

fn normalize_finding(finding: &Finding) -> Finding {
    Finding {
        evidence: normalize_evidence(&finding.evidence),
        ..finding.clone()
    }
}

fn normalize_recommendation(recommendation: &Recommendation) -> Recommendation {
    Recommendation {
        evidence: normalize_evidence(&recommendation.evidence),
        ..recommendation.clone()
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    summaries: Summaries,
    birads_value: Option<u8>,
    birads_confidence: Option<Confidence>,
    birads_evidence: EvidenceSet,
    density_value: Option<BreastDensity>,
    density_evidence: EvidenceSet,
    exam_type: Option<String>,
    exam_laterality: LateralityVotes,
    exam_evidence: EvidenceSet,
    prior_date: PriorDateVotes,
    comparison_evidence: EvidenceSet,
    findings: Distinct<Finding>,
    recommendations: Distinct<Recommendation>,
    red_flags: EvidenceSet,
}

impl Accumulator {
    fn absorb(self, next: &StructuredExtraction) -> Self {
        let exam_type = self.exam_type.or_else(|| {
            next.exam
                .exam_type
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        });

        Self {
            summaries: self.summaries.absorb(&next.summary),
            birads_value: max_option(self.birads_value, next.birads.value),
            birads_confidence: max_option(self.birads_confidence, Some(next.birads.confidence)),
            birads_evidence: self.birads_evidence.absorb(&next.birads.evidence),
            density_value: max_option(self.density_value, next.breast_density.value),
            density_evidence: self.density_evidence.absorb(&next.breast_density.evidence),
            exam_type,
            exam_laterality: self.exam_laterality.absorb(next.exam.laterality),
            exam_evidence: self.exam_evidence.absorb(&next.exam.evidence),
            prior_date: self
                .prior_date
                .absorb(next.comparison.prior_exam_date.as_deref()),
            comparison_evidence: self.comparison_evidence.absorb(&next.comparison.evidence),
            findings: self
                .findings
                .absorb(next.findings.iter().map(normalize_finding)),
            recommendations: self
                .recommendations
                .absorb(next.recommendations.iter().map(normalize_recommendation)),
            red_flags: self.red_flags.absorb(&next.red_flags),
        }
    }

    fn finish(self, document_count: usize) -> MergedReport {
        let (prior_exam_date, basis) = self.prior_date.finish();

        let extraction = StructuredExtraction {
            summary: self.summaries.finish(),
            birads: Birads {
                value: self.birads_value,
                confidence: self.birads_confidence.unwrap_or_default(),
                evidence: self.birads_evidence.into_vec(),
            },
            breast_density: Density {
                value: self.density_value,
                evidence: self.density_evidence.into_vec(),
            },
            exam: Exam {
                exam_type: self.exam_type,
                laterality: self.exam_laterality.finish(),
                evidence: self.exam_evidence.into_vec(),
            },
            comparison: Comparison {
                prior_exam_date,
                evidence: self.comparison_evidence.into_vec(),
            },
            findings: self.findings.0,
            recommendations: self.recommendations.0,
            red_flags: self.red_flags.into_vec(),
        };

        MergedReport {
            document_count,
            prior_exam_date_basis: basis,
            extraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::{Assessment, FindingLaterality};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn with_birads(value: Option<u8>, confidence: Confidence, evidence: &[&str]) -> StructuredExtraction {
        StructuredExtraction {
            birads: Birads {
                value,
                confidence,
                evidence: evidence.iter().map(|s| s.to_string()).collect(),
            },
            ..StructuredExtraction::default()
        }
    }

    fn with_laterality(laterality: Option<ExamLaterality>) -> StructuredExtraction {
        StructuredExtraction {
            exam: Exam {
                laterality,
                ..Exam::default()
            },
            ..StructuredExtraction::default()
        }
    }

    fn with_prior_date(date: Option<&str>) -> StructuredExtraction {
        StructuredExtraction {
            comparison: Comparison {
                prior_exam_date: date.map(str::to_string),
                evidence: Vec::new(),
            },
            ..StructuredExtraction::default()
        }
    }

    fn finding(description: &str, evidence: &[&str]) -> Finding {
        Finding {
            laterality: FindingLaterality::Left,
            location: Some("upper outer quadrant".to_string()),
            description: description.to_string(),
            assessment: Assessment::Benign,
            evidence: evidence.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn full_report() -> StructuredExtraction {
        StructuredExtraction {
            summary: "Stable benign calcifications.".to_string(),
            birads: Birads {
                value: Some(2),
                confidence: Confidence::Medium,
                evidence: vec!["BI-RADS 2".to_string()],
            },
            breast_density: Density {
                value: Some(BreastDensity::C),
                evidence: vec!["heterogeneously dense".to_string()],
            },
            exam: Exam {
                exam_type: Some("diagnostic mammogram".to_string()),
                laterality: Some(ExamLaterality::Left),
                evidence: vec!["LEFT DIAGNOSTIC MAMMOGRAM".to_string()],
            },
            comparison: Comparison {
                prior_exam_date: Some("2022-03-01".to_string()),
                evidence: vec!["Compared with 2022-03-01".to_string()],
            },
            findings: vec![finding("coarse calcifications", &["coarse calcifications"])],
            recommendations: vec![Recommendation {
                action: "annual screening".to_string(),
                timeframe: Some("12 months".to_string()),
                evidence: vec![],
            }],
            red_flags: vec!["palpable lump reported".to_string()],
        }
    }

    #[test]
    fn test_birads_takes_max_and_unions_evidence() {
        let merged = merge(&[
            with_birads(Some(2), Confidence::Medium, &["BI-RADS 2"]),
            with_birads(Some(4), Confidence::High, &["BI-RADS 4"]),
        ])
        .unwrap();

        let birads = merged.extraction.birads;
        assert_eq!(birads.value, Some(4));
        assert_eq!(birads.confidence, Confidence::High);
        assert_eq!(birads.evidence, vec!["BI-RADS 2", "BI-RADS 4"]);
    }

    #[test]
    fn test_birads_null_does_not_lower_value() {
        let merged = merge(&[
            with_birads(None, Confidence::Low, &[]),
            with_birads(Some(3), Confidence::Low, &[]),
            with_birads(None, Confidence::Low, &[]),
        ])
        .unwrap();
        assert_eq!(merged.extraction.birads.value, Some(3));
    }

    #[rstest]
    #[case(&[Some(ExamLaterality::Left), Some(ExamLaterality::Right)], Some(ExamLaterality::Bilateral))]
    #[case(&[Some(ExamLaterality::Left), Some(ExamLaterality::Left)], Some(ExamLaterality::Left))]
    #[case(&[None, Some(ExamLaterality::Right)], Some(ExamLaterality::Right))]
    #[case(&[Some(ExamLaterality::Right), Some(ExamLaterality::Bilateral)], Some(ExamLaterality::Bilateral))]
    #[case(&[None, None], None)]
    fn test_laterality_votes(
        #[case] inputs: &[Option<ExamLaterality>],
        #[case] expected: Option<ExamLaterality>,
    ) {
        let extractions: Vec<_> = inputs.iter().copied().map(with_laterality).collect();
        let merged = merge(&extractions).unwrap();
        assert_eq!(merged.extraction.exam.laterality, expected);
    }

    #[test]
    fn test_density_takes_densest() {
        let mut a = StructuredExtraction::default();
        a.breast_density.value = Some(BreastDensity::D);
        let mut b = StructuredExtraction::default();
        b.breast_density.value = Some(BreastDensity::B);
        let merged = merge(&[a, b]).unwrap();
        assert_eq!(merged.extraction.breast_density.value, Some(BreastDensity::D));
    }

    #[test]
    fn test_exam_type_first_non_blank() {
        let mut a = StructuredExtraction::default();
        a.exam.exam_type = Some("   ".to_string());
        let mut b = StructuredExtraction::default();
        b.exam.exam_type = Some("screening mammogram".to_string());
        let mut c = StructuredExtraction::default();
        c.exam.exam_type = Some("ultrasound".to_string());
        let merged = merge(&[a, b, c]).unwrap();
        assert_eq!(
            merged.extraction.exam.exam_type.as_deref(),
            Some("screening mammogram")
        );
    }

    #[test]
    fn test_summaries_distinct_and_ordered() {
        let summaries = ["First report.", "", "Second report.", "First report."];
        let extractions: Vec<_> = summaries
            .iter()
            .map(|s| StructuredExtraction {
                summary: s.to_string(),
                ..StructuredExtraction::default()
            })
            .collect();
        let merged = merge(&extractions).unwrap();
        assert_eq!(
            merged.extraction.summary,
            "- First report.\n- Second report."
        );
    }

    #[test]
    fn test_prior_date_most_recent() {
        let merged = merge(&[
            with_prior_date(Some("2021-06-15")),
            with_prior_date(Some("03/02/2023")),
            with_prior_date(Some("2022")),
        ])
        .unwrap();
        assert_eq!(
            merged.extraction.comparison.prior_exam_date.as_deref(),
            Some("03/02/2023")
        );
        assert_eq!(merged.prior_exam_date_basis, Some(PriorDateBasis::MostRecent));
    }

    #[test]
    fn test_prior_date_ignores_unparseable_when_any_parse() {
        let merged = merge(&[
            with_prior_date(Some("last spring")),
            with_prior_date(Some("2020-01-10")),
        ])
        .unwrap();
        assert_eq!(
            merged.extraction.comparison.prior_exam_date.as_deref(),
            Some("2020-01-10")
        );
    }

    #[test]
    fn test_prior_date_falls_back_to_first_value() {
        let merged = merge(&[
            with_prior_date(None),
            with_prior_date(Some("last spring")),
            with_prior_date(Some("prior study")),
        ])
        .unwrap();
        assert_eq!(
            merged.extraction.comparison.prior_exam_date.as_deref(),
            Some("last spring")
        );
        assert_eq!(merged.prior_exam_date_basis, Some(PriorDateBasis::FirstUnparsed));
    }

    #[test]
    fn test_prior_date_short_year_compares_by_century() {
        let merged = merge(&[
            with_prior_date(Some("01/15/23")),
            with_prior_date(Some("2019-05-01")),
        ])
        .unwrap();
        assert_eq!(
            merged.extraction.comparison.prior_exam_date.as_deref(),
            Some("01/15/23")
        );
        assert_eq!(merged.prior_exam_date_basis, Some(PriorDateBasis::MostRecent));
    }

    #[test]
    fn test_prior_date_absent() {
        let merged = merge(&[with_prior_date(None)]).unwrap();
        assert_eq!(merged.extraction.comparison.prior_exam_date, None);
        assert_eq!(merged.prior_exam_date_basis, None);
    }

    #[rstest]
    #[case("2023-05-04", Some((2023, 5, 4)))]
    #[case("2023/05/04", Some((2023, 5, 4)))]
    #[case("2023.05.04", Some((2023, 5, 4)))]
    #[case("05/04/2023", Some((2023, 5, 4)))]
    #[case("2023-05-04T10:30:00Z", Some((2023, 5, 4)))]
    #[case("2023-05-04T10:30:00", Some((2023, 5, 4)))]
    #[case("2023-05", Some((2023, 5, 1)))]
    #[case("2023", Some((2023, 1, 1)))]
    #[case(" 2023-05-04 ", Some((2023, 5, 4)))]
    #[case("01/15/23", Some((2023, 1, 15)))]
    #[case("12/11/10", Some((2010, 12, 11)))]
    #[case("03/04/95", Some((1995, 3, 4)))]
    #[case("1/2/3", None)]
    #[case("23-01-15", None)]
    #[case("05/04/023", None)]
    #[case("May 2023", None)]
    #[case("2023-13", None)]
    #[case("", None)]
    fn test_parse_exam_date(#[case] raw: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(parse_exam_date(raw), expected);
    }

    #[test]
    fn test_findings_dedupe_after_evidence_normalization() {
        let mut a = StructuredExtraction::default();
        a.findings = vec![finding("mass", &["irregular mass", " irregular mass "])];
        let mut b = StructuredExtraction::default();
        b.findings = vec![
            finding("mass", &["irregular mass"]),
            finding("calcifications", &[]),
        ];

        let merged = merge(&[a, b]).unwrap();
        assert_eq!(
            merged.extraction.findings,
            vec![
                finding("mass", &["irregular mass"]),
                finding("calcifications", &[]),
            ]
        );
    }

    #[test]
    fn test_findings_differing_in_any_field_are_kept() {
        let mut a = StructuredExtraction::default();
        a.findings = vec![finding("mass", &[])];
        let mut b = StructuredExtraction::default();
        let mut right = finding("mass", &[]);
        right.laterality = FindingLaterality::Right;
        b.findings = vec![right];

        let merged = merge(&[a, b]).unwrap();
        assert_eq!(merged.extraction.findings.len(), 2);
    }

    #[test]
    fn test_red_flags_union() {
        let mut a = StructuredExtraction::default();
        a.red_flags = vec!["new mass".to_string(), "".to_string()];
        let mut b = StructuredExtraction::default();
        b.red_flags = vec!["skin thickening".to_string(), "new mass".to_string()];

        let merged = merge(&[a, b]).unwrap();
        assert_eq!(merged.extraction.red_flags, vec!["new mass", "skin thickening"]);
    }

    #[test]
    fn test_single_input_round_trips() {
        let report = full_report();
        let merged = merge(std::slice::from_ref(&report)).unwrap();
        assert_eq!(merged.document_count, 1);
        assert_eq!(merged.extraction, report);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let report = full_report();
        let merged = merge(&[report.clone(), report.clone()]).unwrap();
        assert_eq!(merged.extraction, report);
        assert_eq!(merged.document_count, 2);
    }

    #[test]
    fn test_scalar_fields_commute() {
        let a = full_report();
        let mut b = with_birads(Some(5), Confidence::Low, &["BI-RADS 5"]);
        b.breast_density.value = Some(BreastDensity::A);
        b.exam.laterality = Some(ExamLaterality::Right);
        b.comparison.prior_exam_date = Some("2024-01-01".to_string());

        let ab = merge(&[a.clone(), b.clone()]).unwrap().extraction;
        let ba = merge(&[b, a]).unwrap().extraction;

        assert_eq!(ab.birads.value, ba.birads.value);
        assert_eq!(ab.birads.confidence, ba.birads.confidence);
        assert_eq!(ab.breast_density.value, ba.breast_density.value);
        assert_eq!(ab.exam.laterality, ba.exam.laterality);
        assert_eq!(ab.comparison.prior_exam_date, ba.comparison.prior_exam_date);

        fn as_set(v: &[String]) -> HashSet<String> {
            v.iter().cloned().collect()
        }
        assert_eq!(as_set(&ab.birads.evidence), as_set(&ba.birads.evidence));
        assert_eq!(as_set(&ab.red_flags), as_set(&ba.red_flags));
    }

    #[test]
    fn test_merged_evidence_contains_all_inputs() {
        let a = full_report();
        let mut b = full_report();
        b.exam.evidence = vec!["RIGHT MAMMOGRAM".to_string()];
        b.breast_density.evidence = vec!["extremely dense".to_string()];

        let merged = merge(&[a.clone(), b.clone()]).unwrap().extraction;
        for input in [&a, &b] {
            for item in &input.exam.evidence {
                assert!(merged.exam.evidence.contains(item));
            }
            for item in &input.breast_density.evidence {
                assert!(merged.breast_density.evidence.contains(item));
            }
        }
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert!(matches!(merge(&[]), Err(Error::EmptyMerge)));
    }

    #[test]
    fn test_invalid_extraction_names_index() {
        let result = merge(&[
            with_birads(Some(2), Confidence::Low, &[]),
            with_birads(Some(9), Confidence::Low, &[]),
        ]);
        match result {
            Err(Error::InvalidExtraction { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_evidence_set_trims_and_dedupes() {
        let set = EvidenceSet::default()
            .absorb(["a", " a", "", "b "])
            .absorb(vec!["c".to_string(), "b".to_string()]);
        assert_eq!(set.into_vec(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_max_option() {
        assert_eq!(max_option(None, Some(1)), Some(1));
        assert_eq!(max_option(Some(3), None), Some(3));
        assert_eq!(max_option(Some(3), Some(5)), Some(5));
        assert_eq!(max_option::<u8>(None, None), None);
    }
}
