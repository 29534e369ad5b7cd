//! Performance benchmarks for the report merge
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mammo_report_mcp::merge;
use mammo_report_mcp::report::{
    Assessment, Birads, BreastDensity, Comparison, Confidence, Density, Exam, ExamLaterality,
    Finding, FindingLaterality, Recommendation, StructuredExtraction,
};

fn sample_extraction(index: usize) -> StructuredExtraction {
    let laterality = if index % 2 == 0 {
        ExamLaterality::Left
    } else {
        ExamLaterality::Right
    };

    StructuredExtraction {
        summary: format!("Report {}: stable findings.", index % 4),
        birads: Birads {
            value: Some((index % 6) as u8),
            confidence: Confidence::Medium,
            evidence: vec![format!("BI-RADS {}", index % 6)],
        },
        breast_density: Density {
            value: Some(BreastDensity::B),
            evidence: vec!["scattered fibroglandular densities".to_string()],
        },
        exam: Exam {
            exam_type: Some("diagnostic mammogram".to_string()),
            laterality: Some(laterality),
            evidence: vec![],
        },
        comparison: Comparison {
            prior_exam_date: Some(format!("20{:02}-0{}-15", 10 + index % 10, 1 + index % 9)),
            evidence: vec![],
        },
        findings: (0..5)
            .map(|f| Finding {
                laterality: FindingLaterality::Left,
                location: Some(format!("clock position {}", f + 1)),
                description: format!("finding {}", (index + f) % 8),
                assessment: Assessment::ProbablyBenign,
                evidence: vec![format!("finding {} noted", f)],
            })
            .collect(),
        recommendations: vec![Recommendation {
            action: "short-interval follow-up".to_string(),
            timeframe: Some("6 months".to_string()),
            evidence: vec![],
        }],
        red_flags: vec![format!("flag {}", index % 3)],
    }
}

/// Benchmark merging batches of different sizes
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for size in [2usize, 10, 50] {
        let batch: Vec<StructuredExtraction> = (0..size).map(sample_extraction).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| merge(black_box(batch)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark parsing model output before merging
fn bench_parse(c: &mut Criterion) {
    let json = serde_json::to_string(&sample_extraction(3)).unwrap();

    c.bench_function("parse_extraction", |b| {
        b.iter(|| StructuredExtraction::from_json(black_box(&json)).unwrap());
    });
}

criterion_group!(benches, bench_merge, bench_parse);
criterion_main!(benches);
