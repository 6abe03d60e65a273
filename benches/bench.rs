//! Criterion benchmarks for analysis and field value conversion.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use analyzed_string::analysis::analyzer::{Analyzer, StandardAnalyzer};
use analyzed_string::analysis::analyze_multi_term;
use analyzed_string::document::Document;
use analyzed_string::schema::IndexSchema;
use std::hint::black_box;

const SCHEMA: &str = r#"{
    "field_types": [
        { "name": "lowercase_text", "class": "text",
          "analyzer": { "tokenizer": { "type": "whole" },
                        "filters": [ { "type": "strip" }, { "type": "lowercase" } ] } },
        { "name": "normalized", "class": "analyzed_string",
          "args": { "fieldType": "lowercase_text" } }
    ],
    "fields": [ { "name": "title_exact", "type": "normalized" } ]
}"#;

/// Generate distinct mixed-case values.
fn generate_values(count: usize) -> Vec<String> {
    let words = [
        "Search", "ENGINE", "Field", "Term", "Analyzer", "Schema", "Token", "Filter",
    ];
    (0..count)
        .map(|i| format!("{} {} {i}", words[i % words.len()], words[(i / 3) % words.len()]))
        .collect()
}

fn bench_analysis(c: &mut Criterion) {
    let analyzer = StandardAnalyzer::new().unwrap();
    let text = generate_values(50).join(" ");

    let mut group = c.benchmark_group("analysis");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("standard_analyzer", |b| {
        b.iter(|| analyzer.analyze(black_box(&text)).unwrap().count())
    });
    group.bench_function("multi_term", |b| {
        b.iter(|| analyze_multi_term("f", black_box("Search"), &analyzer).unwrap())
    });
    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let schema = IndexSchema::from_json_str(SCHEMA).unwrap();
    let values = generate_values(1000);
    let docs: Vec<Document> = values
        .iter()
        .map(|v| Document::new().with_field("title_exact", v.clone()))
        .collect();

    let mut group = c.benchmark_group("conversion");
    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("create_field", |b| {
        b.iter(|| {
            for value in &values {
                black_box(schema.create_field("title_exact", value).unwrap());
            }
        })
    });
    group.bench_function("convert_documents_parallel", |b| {
        b.iter(|| black_box(schema.convert_documents(&docs)))
    });
    group.finish();
}

criterion_group!(benches, bench_analysis, bench_conversion);
criterion_main!(benches);
