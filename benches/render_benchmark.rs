//! Benchmarks for docpress rendering and conversion.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic documents built in memory.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docpress::model::{Paragraph, Table, TextRun};
use docpress::{
    convert_document, generate_excerpt, render_content, slugify, ConvertOptions, Document,
    StructuralElement,
};

/// Creates a document with `sections` headings, each followed by styled
/// paragraphs and a small table.
fn create_test_document(sections: usize) -> Document {
    let mut doc = Document::new("Benchmark document");
    doc.add_element(StructuralElement::paragraph("Catégories: Bench, Rust\n"));
    doc.add_element(StructuralElement::paragraph("Tags: perf\n"));

    for i in 0..sections {
        doc.add_element(StructuralElement::heading(format!("Section {}\n", i), 2));

        for j in 0..5 {
            let mut p = Paragraph::new();
            p.add_run(TextRun::new(format!("Paragraph {} of section {} with ", j, i)));
            p.add_run(TextRun::bold("bold text"));
            p.add_run(TextRun::new(" and "));
            p.add_run(TextRun::link("a link", "https://example.com"));
            p.add_run(TextRun::new(".\n"));
            doc.add_element(p);
        }

        doc.add_element(Table::from_rows(vec![
            vec!["Name", "Value"],
            vec!["alpha", "1"],
            vec!["beta", "2"],
        ]));
    }

    doc
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_content");

    for sections in [1, 10, 100] {
        let doc = create_test_document(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &doc, |b, doc| {
            b.iter(|| render_content(black_box(doc.elements())))
        });
    }

    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_document");
    let options = ConvertOptions::default();

    for sections in [1, 10, 100] {
        let doc = create_test_document(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &doc, |b, doc| {
            b.iter(|| convert_document(black_box(doc), &options))
        });
    }

    group.finish();
}

fn bench_text_helpers(c: &mut Criterion) {
    let markdown = render_content(create_test_document(20).elements());

    c.bench_function("generate_excerpt", |b| {
        b.iter(|| generate_excerpt(black_box(&markdown), 160))
    });

    c.bench_function("slugify", |b| {
        b.iter(|| slugify(black_box("L'été à Montréal: 10 idées de sorties")))
    });
}

criterion_group!(benches, bench_render, bench_convert, bench_text_helpers);
criterion_main!(benches);
