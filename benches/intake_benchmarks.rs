//! Performance benchmarks for the Award Intake Engine.
//!
//! This benchmark suite covers the per-document hot path:
//! - Field normalization of a raw widget dump
//! - Full processing of an individual document
//! - Full processing of a five-page group document with 21 nominee slots
//! - A batch of 100 individual documents
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use award_intake::intake::{HeadlessResolver, SerialAllocator, SerialCounter, nominee_slots, process_document};
use award_intake::models::{FieldEntry, SourceDocument};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

fn allocator() -> SerialAllocator {
    SerialAllocator::new(SerialCounter::new(1, 1), "24")
}

fn entries(pairs: &[(&str, &str)]) -> Vec<FieldEntry> {
    pairs.iter().map(|(k, v)| FieldEntry::new(*k, *v)).collect()
}

/// Creates the pages of a two-page individual nomination.
fn individual_pages(nominee: &str) -> Vec<Vec<FieldEntry>> {
    vec![
        entries(&[
            ("Date Received", "03/01/2024"),
            ("Employee Name", nominee),
            ("Special Act or Service", "On"),
            ("Award Amount", "$250.00"),
            ("Time Off Hours", "4"),
            ("Org 1", "CCC-333 Field Operations"),
            ("Please Print", "Jane Smith"),
        ]),
        entries(&[
            ("Moderate", "On"),
            ("Limited", "On"),
            (
                "Value and Extent",
                "\"Automated the monthly reconciliation, saving the team two days each close.\"",
            ),
            ("Signature Date", "03/01/2024"),
        ]),
    ]
}

/// Creates the pages of a five-page group nomination with every slot filled.
fn group_pages() -> Vec<Vec<FieldEntry>> {
    let nominees: Vec<FieldEntry> = nominee_slots(5)
        .iter()
        .enumerate()
        .flat_map(|(i, slot)| {
            [
                FieldEntry::new(slot.name_key, format!("Nominee{} Person", i + 1)),
                FieldEntry::new(slot.money_key, "100"),
            ]
        })
        .collect();

    vec![
        entries(&[
            ("Date Received", "Today"),
            ("On the Spot", "On"),
            ("Org 1", "AAA-222"),
            ("Nominator's Name", "Jane Smith"),
        ]),
        nominees,
        entries(&[("Notes", "")]),
        entries(&[("Continuation", "")]),
        entries(&[
            ("High", "On"),
            ("General", "On"),
            ("Describe the value and extent", "Kept the lab running through the outage."),
        ]),
    ]
}

/// Benchmark: Normalizing a raw widget dump into a document.
fn bench_normalize(c: &mut Criterion) {
    let pages = group_pages();

    c.bench_function("normalize_group_dump", |b| {
        b.iter(|| black_box(SourceDocument::from_pages("group.json", black_box(&pages))))
    });
}

/// Benchmark: Processing a single individual document.
fn bench_individual(c: &mut Criterion) {
    let document = SourceDocument::from_pages("nomination.json", &individual_pages("Dr. Ann B. Lee")).unwrap();
    let allocator = allocator();

    c.bench_function("individual_document", |b| {
        b.iter(|| {
            let mut resolver = HeadlessResolver;
            black_box(process_document(black_box(&document), &allocator, today(), &mut resolver))
        })
    });
}

/// Benchmark: Processing a group document with 21 nominee slots.
fn bench_group(c: &mut Criterion) {
    let document = SourceDocument::from_pages("group.json", &group_pages()).unwrap();
    let allocator = allocator();

    c.bench_function("group_document_21_slots", |b| {
        b.iter(|| {
            let mut resolver = HeadlessResolver;
            black_box(process_document(black_box(&document), &allocator, today(), &mut resolver))
        })
    });
}

/// Benchmark: Batch of 100 individual documents, from raw dump to result.
fn bench_batch_100(c: &mut Criterion) {
    let dumps: Vec<Vec<Vec<FieldEntry>>> = (0..100)
        .map(|i| individual_pages(&format!("Nominee{} Person", i)))
        .collect();
    let allocator = allocator();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.iter(|| {
            let mut resolver = HeadlessResolver;
            let results: Vec<_> = dumps
                .iter()
                .map(|pages| {
                    SourceDocument::from_pages("nomination.json", pages)
                        .and_then(|document| process_document(&document, &allocator, today(), &mut resolver))
                })
                .collect();
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_individual,
    bench_group,
    bench_batch_100
);
criterion_main!(benches);
