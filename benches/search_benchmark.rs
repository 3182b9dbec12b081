use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use findex::core::engine::SearchEngine;
use findex::core::types::{DocumentId, DocumentStatus};
use findex::parallel::batch::process_queries;
use rand::Rng;

/// Helper to build an engine with `doc_count` random short documents.
fn build_engine(doc_count: i32) -> SearchEngine {
    let words = [
        "cat", "dog", "bird", "fish", "curly", "fluffy", "big", "small", "city", "town", "park",
        "collar", "tail", "fancy", "white", "black",
    ];
    let mut rng = rand::thread_rng();
    let mut engine = SearchEngine::with_stop_words_text("in the and").unwrap();

    for id in 0..doc_count {
        let text: String = (0..8)
            .map(|_| words[rng.gen_range(0..words.len())])
            .collect::<Vec<_>>()
            .join(" ");
        let ratings: Vec<i32> = (0..3).map(|_| rng.gen_range(-10..10)).collect();
        engine
            .add_document(DocumentId(id), &text, DocumentStatus::Actual, &ratings)
            .unwrap();
    }

    engine
}

fn bench_find_top(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_top");

    for doc_count in [100, 1_000, 10_000] {
        let engine = build_engine(doc_count);

        group.bench_with_input(
            BenchmarkId::new("sequential", doc_count),
            &engine,
            |b, engine| {
                b.iter(|| engine.find_top_documents(black_box("curly cat -fancy dog")).unwrap());
            },
        );
        group.bench_with_input(
            BenchmarkId::new("parallel", doc_count),
            &engine,
            |b, engine| {
                b.iter(|| {
                    engine
                        .find_top_documents_par(black_box("curly cat -fancy dog"))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_process_queries(c: &mut Criterion) {
    let engine = build_engine(5_000);
    let queries: Vec<String> = [
        "curly cat",
        "big dog -collar",
        "white bird city",
        "fluffy tail",
        "fish park -town",
    ]
    .iter()
    .map(|q| q.to_string())
    .collect();

    c.bench_function("process_queries_5x5000", |b| {
        b.iter(|| process_queries(&engine, black_box(&queries)).unwrap());
    });
}

fn bench_add_document(c: &mut Criterion) {
    c.bench_function("add_document", |b| {
        let mut engine = SearchEngine::new();
        let mut id = 0;
        b.iter(|| {
            engine
                .add_document(
                    DocumentId(id),
                    "curly cat with a fancy collar",
                    DocumentStatus::Actual,
                    &[1, 2, 3],
                )
                .unwrap();
            id += 1;
        });
    });
}

criterion_group!(
    benches,
    bench_find_top,
    bench_process_queries,
    bench_add_document
);
criterion_main!(benches);
