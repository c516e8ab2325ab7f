//! Per-comment featurization latency
//!
//! Run with: cargo bench -p sentinela-lexicon

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sentinela_lexicon::Featurizer;

fn benchmark_featurize(c: &mut Criterion) {
    let featurizer = Featurizer::spanish().expect("Failed to build lexicon");

    let test_cases = vec![
        ("courtesy", "Gracias!!"),
        ("short_positive", "Excelente universidad 😍"),
        ("short_negative", "Pésimo servicio, nunca responden 😡"),
        ("question", "¿Cuál es el horario de atención de la biblioteca?"),
        (
            "long_mixed",
            "A pesar de todo, siempre San Marcos ❤️ aunque la cola para la matrícula \
             fue de tres horas 😂 y nadie sabía nada, no está mal pero podría mejorar",
        ),
    ];

    let mut group = c.benchmark_group("Featurizer");
    group.sample_size(100);

    for (name, text) in test_cases {
        group.bench_with_input(BenchmarkId::new("featurize", name), &text, |b, text| {
            b.iter(|| featurizer.featurize(black_box(text)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_featurize);
criterion_main!(benches);
