use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use conneg::{select_best_variant, Language, MediaType, PreferenceReader, Variant};

const EXTENSIONS: [&str; 6] = ["html", "txt", "json", "xml", "png", "pdf"];
const LANGUAGES: [&str; 5] = ["en", "fr", "de", "ja", "zh"];

fn variants(count: usize) -> Vec<Variant> {
    (0..count)
        .map(|i| {
            let name = format!(
                "page.{}.{}",
                EXTENSIONS[i % EXTENSIONS.len()],
                LANGUAGES[i % LANGUAGES.len()]
            );
            Variant::from_file_name(&name).unwrap()
        })
        .collect()
}

fn select_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_best_variant");

    let accept = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
    let media = PreferenceReader::new(accept).read_media_types().unwrap();
    let languages = PreferenceReader::new("fr-CH, fr;q=0.9, en;q=0.8, *;q=0.1")
        .read_languages()
        .unwrap();

    for size in [1, 10, 100, 1000].iter() {
        let variants = variants(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &variants, |b, variants| {
            b.iter(|| {
                let _ = select_best_variant(
                    black_box(variants),
                    black_box(&media),
                    black_box(&languages),
                );
            });
        });
    }

    group.finish();
}

fn not_acceptable_benchmark(c: &mut Criterion) {
    let variants: Vec<Variant> = LANGUAGES
        .iter()
        .map(|tag| Variant::with_language(MediaType::new("text", "html"), Language::new(*tag)))
        .collect();
    let media = PreferenceReader::new("application/json").read_media_types().unwrap();
    let languages = PreferenceReader::new("ko").read_languages().unwrap();

    c.bench_function("select_not_acceptable", |b| {
        b.iter(|| {
            let _ = select_best_variant(
                black_box(&variants),
                black_box(&media),
                black_box(&languages),
            );
        });
    });
}

criterion_group!(benches, select_benchmark, not_acceptable_benchmark);
criterion_main!(benches);
