use canteen_core::dataset::parse_jsonl;
use canteen_core::keyword::KeywordIndex;
use canteen_core::natural::natural_sorted;
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_natural_sort(c: &mut Criterion) {
    let labels: Vec<String> = (0..500).rev().map(|i| format!("Canteen {i} Block {}", i % 7)).collect();
    c.bench_function("natural_sort_500", |b| b.iter(|| natural_sorted(labels.clone())));
}

fn bench_keyword_search(c: &mut Criterion) {
    let text = include_str!("../../data/canteens.jsonl");
    let data = parse_jsonl(text).expect("bundled dataset parses");
    let index = KeywordIndex::build(&data);
    c.bench_function("keyword_search_chinese", |b| b.iter(|| index.search("chinese")));
    c.bench_function("keyword_suggest_typo", |b| b.iter(|| index.suggest("chineese", 0.5)));
}

criterion_group!(benches, bench_natural_sort, bench_keyword_search);
criterion_main!(benches);
