//! Criterion comparison of the two footer representations: the baseline Thrift
//! footer as written by the library, and the trimmed re-encoding with redundant
//! fields stripped. Datasets are synthesized once per column count; the benchmark
//! loop covers only the decode.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use metabench_eval::config::BenchConfig;
use metabench_eval::footer;
use metabench_eval::synth::TempDataset;

fn bench_footer_decode(criterion: &mut Criterion) {
  for column_count in [1000, 3000] {
    let config = BenchConfig {
      column_count,
      row_count: 1000,
      ..BenchConfig::default()
    };
    let (dataset, _) = TempDataset::create(&config).unwrap();
    let data = std::fs::read(dataset.path()).unwrap();

    let baseline = footer::extract_footer(&data).unwrap().to_vec();
    let trimmed =
      footer::encode(&footer::trim(footer::decode(&baseline).unwrap())).unwrap();

    let group_name = format!("Footer decode, {column_count} columns");
    let mut group = criterion.benchmark_group(group_name);
    group.bench_function(BenchmarkId::new("Baseline", baseline.len()), |b| {
      b.iter(|| footer::decode(&baseline).unwrap())
    });
    group.bench_function(BenchmarkId::new("Trimmed", trimmed.len()), |b| {
      b.iter(|| footer::decode(&trimmed).unwrap())
    });
    group.finish();
  }
}

criterion_group!(benches, bench_footer_decode);
criterion_main!(benches);
