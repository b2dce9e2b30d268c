use metabench_core::table::{self, ResultTable};
use rstest::rstest;

use crate::config::{BenchConfig, Codec, StatsLevel};
use crate::footer;
use crate::record::{DataReadRecord, MetadataRecord, RowGroupRecord, SchemaRecord};
use crate::report;
use crate::stages;
use crate::synth::{self, TempDataset};

#[rstest]
#[case(1, 10)]
#[case(5, 100)]
#[case(10, 10_000)]
fn test_synthesizer_shape(#[case] column_count: usize, #[case] row_count: usize) {
  let config = BenchConfig {
    column_count,
    row_count,
    ..BenchConfig::default()
  };
  let (dataset, write) = TempDataset::create(&config).unwrap();
  assert_eq!(
    write.value,
    std::fs::metadata(dataset.path()).unwrap().len()
  );

  let data = stages::read_file_bytes(dataset.path()).unwrap();
  let metadata = stages::decode_metadata(&data).unwrap();
  let schema = stages::build_schema(&metadata.value).unwrap();
  assert_eq!(schema.value.fields().len(), column_count);

  let read = stages::read_full_sync(dataset.path()).unwrap();
  assert_eq!(read.value, row_count);
}

#[test]
fn test_synthesizer_is_deterministic() {
  let config = BenchConfig {
    column_count: 3,
    row_count: 256,
    ..BenchConfig::default()
  };
  assert_eq!(
    synth::build_batch(&config).unwrap(),
    synth::build_batch(&config).unwrap()
  );
}

#[test]
fn test_dataset_removed_with_guard() {
  let config = BenchConfig {
    column_count: 2,
    row_count: 16,
    ..BenchConfig::default()
  };
  let (dataset, _) = TempDataset::create(&config).unwrap();
  let path = dataset.path().to_path_buf();
  assert!(path.exists());
  drop(dataset);
  assert!(!path.exists());
}

#[rstest]
#[case(StatsLevel::None, 0)]
#[case(StatsLevel::Chunk, 4)]
#[case(StatsLevel::Page, 4)]
fn test_statistics_level_round_trip(#[case] stats_level: StatsLevel, #[case] expected: usize) {
  let config = BenchConfig {
    column_count: 4,
    row_count: 500,
    statistics_level: stats_level,
    ..BenchConfig::default()
  };
  let (dataset, _) = TempDataset::create(&config).unwrap();
  let data = stages::read_file_bytes(dataset.path()).unwrap();
  let metadata = stages::decode_metadata(&data).unwrap();

  let stats = stages::decode_statistics(&metadata.value);
  assert_eq!(stats.value.chunks_with_stats, expected);
}

#[test]
fn test_subset_schema_covers_requested_roots() {
  let config = BenchConfig {
    column_count: 10,
    row_count: 100,
    ..BenchConfig::default()
  };
  let (dataset, _) = TempDataset::create(&config).unwrap();
  let data = stages::read_file_bytes(dataset.path()).unwrap();
  let metadata = stages::decode_metadata(&data).unwrap();

  let schema = stages::build_schema_subset(&metadata.value, &[0, 2, 4]).unwrap();
  let names: Vec<&str> = schema
    .value
    .fields()
    .iter()
    .map(|field| field.name().as_str())
    .collect();
  assert_eq!(names, ["col_0", "col_2", "col_4"]);
}

#[test]
fn test_async_read_paths() {
  let config = BenchConfig {
    column_count: 4,
    row_count: 200,
    row_group_size: Some(50),
    ..BenchConfig::default()
  };
  let (dataset, _) = TempDataset::create(&config).unwrap();
  let runtime = tokio::runtime::Builder::new_current_thread()
    .build()
    .unwrap();

  let full = runtime.block_on(stages::read_full(dataset.path())).unwrap();
  assert_eq!(full.value, 200);

  let subset = runtime
    .block_on(stages::read_column_subset(dataset.path(), &[0, 3]))
    .unwrap();
  assert_eq!(subset.value, 200);

  // two of the four 50-row groups
  let groups = runtime
    .block_on(stages::read_row_groups(dataset.path(), vec![0, 2]))
    .unwrap();
  assert_eq!(groups.value, 100);
}

#[test]
fn test_trimmed_footer_is_smaller_and_still_decodes() {
  let config = BenchConfig {
    column_count: 20,
    row_count: 500,
    ..BenchConfig::default()
  };
  let (dataset, _) = TempDataset::create(&config).unwrap();
  let data = std::fs::read(dataset.path()).unwrap();

  let baseline = footer::extract_footer(&data).unwrap();
  let decoded = footer::decode(baseline).unwrap();
  let trimmed = footer::encode(&footer::trim(decoded.clone())).unwrap();
  assert!(trimmed.len() < baseline.len());

  let reparsed = footer::decode(&trimmed).unwrap();
  assert_eq!(reparsed.schema.len(), decoded.schema.len());
  assert_eq!(reparsed.row_groups.len(), decoded.row_groups.len());
  assert_eq!(reparsed.num_rows, decoded.num_rows);
}

#[test]
fn test_footer_comparison_is_consistent() {
  let config = BenchConfig {
    column_count: 20,
    row_count: 500,
    ..BenchConfig::default()
  };
  let (dataset, _) = TempDataset::create(&config).unwrap();
  let data = std::fs::read(dataset.path()).unwrap();

  let comparison = footer::compare(&data).unwrap();
  let baseline = footer::extract_footer(&data).unwrap();
  assert_eq!(comparison.baseline_size_bytes, baseline.len() as u64);
  assert!(comparison.trimmed_size_bytes < comparison.baseline_size_bytes);
}

#[test]
fn test_extract_footer_rejects_garbage() {
  assert!(footer::extract_footer(b"PAR1").is_err());
  assert!(footer::extract_footer(b"this is not a parquet file").is_err());
}

fn metadata_record(
  num_columns: usize,
  stats_level: StatsLevel,
  total_us: u64,
  size_bytes: u64,
) -> MetadataRecord {
  MetadataRecord {
    num_columns,
    total_decode_time_us: total_us,
    thrift_decode_time_us: total_us / 2,
    schema_build_time_us: total_us / 2,
    size_bytes,
    stats_level,
  }
}

#[test]
fn test_metadata_series_group_by_stats_level() {
  let records = vec![
    metadata_record(10, StatsLevel::None, 1_000, 1024),
    metadata_record(100, StatsLevel::None, 4_000, 2048),
    metadata_record(10, StatsLevel::Page, 3_000, 4096),
    metadata_record(100, StatsLevel::Page, 9_000, 8192),
  ];

  let series = report::metadata_decode_series(&records);
  assert_eq!(series.len(), 2);
  assert_eq!(series[0].label, "stats none");
  assert_eq!(series[0].points, vec![(10.0, 1.0), (100.0, 4.0)]);
  assert_eq!(series[1].label, "stats page");
  assert_eq!(series[1].points, vec![(10.0, 3.0), (100.0, 9.0)]);
}

#[test]
fn test_series_builders_are_idempotent() {
  let records = vec![
    metadata_record(10, StatsLevel::Chunk, 1_500, 1024),
    metadata_record(1000, StatsLevel::Chunk, 80_000, 65536),
  ];
  assert_eq!(
    report::metadata_decode_series(&records),
    report::metadata_decode_series(&records)
  );
  assert_eq!(
    report::metadata_size_series(&records),
    report::metadata_size_series(&records)
  );
}

#[test]
fn test_data_read_melt_and_pivot() {
  let record = DataReadRecord {
    num_columns: 10,
    num_rows: 1000,
    metadata_decode_time_us: 1_000,
    full_read_time_us: 8_000,
    column_subset_read_time_us: 4_000,
    row_group_read_time_us: 2_000,
  };

  let melted = report::melt_data_read(&[record.clone()]);
  assert_eq!(melted.len(), 4);
  assert_eq!(melted[0], ("metadata decode".to_string(), 10, 1_000));

  let (categories, bars) = report::data_read_bars(&[record]);
  assert_eq!(categories, ["10"]);
  assert_eq!(bars.len(), 4);
  assert_eq!(bars[1].label, "full read");
  assert_eq!(bars[1].values, vec![8.0]);
}

#[test]
fn test_schema_bars_average_duplicate_cells() {
  let full = SchemaRecord {
    total_columns: 100,
    schema_columns: 100,
    total_time: 2_000,
    thrift_time: 1_000,
    schema_time: 1_000,
    is_subset: false,
  };
  let records = vec![
    full.clone(),
    SchemaRecord {
      schema_time: 3_000,
      ..full
    },
  ];

  let (categories, bars) = report::schema_bars(&records);
  assert_eq!(categories, ["100"]);
  assert_eq!(bars.len(), 1);
  assert_eq!(bars[0].label, "full schema");
  assert_eq!(bars[0].values, vec![2.0]);
}

#[test]
fn test_row_group_series_sorted_and_averaged() {
  let base = RowGroupRecord {
    num_columns: 10,
    num_rows: 10_000,
    row_group_size: 5000,
    page_size: 8 * 1024,
    stats_level: StatsLevel::None,
    write_time_us: 0,
    total_decode_time_us: 4_000,
    thrift_decode_time_us: 3_000,
    schema_build_time_us: 1_000,
    stats_decode_time_us: 0,
    file_size_bytes: 1024 * 1024,
  };
  let records = vec![
    RowGroupRecord {
      row_group_size: 10_000,
      total_decode_time_us: 2_000,
      ..base.clone()
    },
    base.clone(),
    RowGroupRecord {
      stats_level: StatsLevel::Page,
      total_decode_time_us: 8_000,
      ..base
    },
  ];

  let series = report::row_group_decode_series(&records);
  assert_eq!(series.len(), 1);
  assert_eq!(series[0].label, "8 KiB pages");
  // points sorted by row group size, the two 5000-row records averaged
  assert_eq!(series[0].points, vec![(5000.0, 6.0), (10_000.0, 2.0)]);
}

#[test]
fn test_record_tables_round_trip_enums_and_bools() {
  let dir = tempfile::tempdir().unwrap();

  let metadata_path = dir.path().join("metadata.csv");
  let mut metadata_table = ResultTable::new();
  metadata_table.push(metadata_record(10, StatsLevel::Page, 1_000, 2048));
  metadata_table.write_csv(&metadata_path).unwrap();
  let rows: Vec<MetadataRecord> = table::read_csv(&metadata_path).unwrap();
  assert_eq!(rows, vec![metadata_record(10, StatsLevel::Page, 1_000, 2048)]);

  let schema_path = dir.path().join("schema.csv");
  let record = SchemaRecord {
    total_columns: 10,
    schema_columns: 10,
    total_time: 42,
    thrift_time: 40,
    schema_time: 2,
    is_subset: true,
  };
  let mut schema_table = ResultTable::new();
  schema_table.push(record.clone());
  schema_table.write_csv(&schema_path).unwrap();
  let rows: Vec<SchemaRecord> = table::read_csv(&schema_path).unwrap();
  assert_eq!(rows, vec![record]);
}

#[test]
fn test_codec_labels() {
  assert_eq!(Codec::Uncompressed.to_string(), "uncompressed");
  assert_eq!(Codec::Zstd.to_string(), "zstd");
  assert_eq!(report::page_size_label(8 * 1024), "8 KiB pages");
  assert_eq!(report::page_size_label(8 * 1024 * 1024), "8 MiB pages");
}

#[test]
fn test_ensure_out_dir_is_idempotent() {
  let dir = tempfile::tempdir().unwrap();
  let nested = dir.path().join("charts").join("nested");
  report::ensure_out_dir(&nested).unwrap();
  report::ensure_out_dir(&nested).unwrap();
  assert!(nested.is_dir());
}
