//! Footer representation comparison.
//!
//! The footer of a Parquet file is a Thrift compact-protocol message. A sizable
//! share of it repeats information that is recoverable elsewhere: deprecated
//! min/max statistics duplicates, per-chunk key/value metadata, page encoding
//! stats, and column paths that follow from schema order. This module extracts the
//! raw footer bytes, decodes them through the Thrift protocol, produces a trimmed
//! re-encoding with those fields stripped, and times the decode of both
//! representations against each other.

use anyhow::{ensure, Context, Result};
use metabench_core::timing::{self, Timed};
use parquet::format::{ColumnChunk, FileMetaData};
use parquet::thrift::TSerializable;
use thrift::protocol::{TCompactInputProtocol, TCompactOutputProtocol};

const FOOTER_TAIL_LEN: usize = 8;
const MAGIC: &[u8; 4] = b"PAR1";

/// Borrow the raw Thrift-encoded footer out of a complete file image.
pub fn extract_footer(data: &[u8]) -> Result<&[u8]> {
  ensure!(data.len() >= FOOTER_TAIL_LEN, "file too small for a footer");
  let tail = &data[data.len() - FOOTER_TAIL_LEN..];
  ensure!(&tail[4..] == MAGIC, "file is missing the footer magic");

  let metadata_len = u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]) as usize;
  ensure!(
    data.len() >= FOOTER_TAIL_LEN + metadata_len,
    "footer length {metadata_len} exceeds the file"
  );
  Ok(&data[data.len() - FOOTER_TAIL_LEN - metadata_len..data.len() - FOOTER_TAIL_LEN])
}

/// Decode a raw footer through the Thrift compact protocol.
pub fn decode(footer: &[u8]) -> Result<FileMetaData> {
  let mut protocol = TCompactInputProtocol::new(footer);
  FileMetaData::read_from_in_protocol(&mut protocol).context("decoding thrift footer")
}

/// Re-encode metadata through the Thrift compact protocol.
pub fn encode(metadata: &FileMetaData) -> Result<Vec<u8>> {
  let mut buffer = Vec::new();
  {
    let mut protocol = TCompactOutputProtocol::new(&mut buffer);
    metadata
      .write_to_out_protocol(&mut protocol)
      .context("encoding thrift footer")?;
  }
  Ok(buffer)
}

/// Strip the fields whose content is redundant with the rest of the footer.
///
/// The schema itself and everything needed to locate and decode pages survives;
/// the trimmed message still parses with the unmodified decoder.
pub fn trim(mut metadata: FileMetaData) -> FileMetaData {
  for row_group in &mut metadata.row_groups {
    for column in &mut row_group.columns {
      trim_column(column);
    }
  }
  metadata
}

fn trim_column(column: &mut ColumnChunk) {
  if let Some(meta) = column.meta_data.as_mut() {
    meta.path_in_schema.clear();
    meta.key_value_metadata = None;
    meta.encoding_stats = None;
    if let Some(stats) = meta.statistics.as_mut() {
      // deprecated duplicates of min_value/max_value
      stats.min = None;
      stats.max = None;
    }
  }
}

/// Sizes and single-shot decode times of the two footer representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterComparison {
  pub baseline_size_bytes: u64,
  pub trimmed_size_bytes: u64,
  pub baseline_decode_time_us: u64,
  pub trimmed_decode_time_us: u64,
  pub reencode_time_us: u64,
}

/// Run the whole comparison over one file image.
pub fn compare(file_image: &[u8]) -> Result<FooterComparison> {
  let baseline = extract_footer(file_image)?;

  let Timed {
    value: metadata,
    elapsed_us: baseline_decode_time_us,
  } = timing::try_time(|| decode(baseline))?;

  let trimmed_metadata = trim(metadata);
  let reencode = timing::try_time(|| encode(&trimmed_metadata))?;
  let trimmed_decode = timing::try_time(|| decode(&reencode.value))?;

  Ok(FooterComparison {
    baseline_size_bytes: baseline.len() as u64,
    trimmed_size_bytes: reencode.value.len() as u64,
    baseline_decode_time_us,
    trimmed_decode_time_us: trimmed_decode.elapsed_us,
    reencode_time_us: reencode.elapsed_us,
  })
}
