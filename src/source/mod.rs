//! Record sources feeding the catalog pass.
//!
//! A source hands out fixed-size pages of raw rows by offset. `drain_pages`
//! owns the paging loop: it walks offsets in order, forwards every row to the
//! caller in delivery order, and stops at the first short page. Any page
//! error aborts the whole pass; there is no partial fallback.

pub mod bucket;
pub mod dump;

pub use bucket::{BucketClient, bucket_query};
pub use dump::DumpSource;

use crate::record::RawRecord;
use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Page size the bucket API serves at most.
pub const DEFAULT_PAGE_SIZE: usize = 500;

/// Supplier of raw rows, one page at a time.
pub trait RecordSource {
    /// Fetch up to `limit` rows starting at `offset`. A page shorter than
    /// `limit` means there is nothing after it.
    fn fetch_page(&mut self, offset: usize, limit: usize) -> Result<Vec<RawRecord>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagingSummary {
    pub pages: usize,
    pub records: usize,
}

/// Pull every page from `source`, handing each row to `sink` in order.
pub fn drain_pages<S, F>(source: &mut S, page_size: usize, mut sink: F) -> Result<PagingSummary>
where
    S: RecordSource + ?Sized,
    F: FnMut(RawRecord),
{
    if page_size == 0 {
        bail!("page size must be at least 1");
    }

    let mut summary = PagingSummary::default();
    let mut offset = 0;
    loop {
        log::info!("Fetching equipment info: {offset}");
        let page = source
            .fetch_page(offset, page_size)
            .with_context(|| format!("fetching records at offset {offset}"))?;
        let count = page.len();
        summary.pages += 1;
        summary.records += count;
        for record in page {
            sink(record);
        }
        if count < page_size {
            break;
        }
        offset += page_size;
    }
    Ok(summary)
}

/// Decode a bucket API response body into rows.
///
/// A body without a `bucket` array is the end of the data; a body carrying
/// an `error` object is a failed query.
pub fn parse_bucket_body(body: Value) -> Result<Vec<RawRecord>> {
    if let Some(error) = body.get("error") {
        let info = error
            .get("info")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        bail!("bucket query failed: {info}");
    }

    match body {
        Value::Array(rows) => Ok(parse_rows(rows)),
        Value::Object(mut map) => match map.remove("bucket") {
            Some(Value::Array(rows)) => Ok(parse_rows(rows)),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => bail!("unexpected bucket payload: {other}"),
        },
        other => bail!("unexpected bucket response: {other}"),
    }
}

/// Rows that do not decode (non-objects, mistyped fields) become empty
/// records so they are skipped as malformed without shortening the page.
fn parse_rows(rows: Vec<Value>) -> Vec<RawRecord> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            serde_json::from_value(row).unwrap_or_else(|err| {
                log::warn!("Skipping undecodable bucket row {idx}: {err}");
                RawRecord::default()
            })
        })
        .collect()
}
