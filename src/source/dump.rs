//! Offline source backed by a saved bucket response.
//!
//! Accepts either a bare array of rows or a full `{"bucket": [...]}` body and
//! serves it in the same page-sized slices the live API would.

use crate::record::RawRecord;
use crate::source::{RecordSource, parse_bucket_body};
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct DumpSource {
    records: Vec<RawRecord>,
}

impl DumpSource {
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening dump {}", path.display()))?;
        let body: Value = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing dump {}", path.display()))?;
        let records =
            parse_bucket_body(body).with_context(|| format!("decoding dump {}", path.display()))?;
        Ok(Self { records })
    }
}

impl RecordSource for DumpSource {
    fn fetch_page(&mut self, offset: usize, limit: usize) -> Result<Vec<RawRecord>> {
        let start = offset.min(self.records.len());
        let end = offset.saturating_add(limit).min(self.records.len());
        Ok(self.records[start..end].to_vec())
    }
}
