//! Blocking client for the wiki's bucket query API.

use crate::record::{BUCKET_FIELDS, RawRecord};
use crate::source::{RecordSource, parse_bucket_body};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::time::Duration;

// Longest slice of an error body echoed back in failures.
const ERROR_SNIPPET_CHARS: usize = 200;

/// Bucket query for one page of equipment rows.
///
/// Selects the item and bonus fields, keeps only rows with a slot and an
/// item id, joins the bonus infobox on `page_name_sub`, and orders by that
/// key so paging is stable.
pub fn bucket_query(offset: usize, limit: usize) -> String {
    let fields = BUCKET_FIELDS
        .iter()
        .map(|field| format!("'{field}'"))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "bucket('infobox_item')\
         .select({fields})\
         .limit({limit}).offset({offset})\
         .where('infobox_bonuses.equipment_slot', '!=', bucket.Null())\
         .where('item_id', '!=', bucket.Null())\
         .join('infobox_bonuses', 'infobox_bonuses.page_name_sub', 'infobox_item.page_name_sub')\
         .orderBy('page_name_sub', 'asc').run()"
    )
}

/// Fetches equipment rows from `api.php?action=bucket`.
pub struct BucketClient {
    http: reqwest::blocking::Client,
    api_url: String,
}

impl BucketClient {
    pub fn new(api_url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            api_url: api_url.to_string(),
        })
    }
}

impl RecordSource for BucketClient {
    fn fetch_page(&mut self, offset: usize, limit: usize) -> Result<Vec<RawRecord>> {
        let query = bucket_query(offset, limit);
        let response = self
            .http
            .get(&self.api_url)
            .query(&[("action", "bucket"), ("format", "json"), ("query", query.as_str())])
            .send()
            .with_context(|| format!("requesting {}", self.api_url))?;

        let status = response.status();
        let body = response
            .text()
            .with_context(|| format!("reading response from {}", self.api_url))?;
        if !status.is_success() {
            let snippet: String = body.chars().take(ERROR_SNIPPET_CHARS).collect();
            bail!("{} returned HTTP {status}: {snippet}", self.api_url);
        }

        let value: Value = serde_json::from_str(&body)
            .with_context(|| format!("parsing response from {}", self.api_url))?;
        parse_bucket_body(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_selects_fields_and_pages() {
        let query = bucket_query(1000, 500);
        assert!(query.starts_with("bucket('infobox_item').select('page_name','page_name_sub',"));
        assert!(query.contains(".limit(500).offset(1000)"));
        assert!(query.contains("'infobox_bonuses.combat_style'"));
        assert!(query.ends_with(".orderBy('page_name_sub', 'asc').run()"));
        assert!(!query.contains('\n'));
    }
}
