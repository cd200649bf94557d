//! Run configuration for `build-catalog`.
//!
//! Values resolve as: command-line flag, then environment variable, then the
//! built-in default. Flag handling lives in the binary; this module owns the
//! defaults and the environment layer.

use crate::source::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://oldschool.runescape.wiki/api.php";
pub const DEFAULT_USER_AGENT: &str = concat!(
    "equipment-catalog/",
    env!("CARGO_PKG_VERSION"),
    " (combat simulator data build)"
);
pub const DEFAULT_MANUAL_PATH: &str = "data/manual_equipment.json";
pub const DEFAULT_OUTPUT_PATH: &str = "equipment.json";
pub const DEFAULT_IMAGES_PATH: &str = "required_images.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "EQUIPMENT_CATALOG_API";
pub const ENV_USER_AGENT: &str = "EQUIPMENT_CATALOG_USER_AGENT";
pub const ENV_PAGE_SIZE: &str = "EQUIPMENT_CATALOG_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub api_url: String,
    pub user_agent: String,
    pub page_size: usize,
    pub timeout: Duration,
    /// Saved bucket response to read instead of the live API.
    pub input: Option<PathBuf>,
    /// Curated additions; `None` skips them.
    pub manual_path: Option<PathBuf>,
    pub output_path: PathBuf,
    pub images_path: PathBuf,
    /// On-disk schema overriding the embedded one.
    pub schema_path: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            input: None,
            manual_path: Some(PathBuf::from(DEFAULT_MANUAL_PATH)),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            images_path: PathBuf::from(DEFAULT_IMAGES_PATH),
            schema_path: None,
        }
    }
}

impl BuildConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env(|key| env::var(key).ok())
    }

    /// Overlay values found through `lookup`; blank values are ignored.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(url) = read(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(agent) = read(ENV_USER_AGENT) {
            self.user_agent = agent;
        }
        if let Some(raw) = read(ENV_PAGE_SIZE) {
            self.page_size =
                parse_page_size(&raw).with_context(|| format!("reading {ENV_PAGE_SIZE}"))?;
        }
        Ok(self)
    }
}

pub fn parse_page_size(raw: &str) -> Result<usize> {
    let size: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("page size '{raw}' is not a positive integer"))?;
    if size == 0 {
        bail!("page size must be at least 1");
    }
    Ok(size)
}
