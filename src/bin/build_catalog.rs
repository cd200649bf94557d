//! Builds the canonical equipment catalog.
//!
//! Pages through the wiki bucket API (or a saved dump passed with `--input`),
//! canonicalizes every row, appends the curated manual entries, validates the
//! merged catalog against the schema, and writes it next to the manifest of
//! image files the asset fetcher should download. Nothing is written unless
//! the whole pass succeeds.

use anyhow::{Result, anyhow, bail};
use equipment_catalog::config::{self, BuildConfig};
use equipment_catalog::{init_logging, pipeline};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_logging();
    let args = CliArgs::parse()?;
    let config = args.apply(BuildConfig::from_env()?)?;
    let report = pipeline::run(&config)?;
    log::info!(
        "Kept {} of {} rows ({} duplicates, {} malformed, {} version drops, {} excluded)",
        report.stats.retained,
        report.records,
        report.stats.duplicates,
        report.stats.malformed,
        report.stats.version_discards,
        report.stats.exclusions
    );
    if args.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

#[derive(Default)]
struct CliArgs {
    input: Option<PathBuf>,
    manual: Option<PathBuf>,
    no_manual: bool,
    output: Option<PathBuf>,
    images: Option<PathBuf>,
    api: Option<String>,
    user_agent: Option<String>,
    page_size: Option<String>,
    schema: Option<PathBuf>,
    report: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut parsed = CliArgs::default();

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--input" => parsed.input = Some(PathBuf::from(next_value(&mut args, "--input")?)),
                "--manual" => {
                    parsed.manual = Some(PathBuf::from(next_value(&mut args, "--manual")?))
                }
                "--no-manual" => parsed.no_manual = true,
                "--output" => {
                    parsed.output = Some(PathBuf::from(next_value(&mut args, "--output")?))
                }
                "--images" => {
                    parsed.images = Some(PathBuf::from(next_value(&mut args, "--images")?))
                }
                "--api" => parsed.api = Some(next_value(&mut args, "--api")?),
                "--user-agent" => parsed.user_agent = Some(next_value(&mut args, "--user-agent")?),
                "--page-size" => parsed.page_size = Some(next_value(&mut args, "--page-size")?),
                "--schema" => {
                    parsed.schema = Some(PathBuf::from(next_value(&mut args, "--schema")?))
                }
                "--report" => parsed.report = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        if parsed.no_manual && parsed.manual.is_some() {
            bail!("--manual and --no-manual are mutually exclusive");
        }
        Ok(parsed)
    }

    /// Flags win over whatever the environment already set.
    fn apply(&self, mut config: BuildConfig) -> Result<BuildConfig> {
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        if self.no_manual {
            config.manual_path = None;
        } else if let Some(manual) = &self.manual {
            config.manual_path = Some(manual.clone());
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(images) = &self.images {
            config.images_path = images.clone();
        }
        if let Some(api) = &self.api {
            config.api_url = api.clone();
        }
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        if let Some(raw) = &self.page_size {
            config.page_size = config::parse_page_size(raw)?;
        }
        if let Some(schema) = &self.schema {
            config.schema_path = Some(schema.clone());
        }
        Ok(config)
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: build-catalog [--input DUMP.json] [--manual PATH|--no-manual] [--output PATH] [--images PATH]\n\
                     [--api URL] [--user-agent UA] [--page-size N] [--schema PATH] [--report]\n\
Fetches equipment rows from the wiki bucket API (or DUMP.json), canonicalizes them, merges the\n\
curated manual entries, and writes the sorted catalog plus the required image manifest.\n\
Environment: EQUIPMENT_CATALOG_API, EQUIPMENT_CATALOG_USER_AGENT, EQUIPMENT_CATALOG_PAGE_SIZE, RUST_LOG.\n"
}

fn print_usage() {
    print!("{}", usage());
}
