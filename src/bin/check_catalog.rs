//! Validates a persisted equipment catalog.
//!
//! Checks the file against the catalog schema (embedded, or `--schema PATH`),
//! then decodes it into typed entries and verifies the ordering and slot
//! invariants the builder guarantees. Every problem is printed; the exit code
//! is non-zero when any was found.

use anyhow::{Context, Result, anyhow, bail};
use equipment_catalog::catalog::read_catalog_value;
use equipment_catalog::{CatalogSchema, Equipment, catalog_invariant_violations};
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
    let args = CliArgs::parse()?;
    let schema = match &args.schema {
        Some(path) => CatalogSchema::load(path)?,
        None => CatalogSchema::embedded()?,
    };
    let value = read_catalog_value(&args.file)?;

    let mut errors = schema.violations(&value);
    if errors.is_empty() {
        let entries: Vec<Equipment> = serde_json::from_value(value)
            .with_context(|| format!("decoding {}", args.file.display()))?;
        errors.extend(catalog_invariant_violations(&entries));
        if errors.is_empty() {
            println!("{}: {} entries OK", args.file.display(), entries.len());
            return Ok(());
        }
    }

    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("{} has {} problem(s)", args.file.display(), errors.len());
}

struct CliArgs {
    file: PathBuf,
    schema: Option<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut file: Option<PathBuf> = None;
        let mut schema: Option<PathBuf> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--file" => {
                    if file.is_some() {
                        bail!("catalog path may only be provided once");
                    }
                    file = Some(PathBuf::from(next_value(&mut args, "--file")?));
                }
                "--schema" => schema = Some(PathBuf::from(next_value(&mut args, "--schema")?)),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with("--") => bail!("unknown flag: {other}"),
                other => {
                    if file.is_some() {
                        bail!("catalog path may only be provided once");
                    }
                    file = Some(PathBuf::from(other));
                }
            }
        }

        let file = file.ok_or_else(|| anyhow!("missing catalog path (see --help)"))?;
        Ok(CliArgs { file, schema })
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
    "Usage: check-catalog [--schema PATH] (--file PATH | PATH)\n\
Validates an equipment catalog against the schema and the builder's ordering and slot invariants.\n"
}

fn print_usage() {
    print!("{}", usage());
}
