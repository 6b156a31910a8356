// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ifc2lbd - convert a building model document into a BOT Turtle graph

use anyhow::{Context, Result};
use clap::Parser;
use ifc_lbd_engine::{convert, ConversionOptions, EntityFilter};
use ifc_lbd_model::{BuildingModel, Category, InMemoryModel};
use std::path::{Path, PathBuf};

/// Convert a building model into Linked Building Data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Model document (JSON) to convert
    input: PathBuf,

    /// Turtle output path [default: input with .ttl extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Audit CSV path [default: output with .csv extension]
    #[arg(long, conflicts_with = "no_audit")]
    audit: Option<PathBuf>,

    /// Do not write the audit table
    #[arg(long)]
    no_audit: bool,

    /// Categories to leave out (e.g. interfaces,zones)
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<Category>,

    /// Do not expand property sets into attribute triples
    #[arg(long)]
    no_properties: bool,

    /// Fixed base URI instead of a timestamped one
    #[arg(long)]
    base_uri: Option<String>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let model = InMemoryModel::open(&args.input)
        .with_context(|| format!("Failed to load model {}", args.input.display()))?;
    log::info!("Loaded {} entities from {}", model.entity_count(), args.input.display());
    for category in Category::ALL {
        log::info!("{} found: {}", category.display_name(), model.count(category));
    }

    let mut options = ConversionOptions::new()
        .with_filter(EntityFilter::excluding(args.exclude.iter().copied()))
        .with_properties(!args.no_properties);
    if let Some(base_uri) = &args.base_uri {
        options = options.with_base_uri(base_uri.clone());
    }

    let conversion = convert(&model, &options).context("Conversion failed")?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("ttl"));
    conversion
        .write_turtle(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Wrote {}", output.display());

    if !args.no_audit {
        let audit_path = audit_path(args.audit.as_deref(), &output);
        conversion
            .audit
            .write_csv(&audit_path)
            .with_context(|| format!("Failed to write {}", audit_path.display()))?;
    }

    println!("Conversion summary:\n{}", conversion.report);
    for warning in &conversion.report.warnings {
        println!("  warning: {}", warning);
    }

    Ok(())
}

fn audit_path(explicit: Option<&Path>, output: &Path) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output.with_extension("csv"))
}
