use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use linecfg_core::{locate, scan_ids, ConfigLines};
use serde::Serialize;

use alteon_convert::convert::{convert_config, Conversion};
use alteon_convert::element::{vport_path, ElementKind, TOP_MARKER};
use alteon_convert::findings::FindingSeverity;
use alteon_convert::limits::{load_limits, ScanLimits};
use alteon_convert::protocol::normalize_service_tokens;
use alteon_convert::report::{render_findings, render_summary};

mod cli;

use cli::{Cli, Command, ConvertArgs, ElementArg, InspectArgs, OutputFormat, ScanArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Scan(args) => run_scan(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a alteon_convert::summary::MigrationSummary,
    findings: &'a [alteon_convert::findings::Finding],
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let input = ConfigLines::load_file(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let limits = resolve_limits(args.limits.as_deref())?;
    let conversion = convert_config(input, &limits);

    match args.format {
        OutputFormat::Json => {
            let report = JsonReport {
                summary: &conversion.summary,
                findings: &conversion.findings,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            // Duplicate-name and collision findings are noisy on large dumps
            // and only print with --duplicates; accounting findings always do.
            let shown: Vec<_> = conversion
                .findings
                .iter()
                .filter(|f| args.duplicates || !f.is_duplicate_report())
                .cloned()
                .collect();
            if !shown.is_empty() {
                println!("{}", render_findings(&shown));
            }
            println!("{}", render_summary(&conversion.summary));
            if args.verbose {
                println!("{}", serde_json::to_string_pretty(&conversion.model)?);
            }
        }
    }

    if let Some(out_dir) = &args.out_dir {
        write_payloads(out_dir, &conversion)?;
    }

    if args.strict {
        if !conversion.summary.reconciled {
            bail!("strict mode failed: group accounting did not reconcile");
        }
        if conversion
            .findings
            .iter()
            .any(|f| f.severity == FindingSeverity::Error)
        {
            bail!("strict mode failed: error findings present");
        }
    }
    Ok(())
}

/// One JSON array file per create-call collection, named after the aXAPI
/// object kind.
fn write_payloads(out_dir: &Path, conversion: &Conversion) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let files: [(&str, serde_json::Value); 3] = [
        (
            "virtual-servers.json",
            serde_json::to_value(&conversion.model.virtual_servers)?,
        ),
        (
            "service-groups.json",
            serde_json::to_value(&conversion.model.service_groups)?,
        ),
        (
            "real-servers.json",
            serde_json::to_value(&conversion.model.real_servers)?,
        ),
    ];
    for (name, value) in files {
        let path = out_dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn run_scan(args: ScanArgs) -> Result<()> {
    let mut input = ConfigLines::load_file(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    normalize_service_tokens(input.lines_mut());
    let lines = input.lines();

    for kind in [
        ElementKind::VirtualServer,
        ElementKind::ServiceGroup,
        ElementKind::RealServer,
    ] {
        let ids = scan_ids(lines, kind.path());
        println!("{}: {} defined", kind.path(), ids.len());
        if !ids.is_empty() {
            let rendered: Vec<String> = ids.iter().map(u32::to_string).collect();
            println!("  ids: {}", rendered.join(", "));
        }
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let mut input = ConfigLines::load_file(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    normalize_service_tokens(input.lines_mut());
    let lines = input.lines();

    let section = match args.kind {
        ElementArg::Virt => locate(
            lines,
            TOP_MARKER,
            ElementKind::VirtualServer.path(),
            &args.id.to_string(),
        ),
        ElementArg::Group => locate(
            lines,
            TOP_MARKER,
            ElementKind::ServiceGroup.path(),
            &args.id.to_string(),
        ),
        ElementArg::Real => locate(
            lines,
            TOP_MARKER,
            ElementKind::RealServer.path(),
            &args.id.to_string(),
        ),
        ElementArg::Vport => {
            let Some(parent) = args.parent else {
                bail!("--parent is required with `vport`");
            };
            locate(lines, TOP_MARKER, &vport_path(parent), &args.id.to_string())
        }
    };

    if section.is_empty() {
        bail!("no matching element in {}", args.file.display());
    }
    print!("{}", section.text());
    Ok(())
}

fn resolve_limits(path: Option<&Path>) -> Result<ScanLimits> {
    match path {
        Some(path) => load_limits(path)
            .with_context(|| format!("failed to load limits from {}", path.display())),
        None => Ok(ScanLimits::default()),
    }
}
