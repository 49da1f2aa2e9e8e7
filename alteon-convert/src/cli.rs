use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "alteon-convert")]
#[command(about = "Convert Alteon SLB configuration dumps to A10 aXAPI payloads")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Convert one dump and write the aXAPI payload files.
    Convert(ConvertArgs),
    /// Scan one dump and list the defined SLB element ids.
    Scan(ScanArgs),
    /// Show the captured section for a single SLB element.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Alteon configuration dump.
    pub file: PathBuf,
    /// Directory receiving the payload JSON files; omit to skip writing.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// TOML file overriding the id-space scan bounds.
    #[arg(long)]
    pub limits: Option<PathBuf>,
    /// Also print the duplicate-name and collision findings.
    #[arg(short, long)]
    pub duplicates: bool,
    /// Fail when the reuse accounting does not reconcile or any error
    /// finding was raised.
    #[arg(long)]
    pub strict: bool,
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    /// Element kind to look up.
    #[arg(long, value_enum)]
    pub kind: ElementArg,
    /// Element id (for `vport`: the service port, after normalization).
    #[arg(long)]
    pub id: u32,
    /// Owning virtual-server id, required with `vport`.
    #[arg(long)]
    pub parent: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ElementArg {
    Virt,
    Group,
    Real,
    Vport,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
