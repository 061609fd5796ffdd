mod reports;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use outfitgen_core::{
    FamilySpec, GenerateError, Manifest, MissingPolicy, Rounding, RunReport, Settings,
};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use reports::FamilyOutcome;
use util::select_families;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored human-readable summary
    Console,
    /// Machine-readable outcome list
    Json,
    /// Markdown tables per family
    Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoundingArg {
    /// Ties round away from zero
    Nearest,
    /// Ties round to the even neighbour
    HalfEven,
}

impl From<RoundingArg> for Rounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::Nearest => Self::Nearest,
            RoundingArg::HalfEven => Self::HalfEven,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "outfitgen", version = "0.1.0")]
#[command(about = "Render progressive outfit variant families from templates")]
struct Args {
    /// Manifest describing families, shared strings, and settings
    #[arg(long, default_value = "dat/outfits/bioship/outfits.json")]
    manifest: PathBuf,

    /// Directory to write artifacts into (defaults to the manifest's directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Families to generate by template stem (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    families: String,

    /// Override the artifact file extension
    #[arg(long)]
    extension: Option<String>,

    /// Override the marker insertion anchor
    #[arg(long)]
    anchor: Option<String>,

    /// Override the tie-breaking rule for rounded parameters
    #[arg(long, value_enum)]
    rounding: Option<RoundingArg>,

    /// Skip variants with missing parameters instead of failing the family
    #[arg(long)]
    skip_missing: bool,

    /// Render everything but write no artifacts
    #[arg(long)]
    dry_run: bool,

    /// List families in the manifest and exit
    #[arg(long)]
    list_families: bool,

    /// Print every translatable string in the manifest and exit
    #[arg(long)]
    strings: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut manifest = Manifest::load(&args.manifest)
        .with_context(|| format!("failed to load manifest {}", args.manifest.display()))?;
    apply_overrides(&mut manifest.settings, &args);

    if maybe_list_families(&args, &manifest)? || maybe_list_strings(&args, &manifest)? {
        return Ok(());
    }

    let console = args.report == ReportFormat::Console;
    if console {
        announce_banner();
    }

    let start_time = Instant::now();
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| manifest.base_dir().to_path_buf());
    let selected = select_families(&manifest, &args.families);
    let outcomes = run_families(&args, &manifest, &selected, &out_dir);

    write_reports(&args, &outcomes, start_time)?;

    if outcomes.iter().any(|o| !o.passed()) {
        std::process::exit(1);
    }

    Ok(())
}

fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(extension) = &args.extension {
        settings.extension.clone_from(extension);
    }
    if let Some(anchor) = &args.anchor {
        settings.anchor.clone_from(anchor);
    }
    if let Some(rounding) = args.rounding {
        settings.rounding = rounding.into();
    }
    if args.skip_missing {
        settings.on_missing = MissingPolicy::Skip;
    }
}

fn maybe_list_families(args: &Args, manifest: &Manifest) -> Result<bool> {
    if !args.list_families {
        return Ok(false);
    }
    let mut out = report_writer(args.output.as_deref())?;
    writeln!(out, "Available families:")?;
    for (id, variants) in manifest.family_index() {
        writeln!(out, "  {id:25} - {variants} variant(s)")?;
    }
    out.flush()?;
    Ok(true)
}

fn maybe_list_strings(args: &Args, manifest: &Manifest) -> Result<bool> {
    if !args.strings {
        return Ok(false);
    }
    let mut out = report_writer(args.output.as_deref())?;
    for text in manifest.translatable_strings() {
        writeln!(out, "{text}")?;
    }
    out.flush()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🧬 Outfit Variant Generator".bright_cyan().bold());
    println!("{}", "===========================".cyan());
}

fn run_family(
    manifest: &Manifest,
    spec: &FamilySpec,
    out_dir: &Path,
    dry_run: bool,
) -> Result<RunReport, GenerateError> {
    let family = manifest.build_family(spec)?;
    if dry_run {
        let batch = family.render()?;
        Ok(RunReport::planned(family.generator.template().name(), &batch, out_dir))
    } else {
        family.run(out_dir)
    }
}

fn run_families(
    args: &Args,
    manifest: &Manifest,
    selected: &[&FamilySpec],
    out_dir: &Path,
) -> Vec<FamilyOutcome> {
    let console = args.report == ReportFormat::Console;
    let mut outcomes = Vec::with_capacity(selected.len());

    for spec in selected {
        let family = spec.id();
        let family_start = Instant::now();
        log::debug!("generating {family} into {}", out_dir.display());
        match run_family(manifest, spec, out_dir, args.dry_run) {
            Ok(report) => {
                if console {
                    println!(
                        "✅ {} - {} artifact(s) - {:?}",
                        family.green(),
                        report.artifacts.len(),
                        family_start.elapsed()
                    );
                    if args.verbose {
                        for artifact in &report.artifacts {
                            println!("   {} -> {}", artifact.variant, artifact.path.display());
                        }
                    }
                }
                outcomes.push(FamilyOutcome {
                    family,
                    report: Some(report),
                    error: None,
                });
            }
            Err(e) => {
                eprintln!("❌ {} - {e}", family.red());
                outcomes.push(FamilyOutcome {
                    family,
                    report: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    outcomes
}

fn write_reports(args: &Args, outcomes: &[FamilyOutcome], start_time: Instant) -> Result<()> {
    let mut out = report_writer(args.output.as_deref())?;

    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut out, outcomes)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut out, outcomes)?,
        ReportFormat::Console => {
            if outcomes.is_empty() {
                writeln!(out, "No families selected.")?;
            } else {
                reports::generate_console_report(&mut out, outcomes, start_time.elapsed())?;
            }
            writeln!(out)?;
            writeln!(out, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Report sink: the `--output` file when given, stdout otherwise.
fn report_writer(path: Option<&Path>) -> Result<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(stdout()),
    };
    Ok(BufWriter::new(sink))
}
