use anyhow::Result;
use colored::Colorize;
use outfitgen_core::RunReport;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

/// Result of generating one family, successful or not.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyOutcome {
    pub family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<RunReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FamilyOutcome {
    pub const fn passed(&self) -> bool {
        self.error.is_none()
    }

    fn artifact_count(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.artifacts.len())
    }

    fn skipped_count(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.skipped.len())
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    outcomes: &[FamilyOutcome],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📦 Generation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;

    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    let artifacts: usize = outcomes.iter().map(FamilyOutcome::artifact_count).sum();
    let skipped: usize = outcomes.iter().map(FamilyOutcome::skipped_count).sum();

    writeln!(out, "Families: {}", outcomes.len())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    writeln!(out, "Artifacts: {}", artifacts.to_string().green())?;
    writeln!(out, "Skipped variants: {}", skipped.to_string().yellow())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for outcome in outcomes {
        let status = if outcome.passed() {
            "✅ OK".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {}", status, outcome.family.bold())?;

        if let Some(report) = &outcome.report {
            let verb = if report.written { "wrote" } else { "would write" };
            for artifact in &report.artifacts {
                writeln!(
                    out,
                    "   {verb} {} ({}, x = {:.3})",
                    artifact.path.display(),
                    artifact.variant,
                    artifact.position
                )?;
            }
            for skipped in &report.skipped {
                writeln!(out, "   • skipped {}: {}", skipped.variant, skipped.reason.yellow())?;
            }
        }
        if let Some(error) = &outcome.error {
            writeln!(out, "   • {}", error.red())?;
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, outcomes: &[FamilyOutcome]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(outcomes)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, outcomes: &[FamilyOutcome]) -> Result<()> {
    writeln!(out, "# Outfit Generation Results\n")?;

    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Families**: {}", outcomes.len())?;
    writeln!(out, "- **Failed**: {failed}")?;
    writeln!(
        out,
        "- **Artifacts**: {}\n",
        outcomes.iter().map(FamilyOutcome::artifact_count).sum::<usize>()
    )?;

    writeln!(out, "## Families\n")?;
    for outcome in outcomes {
        let status = if outcome.passed() { "✅" } else { "❌" };
        writeln!(out, "### {} {}\n", status, outcome.family)?;
        if let Some(report) = &outcome.report {
            writeln!(out, "| Variant | Position | File |")?;
            writeln!(out, "|---------|----------|------|")?;
            for artifact in &report.artifacts {
                writeln!(
                    out,
                    "| {} | {:.3} | `{}` |",
                    artifact.variant,
                    artifact.position,
                    artifact.path.display()
                )?;
            }
            for skipped in &report.skipped {
                writeln!(out, "\n- skipped **{}**: {}", skipped.variant, skipped.reason)?;
            }
        }
        if let Some(error) = &outcome.error {
            writeln!(out, "- **Error**: {error}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
