use super::files::find_model_files;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nlogo_common::{LocalFileSystem, Location};
use nlogo_format::ModelFormat;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Model file or directory to check (defaults to the configured source directory)
    pub input: Option<PathBuf>,

    /// Only report files with problems
    #[arg(short, long)]
    pub quiet: bool,
}

/// Totals over a set of checked files
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub files: usize,
    pub failed: usize,
    pub warnings: usize,
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = match &args.input {
        Some(input) => PathBuf::from(cwd).join(input),
        None => config.get_src_dir(cwd),
    };

    println!("🔍 {} NetLogo models", "Checking".green().bold());
    println!("   Input: {}", input.display());
    println!();

    let files = find_model_files(&input, &config.extension)?;
    let format = ModelFormat::with_collaborators(config.collaborators());
    let summary = check_files(&format, &files, args.quiet);

    println!();
    println!(
        "✨ {} Check complete!",
        if summary.failed > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", summary.files);
    if summary.warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), summary.warnings);
    }
    if summary.failed > 0 {
        println!("   {} {}", "Failed:".red(), summary.failed);
        return Err(anyhow::anyhow!(
            "{} of {} models could not be read",
            summary.failed,
            summary.files
        ));
    }

    Ok(())
}

pub fn check_files(format: &ModelFormat, files: &[PathBuf], quiet: bool) -> CheckSummary {
    let mut summary = CheckSummary::default();

    for file in files {
        summary.files += 1;
        match check_file(format, file) {
            Ok(warnings) if warnings.is_empty() => {
                if !quiet {
                    println!("  {} {}", "✓".green(), file.display());
                }
            }
            Ok(warnings) => {
                println!("  {} {}", "⚠".yellow(), file.display());
                for warning in &warnings {
                    println!("      {}", warning.yellow());
                }
                summary.warnings += warnings.len();
            }
            Err(e) => {
                println!("  {} {}", "✗".red(), file.display());
                println!("      {}", e.to_string().red());
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Load one model, returning its validation complaints
fn check_file(format: &ModelFormat, file: &Path) -> Result<Vec<String>> {
    let model = format.load_document(&LocalFileSystem, &Location::new(file))?;
    Ok(format
        .validation_errors(&model)
        .iter()
        .map(|warning| warning.to_string())
        .collect())
}
