use super::files::find_model_files;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nlogo_common::{IoProvider, LocalFileSystem, Location};
use nlogo_format::ModelFormat;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Model file or directory to format (defaults to the configured source directory)
    pub input: Option<PathBuf>,

    /// Report files that would change without rewriting them
    #[arg(long)]
    pub check: bool,
}

pub fn fmt(args: FmtArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = match &args.input {
        Some(input) => PathBuf::from(cwd).join(input),
        None => config.get_src_dir(cwd),
    };

    let files = find_model_files(&input, &config.extension)?;
    let format = ModelFormat::with_collaborators(config.collaborators());

    let mut changed = 0;
    for file in &files {
        if format_file(&format, file, args.check)? {
            changed += 1;
            let verb = if args.check { "Would format" } else { "Formatted" };
            println!("  {} {} {}", "✓".green(), verb, file.display());
        }
    }

    println!();
    println!(
        "   {} of {} models {}",
        changed,
        files.len(),
        if args.check { "need formatting" } else { "formatted" }
    );

    if args.check && changed > 0 {
        return Err(anyhow::anyhow!("{} models are not canonically formatted", changed));
    }

    Ok(())
}

/// Rewrite one model in canonical form. Returns whether its text changed.
pub fn format_file(format: &ModelFormat, file: &Path, check_only: bool) -> Result<bool> {
    let location = Location::new(file);
    let original = LocalFileSystem.read_to_string(&location)?;
    let model = format.read_model(&original)?;
    let sections = format.model_sections(&model);

    if nlogo_format::separator::join(&sections) == original {
        return Ok(false);
    }

    if !check_only {
        format.write_document(&sections, &LocalFileSystem, &location)?;
    }
    Ok(true)
}
