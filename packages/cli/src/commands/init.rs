use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nlogo_common::{LocalFileSystem, Location};
use nlogo_format::{resolve_writable, ModelFormat};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Path of the new model (the model extension is added when missing)
    pub output: PathBuf,

    /// Force overwrite an existing model
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let format = ModelFormat::with_collaborators(config.collaborators());

    let location = resolve_writable(&Location::new(PathBuf::from(cwd).join(&args.output)));
    if location.path().exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            location.path().display().to_string().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let written = create_model(&format, &location)?;
    println!("  {} Created {}", "✓".green(), written.path().display());

    Ok(())
}

/// Write a model made of section defaults to `location`
pub fn create_model(format: &ModelFormat, location: &Location) -> Result<Location> {
    if let Some(parent) = location.path().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let model = format.new_model()?;
    Ok(format.save_model(&model, &LocalFileSystem, location)?)
}
