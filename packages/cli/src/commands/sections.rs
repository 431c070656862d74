use super::files::resolve_location;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nlogo_common::{IoProvider, LocalFileSystem};
use nlogo_format::{separator, SectionId};

#[derive(Args, Debug)]
pub struct SectionsArgs {
    /// Model file path or file:// URI to split
    pub input: String,

    /// Print the lines of a single section (e.g. code, interface, version)
    #[arg(short, long)]
    pub section: Option<SectionId>,
}

pub fn sections(args: SectionsArgs, cwd: &str) -> Result<()> {
    let location = resolve_location(cwd, &args.input)?;
    let text = LocalFileSystem.read_to_string(&location)?;
    let sections = separator::split(&text)?;

    if let Some(section) = args.section {
        for line in sections.get(&section).into_iter().flatten() {
            println!("{}", line);
        }
        return Ok(());
    }

    println!("📄 {}", location.to_string().bright_white());
    for (section, lines) in &sections {
        let count = format!("{:>5} lines", lines.len());
        println!(
            "  {:>2} {:<16} {}",
            section.index() + 1,
            section.name(),
            if lines.is_empty() {
                count.dimmed()
            } else {
                count.normal()
            }
        );
    }

    Ok(())
}
