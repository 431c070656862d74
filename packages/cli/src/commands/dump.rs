use super::files::resolve_location;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use nlogo_common::LocalFileSystem;
use nlogo_format::ModelFormat;

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Model file path or file:// URI to read
    pub input: String,

    /// Print compact JSON on one line
    #[arg(long)]
    pub compact: bool,
}

pub fn dump(args: DumpArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let format = ModelFormat::with_collaborators(config.collaborators());

    let location = resolve_location(cwd, &args.input)?;
    let model = format.load_document(&LocalFileSystem, &location)?;

    let json = if args.compact {
        serde_json::to_string(&model)?
    } else {
        serde_json::to_string_pretty(&model)?
    };
    println!("{}", json);

    Ok(())
}
