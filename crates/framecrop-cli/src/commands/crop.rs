use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;

use super::{open_tool, OutputArgs, ToolArgs, ViewArgs};
use crate::summary::print_export_summary;

#[derive(Args)]
pub struct CropArgs {
    /// Input image (PNG, JPEG, WEBP or GIF); omit to reuse the --session file
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub tool: ToolArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Session snapshot file; remembers the input between runs
    #[arg(long)]
    pub session: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: &CropArgs) -> Result<()> {
    let config = args.tool.load()?;
    let mut tool = open_tool(&config, args.file.as_deref(), args.session.as_deref())?;
    args.view.apply(&mut tool)?;

    let exported = tool.export(Local::now().naive_local())?;
    let path = args.output.resolve(&exported.file_name);
    std::fs::write(&path, &exported.png)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    print_export_summary(&tool, &exported, &path);
    Ok(())
}
