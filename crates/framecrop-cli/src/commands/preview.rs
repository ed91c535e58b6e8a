use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use framecrop_core::render::encode_png;

use super::{open_tool, ToolArgs, ViewArgs};

#[derive(Args)]
pub struct PreviewArgs {
    /// Input image (PNG, JPEG, WEBP or GIF)
    pub file: PathBuf,

    #[command(flatten)]
    pub tool: ToolArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Output file path
    #[arg(short, long, default_value = "preview.png")]
    pub output: PathBuf,
}

pub fn run(args: &PreviewArgs) -> Result<()> {
    let config = args.tool.load()?;
    let mut tool = open_tool(&config, Some(&args.file), None)?;
    args.view.apply(&mut tool)?;

    let canvas = tool
        .preview()
        .context("No preview was rendered for the loaded image")?;
    std::fs::write(&args.output, encode_png(canvas)?)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Preview {}x{} saved to {}",
        canvas.width(),
        canvas.height(),
        args.output.display()
    );
    Ok(())
}
