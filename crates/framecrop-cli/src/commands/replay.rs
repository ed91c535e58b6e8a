use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use framecrop_core::interaction::InputEvent;
use framecrop_core::render::encode_png;
use framecrop_core::viewport::FixedViewport;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use super::{open_tool, OutputArgs, ToolArgs};
use crate::summary::print_export_summary;

#[derive(Args)]
pub struct ReplayArgs {
    /// Input image (PNG, JPEG, WEBP or GIF)
    pub file: PathBuf,

    /// Interaction script (TOML): a `[viewport]` table and `[[events]]`
    #[arg(long)]
    pub script: PathBuf,

    #[command(flatten)]
    pub tool: ToolArgs,

    /// Also save the final preview canvas
    #[arg(long)]
    pub preview: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Recorded input, replayed against a fixed page layout.
#[derive(Deserialize)]
struct ReplayScript {
    #[serde(default)]
    viewport: FixedViewport,
    #[serde(default)]
    events: Vec<InputEvent>,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let contents = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let script: ReplayScript = toml::from_str(&contents).context("Invalid replay script")?;

    let config = args.tool.load()?;
    let mut tool = open_tool(&config, Some(&args.file), None)?;

    let pb = ProgressBar::new(script.events.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Replaying [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let mut commits = 0usize;
    for event in &script.events {
        if tool.handle(event, &script.viewport)? {
            commits += 1;
        }
        pb.inc(1);
    }
    pb.finish();
    println!(
        "{} events, {} commits, {} renders",
        script.events.len(),
        commits,
        tool.render_count()
    );

    if let (Some(path), Some(canvas)) = (&args.preview, tool.preview()) {
        std::fs::write(path, encode_png(canvas)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Preview saved to {}", path.display());
    }

    let exported = tool.export(Local::now().naive_local())?;
    let path = args.output.resolve(&exported.file_name);
    std::fs::write(&path, &exported.png)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    print_export_summary(&tool, &exported, &path);
    Ok(())
}
