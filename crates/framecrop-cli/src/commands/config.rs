use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use framecrop_core::config::ToolConfig;

use super::ToolArg;

#[derive(Args)]
pub struct ConfigArgs {
    /// Tool whose defaults to print
    #[arg(long, value_enum, default_value = "circle")]
    pub tool: ToolArg,

    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the default ToolConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = ToolConfig::for_kind(args.tool.into());
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
