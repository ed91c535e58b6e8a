pub mod config;
pub mod crop;
pub mod info;
pub mod preview;
pub mod replay;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use framecrop_core::config::ToolConfig;
use framecrop_core::frame::FrameKind;
use framecrop_core::session::{FileSessionStore, MemorySessionStore, SessionStore};
use framecrop_core::source::SourceFile;
use framecrop_core::tool::{CropTool, MountReason};
use tracing::debug;

pub type Tool = CropTool<Box<dyn SessionStore>>;

#[derive(Clone, Copy, ValueEnum)]
pub enum ToolArg {
    /// Circle crop, exported at the source's shorter side
    Circle,
    /// Rounded corners, exported at a fixed edge
    Rounded,
}

impl From<ToolArg> for FrameKind {
    fn from(arg: ToolArg) -> Self {
        match arg {
            ToolArg::Circle => FrameKind::Circle,
            ToolArg::Rounded => FrameKind::RoundedRect,
        }
    }
}

#[derive(Args)]
pub struct ToolArgs {
    /// Which tool to run
    #[arg(long, value_enum, default_value = "circle")]
    pub tool: ToolArg,

    /// Tool config file (TOML); overrides --tool
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ToolArgs {
    pub fn load(&self) -> Result<ToolConfig> {
        let Some(ref path) = self.config else {
            return Ok(ToolConfig::for_kind(self.tool.into()));
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: ToolConfig = toml::from_str(&contents).context("Invalid tool config")?;
        Ok(config.sanitized())
    }
}

/// Placement applied before rendering. Values are clamped exactly as an
/// interactive drag or zoom would be.
#[derive(Args)]
pub struct ViewArgs {
    /// Zoom factor (1.0-2.0)
    #[arg(long, default_value = "1.0")]
    pub scale: f32,

    /// Horizontal offset of the image centre, in preview pixels
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub offset_x: f32,

    /// Vertical offset of the image centre, in preview pixels
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub offset_y: f32,

    /// Corner radius in reference pixels (rounded tool only, 0-600)
    #[arg(long)]
    pub radius: Option<f32>,
}

impl ViewArgs {
    pub fn apply(&self, tool: &mut Tool) -> Result<()> {
        tool.place(self.scale, self.offset_x, self.offset_y, self.radius)?;
        Ok(())
    }
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output file path (overwritten if it exists)
    #[arg(short, long, conflicts_with = "out_dir")]
    pub output: Option<PathBuf>,

    /// Directory for the timestamped export file
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

impl OutputArgs {
    /// Where to write an export named `file_name`.
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        if let Some(ref path) = self.output {
            return path.clone();
        }
        let dir = self.out_dir.as_deref().unwrap_or(Path::new("."));
        unique_path(dir, file_name)
    }
}

/// `dir/file_name`, or `dir/stem-N.ext` with the first free N.
pub fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }
    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    let ext = name.extension().and_then(|e| e.to_str()).unwrap_or("png");
    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("{stem}-{n}.{ext}"));
        if !candidate.exists() {
            debug!(path = %candidate.display(), "export name taken, using suffix");
            return candidate;
        }
        n += 1;
    }
}

/// Build a tool and load `file` into it, or restore the snapshot in
/// `session` when no file is given.
pub fn open_tool(config: &ToolConfig, file: Option<&Path>, session: Option<&Path>) -> Result<Tool> {
    let store: Box<dyn SessionStore> = match session {
        Some(path) => Box::new(FileSessionStore::new(path)),
        None => Box::new(MemorySessionStore::new()),
    };

    let Some(file) = file else {
        let Some(session) = session else {
            bail!("No input file given");
        };
        let tool = CropTool::mount(config, store, MountReason::LanguageSwitch)
            .context("Failed to restore session")?;
        if tool.image().is_none() {
            bail!("No input file given and no snapshot in {}", session.display());
        }
        return Ok(tool);
    };

    let mut tool = CropTool::mount(config, store, MountReason::FreshLoad)?;
    let source = SourceFile::open(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    tool.open_file(source)
        .with_context(|| format!("Failed to decode {}", file.display()))?;
    Ok(tool)
}
