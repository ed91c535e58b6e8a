use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use framecrop_core::config::ToolConfig;
use framecrop_core::source::{decode, SourceFile};
use framecrop_core::upload::validate_upload;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = SourceFile::open(&args.file)?;
    let bytes = source.bytes.len();
    let mime = source.mime;
    let upload = validate_upload(mime.as_str(), bytes);
    let image = decode(source)?;
    let (width, height) = image.dimensions();

    println!("File:            {}", args.file.display());
    println!("Type:            {}", mime);
    println!("Dimensions:      {}x{}", width, height);
    println!("Size:            {:.1} KB", bytes as f64 / 1024.0);

    let circle = ToolConfig::circle().frame();
    let rounded = ToolConfig::rounded().frame();
    println!("Circle export:   {0}x{0}", circle.export_edge(width, height));
    println!("Rounded export:  {0}x{0}", rounded.export_edge(width, height));

    match upload {
        Ok(()) => println!("Upload:          ok"),
        Err(err) => println!("Upload:          {}", err),
    }

    Ok(())
}
