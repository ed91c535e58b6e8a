use std::path::Path;

use console::Style;
use framecrop_core::frame::FrameKind;
use framecrop_core::render::ExportedImage;

use crate::commands::Tool;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    kind: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            kind: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_export_summary(tool: &Tool, exported: &ExportedImage, path: &Path) {
    let s = Styles::new();
    let frame = tool.frame();

    println!();
    println!("  {}", s.title.apply_to("framecrop export"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(16)));
    println!();

    if let Some(image) = tool.image() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Input"),
            s.path.apply_to(&image.source().name)
        );
        println!(
            "  {:<14}{}",
            s.label.apply_to("Source"),
            s.value
                .apply_to(format!("{}x{} {}", image.width(), image.height(), image.source().mime))
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frame"),
        s.kind.apply_to(frame.kind)
    );

    if let Some(view) = tool.view() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Scale"),
            s.value.apply_to(format!("{:.1}x", view.scale))
        );
        println!(
            "  {:<14}{}",
            s.label.apply_to("Offset"),
            s.value
                .apply_to(format!("{:+.1}, {:+.1}", view.offset_x, view.offset_y))
        );
        match (frame.kind, view.frame_radius) {
            (FrameKind::RoundedRect, Some(radius)) => println!(
                "  {:<14}{}",
                s.label.apply_to("Radius"),
                s.value.apply_to(format!("{radius:.0}"))
            ),
            _ => println!(
                "  {:<14}{}",
                s.label.apply_to("Radius"),
                s.disabled.apply_to("n/a")
            ),
        }
    }

    println!(
        "  {:<14}{}",
        s.label.apply_to("Export"),
        s.value.apply_to(format!(
            "{}x{} {} ({:.1} KB)",
            exported.width,
            exported.height,
            exported.mime_type,
            exported.png.len() as f64 / 1024.0
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Saved to"),
        s.path.apply_to(path.display())
    );
    println!();
}
