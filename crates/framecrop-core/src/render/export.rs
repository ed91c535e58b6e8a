use chrono::NaiveDateTime;
use image::RgbaImage;
use tiny_skia::FilterQuality;
use tracing::{info, warn};

use crate::consts::EXPORT_MIME_TYPE;
use crate::error::Result;
use crate::frame::{Frame, FrameKind};
use crate::geometry::{
    clamp_source_rect, preview_to_export_scale, source_window, ClipShape, Point, Rect,
};
use crate::view::{LoadedImage, ViewState};

use super::canvas::{clip_mask, draw_image, encode_png, new_pixmap, rgba_from_pixmap};

/// Everything needed to rasterize one export, resolved from the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportPlan {
    /// Edge of the square export canvas.
    pub edge: u32,
    /// Preview-to-export length factor used to project the offsets.
    pub projection: f32,
    /// Source pixels that end up on the export canvas.
    pub source: Rect,
    /// Clip on the export canvas.
    pub clip: ClipShape,
}

/// Final artifact handed to the caller for download.
#[derive(Clone, Debug)]
pub struct ExportedImage {
    pub file_name: String,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Resolve the export geometry for `view`.
pub fn plan_export(frame: &Frame, image: &LoadedImage, view: &ViewState) -> ExportPlan {
    let (width, height) = image.dimensions();
    let edge = frame.export_edge(width, height);
    let export_edge = edge as f32;
    let projection = preview_to_export_scale(frame.preview_frame_edge(), export_edge);
    let offset = Point::new(view.offset_x * projection, view.offset_y * projection);
    let center = Point::new(export_edge / 2.0, export_edge / 2.0);

    let window = source_window(width, height, export_edge, view.scale, offset, center);
    let source = clamp_source_rect(window, width, height);
    if source != window {
        warn!(
            ?window,
            ?source,
            "export read rectangle exceeded the source image; shrunk to fit"
        );
    }

    ExportPlan {
        edge,
        projection,
        source,
        clip: frame.export_clip(export_edge, view),
    }
}

/// Rasterize `plan` with the hard clip applied. Pixels outside the clip are
/// fully transparent.
pub fn render_export(plan: &ExportPlan, image: &LoadedImage) -> Result<RgbaImage> {
    let mask = clip_mask(plan.edge, plan.edge, &plan.clip)?;
    render_window(plan, image, Some(&mask))
}

/// Rasterize the plan's source window onto the export canvas with no clip.
pub fn render_export_unclipped(plan: &ExportPlan, image: &LoadedImage) -> Result<RgbaImage> {
    render_window(plan, image, None)
}

fn render_window(
    plan: &ExportPlan,
    image: &LoadedImage,
    mask: Option<&tiny_skia::Mask>,
) -> Result<RgbaImage> {
    let mut canvas = new_pixmap(plan.edge, plan.edge)?;
    let edge = plan.edge as f32;
    draw_image(
        &mut canvas,
        image.pixmap(),
        plan.source,
        Rect::new(0.0, 0.0, edge, edge),
        FilterQuality::Bicubic,
        mask,
    );
    Ok(rgba_from_pixmap(&canvas))
}

/// `<tool>-<YYYYMMDDHHmmss>.png`
pub fn export_file_name(kind: FrameKind, at: NaiveDateTime) -> String {
    format!("{}-{}.png", kind.tool_slug(), at.format("%Y%m%d%H%M%S"))
}

/// Render, encode and name the export for `view`.
pub fn export(
    frame: &Frame,
    image: &LoadedImage,
    view: &ViewState,
    at: NaiveDateTime,
) -> Result<ExportedImage> {
    let plan = plan_export(frame, image, view);
    let raster = render_export(&plan, image)?;
    let png = encode_png(&raster)?;
    let file_name = export_file_name(frame.kind, at);

    info!(
        file = %file_name,
        edge = plan.edge,
        bytes = png.len(),
        "export complete"
    );

    Ok(ExportedImage {
        file_name,
        mime_type: EXPORT_MIME_TYPE,
        width: plan.edge,
        height: plan.edge,
        png,
    })
}
