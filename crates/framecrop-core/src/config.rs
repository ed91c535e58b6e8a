use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CIRCLE_PADDING, DEFAULT_DIM_ALPHA, DEFAULT_EXPORT_SIZE, DEFAULT_FRAME_RADIUS,
    DEFAULT_PREVIEW_SIZE, DEFAULT_STROKE_WIDTH, MAX_FRAME_RADIUS,
};
use crate::frame::{ExportSize, Frame, FrameKind};
use crate::render::PreviewStyle;

/// Settings of one tool instance, loadable from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub kind: FrameKind,
    #[serde(default = "default_preview_size")]
    pub preview_size: u32,
    /// Circle clip inset on the preview canvas.
    #[serde(default)]
    pub padding: f32,
    pub export_size: ExportSize,
    /// Initial corner radius in reference pixels (rounded rect only).
    #[serde(default)]
    pub default_radius: f32,
    #[serde(default = "default_dim_alpha")]
    pub dim_alpha: u8,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
}

fn default_preview_size() -> u32 {
    DEFAULT_PREVIEW_SIZE
}

fn default_dim_alpha() -> u8 {
    DEFAULT_DIM_ALPHA
}

fn default_stroke_width() -> f32 {
    DEFAULT_STROKE_WIDTH
}

impl ToolConfig {
    pub fn circle() -> Self {
        Self {
            kind: FrameKind::Circle,
            preview_size: DEFAULT_PREVIEW_SIZE,
            padding: DEFAULT_CIRCLE_PADDING,
            export_size: ExportSize::SourceShorterSide,
            default_radius: 0.0,
            dim_alpha: DEFAULT_DIM_ALPHA,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    pub fn rounded() -> Self {
        Self {
            kind: FrameKind::RoundedRect,
            preview_size: DEFAULT_PREVIEW_SIZE,
            padding: 0.0,
            export_size: ExportSize::Fixed(DEFAULT_EXPORT_SIZE),
            default_radius: DEFAULT_FRAME_RADIUS,
            dim_alpha: DEFAULT_DIM_ALPHA,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    pub fn for_kind(kind: FrameKind) -> Self {
        match kind {
            FrameKind::Circle => Self::circle(),
            FrameKind::RoundedRect => Self::rounded(),
        }
    }

    /// Copy with every field forced into its valid domain.
    pub fn sanitized(&self) -> Self {
        let preview_size = self.preview_size.max(1);
        let max_padding = (preview_size as f32 - 1.0) / 2.0;
        let padding = match self.kind {
            FrameKind::Circle if self.padding.is_finite() => self.padding.clamp(0.0, max_padding),
            _ => 0.0,
        };
        let export_size = match self.export_size {
            ExportSize::Fixed(edge) => ExportSize::Fixed(edge.max(1)),
            other => other,
        };
        let default_radius = if self.default_radius.is_finite() {
            self.default_radius.clamp(0.0, MAX_FRAME_RADIUS)
        } else {
            DEFAULT_FRAME_RADIUS
        };
        let stroke_width = if self.stroke_width.is_finite() {
            self.stroke_width.max(0.0)
        } else {
            DEFAULT_STROKE_WIDTH
        };

        Self {
            kind: self.kind,
            preview_size,
            padding,
            export_size,
            default_radius,
            dim_alpha: self.dim_alpha,
            stroke_width,
        }
    }

    pub fn frame(&self) -> Frame {
        let config = self.sanitized();
        let frame = match config.kind {
            FrameKind::Circle => Frame::circle(config.preview_size, config.padding),
            FrameKind::RoundedRect => Frame::rounded_rect(config.preview_size, DEFAULT_EXPORT_SIZE),
        };
        frame.with_export_size(config.export_size)
    }

    pub fn preview_style(&self) -> PreviewStyle {
        let config = self.sanitized();
        PreviewStyle {
            dim_alpha: config.dim_alpha,
            stroke_width: config.stroke_width,
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self::circle()
    }
}
