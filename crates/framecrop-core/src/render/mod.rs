pub(crate) mod canvas;
pub mod export;
pub mod preview;

pub use canvas::encode_png;
pub use export::{
    export, export_file_name, plan_export, render_export, render_export_unclipped, ExportPlan,
    ExportedImage,
};
pub use preview::{PreviewRenderer, PreviewStyle};
