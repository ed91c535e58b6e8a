//! One crop tool instance: frame, session, controller, renderer and the
//! snapshot store, wired so that every committed event redraws once.

use chrono::NaiveDateTime;
use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::config::ToolConfig;
use crate::error::{FrameCropError, Result};
use crate::frame::Frame;
use crate::geometry::Point;
use crate::interaction::{InputEvent, InteractionController, InteractionState};
use crate::render::{export, ExportedImage, PreviewRenderer};
use crate::session::{SessionSnapshot, SessionStore};
use crate::source::{decode, SourceFile};
use crate::view::{CropSession, LoadedImage, ViewState};
use crate::viewport::{FixedViewport, Viewport};

/// Why the tool is being mounted. Only a language switch keeps the
/// previously selected file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountReason {
    FreshLoad,
    LanguageSwitch,
    HardRefresh,
}

pub struct CropTool<S: SessionStore> {
    frame: Frame,
    default_radius: f32,
    store: S,
    session: Option<CropSession>,
    controller: InteractionController,
    renderer: PreviewRenderer,
    preview: Option<RgbaImage>,
    render_count: u64,
}

impl<S: SessionStore> CropTool<S> {
    /// Build an empty tool without touching the store.
    pub fn new(config: &ToolConfig, store: S) -> Self {
        let config = config.sanitized();
        Self {
            frame: config.frame(),
            default_radius: config.default_radius,
            store,
            session: None,
            controller: InteractionController::new(),
            renderer: PreviewRenderer::new(config.preview_style()),
            preview: None,
            render_count: 0,
        }
    }

    /// Build a tool the way a page load does. A language switch restores the
    /// stored file; any other reason discards it.
    pub fn mount(config: &ToolConfig, store: S, reason: MountReason) -> Result<Self> {
        let mut tool = Self::new(config, store);
        match reason {
            MountReason::LanguageSwitch => tool.restore()?,
            MountReason::FreshLoad | MountReason::HardRefresh => {
                debug!(?reason, "clearing session snapshot");
                tool.store.clear()?;
            }
        }
        Ok(tool)
    }

    fn restore(&mut self) -> Result<()> {
        let snapshot = match self.store.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!("no session snapshot to restore");
                return Ok(());
            }
            Err(err) => {
                warn!(error = %err, "discarding unreadable session store");
                return self.store.clear();
            }
        };
        let image = match snapshot.to_source_file().and_then(decode) {
            Ok(image) => image,
            Err(err) => {
                warn!(error = %err, file = %snapshot.file_name, "discarding unreadable session snapshot");
                return self.store.clear();
            }
        };
        info!(file = %snapshot.file_name, "restored session snapshot");
        self.install(image)
    }

    /// Replace the current image. Nothing changes if the file fails to
    /// decode.
    pub fn open_file(&mut self, file: SourceFile) -> Result<()> {
        let snapshot = SessionSnapshot::from_source(&file);
        let image = decode(file)?;
        if let Err(err) = self.store.save(&snapshot) {
            warn!(error = %err, "failed to save session snapshot");
        }
        self.install(image)
    }

    fn install(&mut self, image: LoadedImage) -> Result<()> {
        let view = ViewState::initial(self.frame.kind, self.default_radius);
        self.controller.reset();
        self.session = Some(CropSession { image, view });
        self.redraw()
    }

    fn redraw(&mut self) -> Result<()> {
        let Some(session) = &self.session else {
            self.preview = None;
            return Ok(());
        };
        let preview = self
            .renderer
            .render(&self.frame, &session.image, &session.view)?;
        self.preview = Some(preview);
        self.render_count += 1;
        Ok(())
    }

    /// Feed one input event. Returns true if it committed a view change.
    pub fn handle(&mut self, event: &InputEvent, viewport: &dyn Viewport) -> Result<bool> {
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };
        let image_size = session.image.dimensions();
        let committed =
            self.controller
                .handle(event, &self.frame, image_size, &mut session.view, viewport);
        if committed {
            debug!(?event, view = ?session.view, "view committed");
            self.redraw()?;
        }
        Ok(committed)
    }

    pub fn set_frame_radius(&mut self, radius: f32) -> Result<bool> {
        self.handle(&InputEvent::SetRadius { radius }, &FixedViewport::default())
    }

    /// Put the view at an explicit placement, clamped like any interactive
    /// change. Redraws at most once.
    pub fn place(
        &mut self,
        scale: f32,
        offset_x: f32,
        offset_y: f32,
        radius: Option<f32>,
    ) -> Result<bool> {
        let Some(session) = self.session.as_mut() else {
            return Err(FrameCropError::NoImageLoaded);
        };
        let image_size = session.image.dimensions();
        let mut committed = self.controller.place(
            &self.frame,
            image_size,
            &mut session.view,
            scale,
            Point::new(offset_x, offset_y),
        );
        if let Some(radius) = radius {
            committed |= self.controller.handle(
                &InputEvent::SetRadius { radius },
                &self.frame,
                image_size,
                &mut session.view,
                &FixedViewport::default(),
            );
        }
        if committed {
            self.redraw()?;
        }
        Ok(committed)
    }

    /// Export the current view, named after `at`.
    pub fn export(&self, at: NaiveDateTime) -> Result<ExportedImage> {
        let session = self.session.as_ref().ok_or(FrameCropError::NoImageLoaded)?;
        export(&self.frame, &session.image, &session.view, at)
    }

    /// Drop the image and view. The stored snapshot is kept.
    pub fn close(&mut self) {
        self.session = None;
        self.preview = None;
        self.controller.reset();
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.session.as_ref().map(|s| &s.image)
    }

    pub fn view(&self) -> Option<&ViewState> {
        self.session.as_ref().map(|s| &s.view)
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.controller.state()
    }

    /// Last rendered preview canvas.
    pub fn preview(&self) -> Option<&RgbaImage> {
        self.preview.as_ref()
    }

    /// Number of preview renders since the tool was built.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
