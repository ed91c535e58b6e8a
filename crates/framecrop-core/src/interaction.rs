//! Turns pointer, touch, wheel and radius events into view-state commits.
//!
//! Every mutation is clamped before it is stored, so a committed view always
//! satisfies the coverage invariant.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{MAX_FRAME_RADIUS, MAX_SCALE, MIN_SCALE, SCALE_STEP};
use crate::frame::Frame;
use crate::geometry::{clamp_offset, Point};
use crate::view::ViewState;
use crate::viewport::{PointerInput, Viewport};

/// Input delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InputEvent {
    PointerDown(PointerInput),
    PointerMove(PointerInput),
    PointerUp,
    PointerLeave,
    TouchStart(PointerInput),
    TouchMove(PointerInput),
    TouchEnd,
    /// Negative `delta_y` zooms in, positive zooms out.
    Wheel { delta_y: f32 },
    /// Ratio between the current and previous finger spread.
    Pinch { scale_delta: f32 },
    /// New corner radius in reference export pixels (rounded rect only).
    SetRadius { radius: f32 },
}

/// Captured at drag start: `offset = pointer - anchor` while dragging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub anchor_x: f32,
    pub anchor_y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    /// Drop any drag in progress, e.g. when the image is replaced.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Apply one event. Returns true if `view` changed.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        frame: &Frame,
        image_size: (u32, u32),
        view: &mut ViewState,
        viewport: &dyn Viewport,
    ) -> bool {
        match event {
            InputEvent::PointerDown(pointer) | InputEvent::TouchStart(pointer) => {
                self.begin_drag(viewport.to_canvas(pointer), frame, image_size, view);
                false
            }
            InputEvent::PointerMove(pointer) | InputEvent::TouchMove(pointer) => {
                self.drag_to(viewport.to_canvas(pointer), frame, image_size, view)
            }
            InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::TouchEnd => {
                if self.is_dragging() {
                    debug!("drag ended");
                }
                self.state = InteractionState::Idle;
                false
            }
            InputEvent::Wheel { delta_y } => {
                let direction = if *delta_y < 0.0 {
                    1
                } else if *delta_y > 0.0 {
                    -1
                } else {
                    0
                };
                self.zoom(direction, frame, image_size, view)
            }
            InputEvent::Pinch { scale_delta } => {
                let direction = if !scale_delta.is_finite() {
                    0
                } else if *scale_delta > 1.0 {
                    1
                } else if *scale_delta < 1.0 {
                    -1
                } else {
                    0
                };
                self.zoom(direction, frame, image_size, view)
            }
            InputEvent::SetRadius { radius } => Self::set_radius(*radius, view),
        }
    }

    fn begin_drag(&mut self, point: Point, frame: &Frame, image_size: (u32, u32), view: &ViewState) {
        self.state = InteractionState::Idle;
        let (width, height) = image_size;
        if !frame.drawn_rect(width, height, view).contains(point) {
            return;
        }
        let session = DragSession {
            anchor_x: point.x - view.offset_x,
            anchor_y: point.y - view.offset_y,
        };
        debug!(?session, "drag started");
        self.state = InteractionState::Dragging(session);
    }

    fn drag_to(
        &mut self,
        point: Point,
        frame: &Frame,
        image_size: (u32, u32),
        view: &mut ViewState,
    ) -> bool {
        let InteractionState::Dragging(session) = self.state else {
            return false;
        };
        let (width, height) = image_size;
        let bounds = frame.offset_bounds(width, height, view.scale);
        let x = clamp_offset(point.x - session.anchor_x, bounds.min_x, bounds.max_x);
        let y = clamp_offset(point.y - session.anchor_y, bounds.min_y, bounds.max_y);
        if x == view.offset_x && y == view.offset_y {
            return false;
        }
        view.offset_x = x;
        view.offset_y = y;
        true
    }

    /// Step the scale one notch in `direction` (+1 in, -1 out). Offsets are
    /// re-clamped afterwards since the drawn size changed.
    fn zoom(
        &mut self,
        direction: i8,
        frame: &Frame,
        image_size: (u32, u32),
        view: &mut ViewState,
    ) -> bool {
        if direction == 0 {
            return false;
        }
        let target = snap_scale(view.scale + f32::from(direction) * SCALE_STEP);
        if target == view.scale {
            return false;
        }
        view.scale = target;
        let (width, height) = image_size;
        frame.clamp_view(width, height, view);
        debug!(scale = view.scale, offset_x = view.offset_x, offset_y = view.offset_y, "zoom");
        true
    }

    /// Radius only moves where the corners are cut; coverage is measured
    /// against the full square, so offsets are left alone.
    fn set_radius(radius: f32, view: &mut ViewState) -> bool {
        let Some(current) = view.frame_radius else {
            return false;
        };
        let radius = if radius.is_finite() { radius } else { current };
        let radius = radius.clamp(0.0, MAX_FRAME_RADIUS);
        if radius == current {
            return false;
        }
        view.frame_radius = Some(radius);
        true
    }

    /// Place the view directly (scripted or restored placement). Scale is
    /// clamped to its domain and offsets to the resulting bounds.
    pub fn place(
        &mut self,
        frame: &Frame,
        image_size: (u32, u32),
        view: &mut ViewState,
        scale: f32,
        offset: Point,
    ) -> bool {
        let before = *view;
        view.scale = if scale.is_finite() {
            scale.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            MIN_SCALE
        };
        view.offset_x = offset.x;
        view.offset_y = offset.y;
        let (width, height) = image_size;
        frame.clamp_view(width, height, view);
        *view != before
    }
}

/// Snap to the zoom step grid and clamp to the scale domain, so repeated
/// steps never accumulate float drift.
fn snap_scale(scale: f32) -> f32 {
    ((scale / SCALE_STEP).round() * SCALE_STEP).clamp(MIN_SCALE, MAX_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_scale_reaches_bounds_exactly() {
        let mut scale = MIN_SCALE;
        for _ in 0..10 {
            scale = snap_scale(scale + SCALE_STEP);
        }
        assert_eq!(scale, MAX_SCALE);
        assert_eq!(snap_scale(scale + SCALE_STEP), MAX_SCALE);
        assert_eq!(snap_scale(0.3), MIN_SCALE);
    }
}
