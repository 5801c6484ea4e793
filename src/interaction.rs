//! Pointer state machine: selection and drag-to-reposition.
//!
//! Device coordinates are converted to percentage space through the canvas' *displayed* bounding
//! box, so selection and dragging are independent of how the canvas is scaled on screen.

use crate::foundation::core::{Point, Rect};
use crate::layers::model::{EditorState, LayerPatch};

/// Observable phase of the pointer interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionPhase {
    /// Nothing selected.
    Idle,
    /// A layer is active, no drag in progress.
    Selected,
    /// Pointer is down on the active layer and moves reposition it.
    Dragging,
}

/// Raw pointer sample.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerInput {
    Mouse { client: Point },
    /// Touch samples; only the first point is used.
    Touch { touches: Vec<Point> },
}

impl PointerInput {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse {
            client: Point::new(x, y),
        }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self::Touch {
            touches: vec![Point::new(x, y)],
        }
    }

    fn primary(&self) -> Option<Point> {
        match self {
            Self::Mouse { client } => Some(*client),
            Self::Touch { touches } => touches.first().copied(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Down(PointerInput),
    Move(PointerInput),
    Up,
    Leave,
}

/// Client-space box the canvas currently occupies on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRect(pub Rect);

impl DisplayRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self(Rect::new(left, top, left + width, top + height))
    }

    /// Convert a client point to canvas percentage coordinates.
    ///
    /// Returns `None` for degenerate boxes. The result is not clamped; points outside the box map
    /// outside `0..=100`.
    pub fn to_percent(&self, client: Point) -> Option<Point> {
        let (w, h) = (self.0.width(), self.0.height());
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return None;
        }
        Some(Point::new(
            (client.x - self.0.x0) / w * 100.0,
            (client.y - self.0.y0) / h * 100.0,
        ))
    }
}

/// Turns pointer events into [`EditorState`] mutations.
///
/// The phase lives in the state itself (`dragging` flag + active layer), so external edits such
/// as removing the active layer can never leave the controller out of sync.
#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionController;

impl InteractionController {
    pub fn new() -> Self {
        Self
    }

    pub fn phase(&self, state: &EditorState) -> InteractionPhase {
        if state.is_dragging() {
            InteractionPhase::Dragging
        } else if state.active_layer().is_some() {
            InteractionPhase::Selected
        } else {
            InteractionPhase::Idle
        }
    }

    /// Apply one pointer event. Returns whether the state changed in a way that needs a redraw.
    pub fn handle(
        &self,
        state: &mut EditorState,
        display: DisplayRect,
        event: &PointerEvent,
    ) -> bool {
        match event {
            PointerEvent::Down(input) => {
                let Some(p) = input.primary().and_then(|c| display.to_percent(c)) else {
                    return false;
                };
                let before = state.active_id();
                match state.find_nearest(p) {
                    Some(id) => {
                        tracing::trace!(%id, x = p.x, y = p.y, "pointer down on layer");
                        state.set_active(Some(id));
                        state.set_dragging(true);
                    }
                    None => {
                        state.set_active(None);
                        state.set_dragging(false);
                    }
                }
                state.active_id() != before
            }
            PointerEvent::Move(input) => {
                if !state.is_dragging() {
                    return false;
                }
                let Some(p) = input.primary().and_then(|c| display.to_percent(c)) else {
                    return false;
                };
                match state.active_id() {
                    Some(id) => state.update_layer(id, &LayerPatch::position(p.x, p.y)),
                    None => false,
                }
            }
            PointerEvent::Up | PointerEvent::Leave => {
                state.set_dragging(false);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/interaction.rs"]
mod tests;
