use crate::foundation::core::Point;
use crate::layers::model::{EditorState, LayerId, TextLayer};

/// Pointer must land strictly closer than this to a layer anchor (percentage units).
pub const SELECTION_RADIUS: f64 = 15.0;

/// Nearest layer anchor to `p` within [`SELECTION_RADIUS`].
///
/// `p` is in percentage space. Selection is anchor-based, so blank layers are eligible. Ties go
/// to the earlier layer in list order.
pub fn find_nearest(layers: &[TextLayer], p: Point) -> Option<LayerId> {
    let mut best: Option<(LayerId, f64)> = None;
    for layer in layers {
        let d = layer.anchor().distance(p);
        if d.is_nan() || d >= SELECTION_RADIUS {
            continue;
        }
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((layer.id, d)),
        }
    }
    best.map(|(id, _)| id)
}

impl EditorState {
    pub fn find_nearest(&self, p: Point) -> Option<LayerId> {
        find_nearest(self.layers(), p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/hit.rs"]
mod tests;
