use super::*;
use crate::layers::model::LayerPatch;

fn state_with(positions: &[(f64, f64)]) -> (EditorState, Vec<LayerId>) {
    let mut state = EditorState::new();
    let ids = positions
        .iter()
        .map(|&(x, y)| {
            let id = state.add_layer("T");
            state.update_layer(id, &LayerPatch::position(x, y));
            id
        })
        .collect();
    (state, ids)
}

#[test]
fn nearest_prefers_closer_anchor() {
    let (state, ids) = state_with(&[(50.0, 50.0), (52.0, 51.0)]);
    assert_eq!(state.find_nearest(Point::new(51.0, 50.5)), Some(ids[0]));
    assert_eq!(state.find_nearest(Point::new(53.0, 51.0)), Some(ids[1]));
}

#[test]
fn ties_go_to_first_in_list_order() {
    let (state, ids) = state_with(&[(40.0, 50.0), (60.0, 50.0)]);
    assert_eq!(state.find_nearest(Point::new(50.0, 50.0)), Some(ids[0]));
}

#[test]
fn radius_is_strict() {
    let (state, ids) = state_with(&[(50.0, 50.0)]);
    assert_eq!(state.find_nearest(Point::new(65.0, 50.0)), None);
    assert_eq!(state.find_nearest(Point::new(64.99, 50.0)), Some(ids[0]));
    assert_eq!(state.find_nearest(Point::new(50.0, 80.0)), None);
}

#[test]
fn never_returns_layer_at_or_beyond_radius() {
    let (state, _) = state_with(&[(10.0, 10.0), (90.0, 90.0), (50.0, 20.0)]);
    for gx in 0..=20 {
        for gy in 0..=20 {
            let p = Point::new(f64::from(gx) * 5.0, f64::from(gy) * 5.0);
            if let Some(id) = state.find_nearest(p) {
                let layer = state.layer(id).unwrap();
                assert!(layer.anchor().distance(p) < SELECTION_RADIUS);
            } else {
                assert!(
                    state
                        .layers()
                        .iter()
                        .all(|l| l.anchor().distance(p) >= SELECTION_RADIUS)
                );
            }
        }
    }
}

#[test]
fn blank_layers_are_selectable() {
    let mut state = EditorState::new();
    let id = state.add_layer("   ");
    assert_eq!(state.find_nearest(Point::new(50.0, 50.0)), Some(id));
}

#[test]
fn empty_list_and_nan_pointer_select_nothing() {
    let state = EditorState::new();
    assert_eq!(state.find_nearest(Point::new(50.0, 50.0)), None);

    let (state, _) = state_with(&[(50.0, 50.0)]);
    assert_eq!(state.find_nearest(Point::new(f64::NAN, 50.0)), None);
}
