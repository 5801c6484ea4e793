use super::*;
use crate::foundation::core::Point;
use crate::layers::model::{EditorState, LayerPatch};

fn kinds(plan: &RenderPlan) -> Vec<&'static str> {
    plan.ops
        .iter()
        .map(|op| match op {
            DrawOp::SelectionBox(_) => "selection",
            DrawOp::TextStroke(_) => "stroke",
            DrawOp::TextFill(_) => "fill",
        })
        .collect()
}

#[test]
fn empty_layer_list_compiles_to_base_only() {
    let plan = compile_frame(Canvas::CANONICAL, &[], None);
    assert_eq!(plan.canvas, Canvas::CANONICAL);
    assert!(plan.ops.is_empty());
}

#[test]
fn layers_paint_in_list_order_with_selection_first() {
    let mut state = EditorState::new();
    let a = state.add_layer("first");
    let b = state.add_layer("second");

    let plan = compile_frame(Canvas::CANONICAL, state.layers(), Some(b));
    assert_eq!(
        kinds(&plan),
        ["stroke", "fill", "selection", "stroke", "fill"]
    );
    assert_eq!(plan.ops[0].run().text, "FIRST");
    assert_eq!(plan.ops[2].run().text, "SECOND");

    let plan = compile_frame(Canvas::CANONICAL, state.layers(), Some(a));
    assert_eq!(
        kinds(&plan),
        ["selection", "stroke", "fill", "stroke", "fill"]
    );
}

#[test]
fn blank_layers_are_skipped_even_when_active() {
    let mut state = EditorState::new();
    let blank = state.add_layer("   ");
    state.add_layer("kept");

    let plan = compile_frame(Canvas::CANONICAL, state.layers(), Some(blank));
    assert_eq!(kinds(&plan), ["stroke", "fill"]);
    assert_eq!(state.layers().len(), 2);
}

#[test]
fn runs_are_anchored_in_canvas_pixels_and_uppercased() {
    let mut state = EditorState::new();
    let id = state.add_layer("Big Win");
    state.update_layer(id, &LayerPatch::position(25.0, 75.0));

    let plan = compile_frame(Canvas::CANONICAL, state.layers(), None);
    let run = plan.ops[0].run();
    assert_eq!(run.anchor, Point::new(320.0, 540.0));
    assert_eq!(run.text, "BIG WIN");
    assert_eq!(run.size_px, 120.0);
}

#[test]
fn stroke_carries_shadow_and_fill_does_not() {
    let mut state = EditorState::new();
    state.add_layer("x");
    let plan = compile_frame(Canvas::CANONICAL, state.layers(), None);

    let DrawOp::TextStroke(stroke) = &plan.ops[0] else {
        panic!("expected stroke first");
    };
    let shadow = stroke.shadow.unwrap();
    assert_eq!(shadow.sigma, 10.0);
    assert_eq!(shadow.radius_px, 30);
    assert_eq!(shadow.color, Color::rgba(0, 0, 0, 230));
    assert_eq!(stroke.color, Color::BLACK);

    let DrawOp::TextFill(fill) = &plan.ops[1] else {
        panic!("expected fill second");
    };
    assert_eq!(fill.color, Color::WHITE);
}

#[test]
fn outline_width_has_a_floor() {
    assert_eq!(outline_width(40), 6.0);
    assert_eq!(outline_width(42), 6.0);
    assert_eq!(outline_width(140), 20.0);
    assert_eq!(outline_width(500), 500.0 / 7.0);
}
