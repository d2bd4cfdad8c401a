use cover_core::constants::{
    CORNER_RADIUS, MAX_SPINE_WIDTH, MIN_SPINE_WIDTH, PANEL_HEIGHT, PANEL_WIDTH,
};
use cover_core::export::clip_mask;
use cover_core::geometry::*;
use cover_core::render::{PresentationMode, Viewport, project};
use cover_core::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn curve_controls(path: &BezPath) -> Vec<Point> {
    path.elements()
        .iter()
        .filter_map(|el| match *el {
            PathEl::QuadTo(ctrl, _) => Some(ctrl),
            _ => None,
        })
        .collect()
}

#[test]
fn test_wrap_outline_rounds_only_outer_corners() {
    let mut doc = create_default_document();
    doc.settings.spine_width = 0.25;
    let outline = cover_outline(&doc, OutlineRole::Wrap);
    let path = outline.to_path();

    assert_eq!(curve_count(&path), 4);
    let controls = curve_controls(&path);
    let at_left = controls.iter().filter(|p| approx(p.x, 0.0)).count();
    let at_right = controls.iter().filter(|p| approx(p.x, 7.25)).count();
    assert_eq!(at_left, 2);
    assert_eq!(at_right, 2);

    // nothing bends at the spine folds
    for p in &controls {
        assert!(!approx(p.x, 3.5) && !approx(p.x, 3.75));
    }
}

#[test]
fn test_wrap_corners_stay_off_the_folds_for_every_spine() {
    for spine in [MIN_SPINE_WIDTH, 0.125, 0.3, MAX_SPINE_WIDTH] {
        let mut doc = create_default_document();
        doc.settings.spine_width = spine;
        let path = cover_outline(&doc, OutlineRole::Wrap).to_path();

        assert_eq!(curve_count(&path), 4, "spine {}", spine);
        let folds = [PANEL_WIDTH, PANEL_WIDTH + spine];
        for p in curve_controls(&path) {
            for fold in folds {
                assert!(
                    !approx(p.x, fold),
                    "control point {:?} sits on the fold at {} (spine {})",
                    p,
                    fold,
                    spine
                );
            }
        }
    }
}

#[test]
fn test_panel_outlines_round_their_outer_edge() {
    let doc = create_default_document();

    let front = cover_outline(&doc, OutlineRole::Panel(Side::Front)).to_path();
    assert_eq!(curve_count(&front), 2);
    assert!(curve_controls(&front).iter().all(|p| approx(p.x, PANEL_WIDTH)));

    let back = cover_outline(&doc, OutlineRole::Panel(Side::Back)).to_path();
    assert_eq!(curve_count(&back), 2);
    assert!(curve_controls(&back).iter().all(|p| approx(p.x, 0.0)));
}

#[test]
fn test_corner_sets_for_roles() {
    assert_eq!(CornerSet::for_role(OutlineRole::Wrap).rounded_count(), 4);
    assert_eq!(CornerSet::for_role(OutlineRole::Panel(Side::Front)), CornerSet::RIGHT);
    assert_eq!(CornerSet::for_role(OutlineRole::Panel(Side::Back)), CornerSet::LEFT);
    assert_eq!(CornerSet::NONE.rounded_count(), 0);
}

#[test]
fn test_outline_geometry_matches_document() {
    let doc = create_default_document();
    let outline = cover_outline(&doc, OutlineRole::Wrap);
    assert!(approx(outline.rect.width(), doc.wrap_width()));
    assert_eq!(outline.rect.height(), PANEL_HEIGHT);
    assert_eq!(outline.radius, CORNER_RADIUS);
}

#[test]
fn test_radius_is_capped_to_half_the_short_side() {
    let mut path = BezPath::new();
    trace_outline(&mut path, rect_xywh(0.0, 0.0, 1.0, 0.5), 10.0, CornerSet::ALL);

    // top edge starts where the top-left curve ends
    assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(0.25, 0.0)));
    assert_eq!(curve_count(&path), 4);
}

#[test]
fn test_square_outline_has_no_curves() {
    let path = Outline::new(rect_xywh(0.0, 0.0, 2.0, 1.0), 0.5, CornerSet::NONE).to_path();
    assert_eq!(curve_count(&path), 0);
    assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
}

#[test]
fn test_projected_wrap_clip_matches_outline_in_device_units() {
    let doc = create_default_document();
    let list = project(&doc, &Viewport::new(96.0), PresentationMode::Wrap);

    assert!(approx(list.width, 684.0));
    assert!(approx(list.height, 528.0));
    assert_eq!(list.clip.corners, CornerSet::ALL);
    assert!(approx(list.clip.radius, 36.0));

    let panel = project(&doc, &Viewport::new(96.0), PresentationMode::Panel(Side::Front));
    assert_eq!(panel.clip.corners, CornerSet::RIGHT);
    assert!(approx(panel.width, 336.0));
}

#[test]
fn test_clip_mask_excludes_rounded_corners_only() {
    let outline = Outline::new(rect_xywh(0.0, 0.0, 100.0, 60.0), 20.0, CornerSet::RIGHT);
    let mask = clip_mask(&outline, 100, 60).unwrap();
    let at = |x: usize, y: usize| mask.data()[y * 100 + x];

    assert!(at(0, 0) > 250);
    assert!(at(0, 59) > 250);
    assert_eq!(at(99, 0), 0);
    assert_eq!(at(99, 59), 0);
    assert!(at(50, 30) > 250);
}

#[test]
fn test_rotated_placement_round_trips() {
    let t = placement(Point::new(1.0, 2.0), 30.0);
    let p = Point::new(0.4, 0.7);
    let back = t.inverse() * (t * p);
    assert!(approx(back.x, p.x));
    assert!(approx(back.y, p.y));
}
