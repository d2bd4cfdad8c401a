use cover_core::geometry::{CornerSet, Point};
use cover_core::render::*;
use cover_core::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn fixture() -> Document {
    create_default_document_with(&mut SequentialIds::new("obj"))
}

fn text_op<'a>(list: &'a DrawList, id: &str) -> &'a TextOp {
    match list.ops_for(id).next() {
        Some(DrawOp::Text(op)) => op,
        other => panic!("expected text op for {}, got {:?}", id, other),
    }
}

#[test]
fn test_hidden_object_emits_nothing() {
    let mut doc = fixture();
    doc.front.objects[0].visible = false;
    let id = doc.front.objects[0].id.clone();

    for mode in [PresentationMode::Panel(Side::Front), PresentationMode::Wrap] {
        let list = project(&doc, &Viewport::new(96.0), mode);
        assert_eq!(list.ops_for(&id).count(), 0);
    }
}

#[test]
fn test_transparent_object_still_emits() {
    let mut doc = fixture();
    doc.front.objects[0].opacity = 0.0;
    let id = doc.front.objects[0].id.clone();

    let list = project(&doc, &Viewport::new(96.0), PresentationMode::Panel(Side::Front));
    assert_eq!(text_op(&list, &id).object.opacity, 0.0);
}

#[test]
fn test_panel_mode_order() {
    let doc = fixture();
    let list = project(&doc, &Viewport::new(96.0), PresentationMode::Panel(Side::Back));

    assert!(matches!(list.ops.first(), Some(DrawOp::Background(bg)) if bg.side == Side::Back));
    let ids: Vec<&str> = list.ops.iter().filter_map(|op| op.object_id()).collect();
    assert_eq!(ids, vec!["obj-4", "obj-5", "obj-6"]);

    let guides: Vec<&GuideOp> = list.guides().collect();
    assert_eq!(guides.len(), 1);
    assert_eq!(guides[0].kind, GuideKind::PanelOutline);
    assert!(guides[0].dash.is_empty());
    assert!(matches!(list.ops.last(), Some(DrawOp::Guide(_))));
}

#[test]
fn test_wrap_mode_order_and_front_offset() {
    let mut doc = fixture();
    doc.settings.spine_width = 0.25;
    let list = project(&doc, &Viewport::new(100.0), PresentationMode::Wrap);

    let ids: Vec<&str> = list.ops.iter().filter_map(|op| op.object_id()).collect();
    assert_eq!(ids, vec!["obj-4", "obj-5", "obj-6", "obj-1", "obj-2", "obj-3"]);

    // front title sits at x = 0.375 in its own panel
    let front = text_op(&list, "obj-1");
    assert!(approx(front.object.origin.x, (0.375 + 3.5 + 0.25) * 100.0));
    let back = text_op(&list, "obj-4");
    assert!(approx(back.object.origin.x, 0.375 * 100.0));
}

#[test]
fn test_wrap_backgrounds_span_spine() {
    let doc = fixture();
    let backgrounds = wrap_backgrounds(&doc, &Viewport::new(100.0));
    assert_eq!(backgrounds.len(), 2);

    let back = &backgrounds[0];
    assert_eq!(back.side, Side::Back);
    assert_eq!(back.outline.corners, CornerSet::LEFT);
    assert!(approx(back.outline.rect.width(), 362.5));

    let front = &backgrounds[1];
    assert_eq!(front.side, Side::Front);
    assert_eq!(front.outline.corners, CornerSet::RIGHT);
    assert!(approx(front.outline.rect.x0, 362.5));
    assert!(approx(front.outline.rect.width(), 350.0));
}

#[test]
fn test_text_alignment_and_line_offsets() {
    let obj = CanvasObject::new(
        "t",
        Position::new(1.0, 1.0),
        ObjectKind::Text(TextProps {
            content: "one\ntwo\nthree".to_string(),
            font_size: 36.0,
            line_height: 1.5,
            letter_spacing: 0.1,
            width: 2.0,
            text_align: TextAlign::Center,
            ..TextProps::default()
        }),
    );

    let Some(DrawOp::Text(op)) = project_object(&obj, Side::Front, 0.0, &Viewport::new(96.0)) else {
        panic!("expected text op");
    };

    // 36pt is half an inch
    assert!(approx(op.font_size, 48.0));
    assert!(approx(op.letter_spacing, 4.8));
    assert_eq!(op.lines.len(), 3);
    for (i, line) in op.lines.iter().enumerate() {
        assert!(approx(line.offset.x, 96.0));
        assert!(approx(line.offset.y, i as f64 * 72.0));
    }
    assert_eq!(op.lines[2].text, "three");

    let mut right = obj.clone();
    if let ObjectKind::Text(text) = &mut right.kind {
        text.text_align = TextAlign::Right;
    }
    let Some(DrawOp::Text(op)) = project_object(&right, Side::Front, 0.0, &Viewport::new(96.0)) else {
        panic!("expected text op");
    };
    assert!(approx(op.lines[0].offset.x, 192.0));
}

#[test]
fn test_image_projection_uses_fit_and_crop_flag() {
    let obj = CanvasObject::new(
        "img",
        Position::new(0.5, 0.5),
        ObjectKind::Image(ImageProps {
            src: "a.png".to_string(),
            size: Size::new(2.0, 1.0),
            fit: ImageFit::Contain,
            original_width: 100,
            original_height: 100,
            crop_to_corners: false,
        }),
    );

    let Some(DrawOp::Image(op)) = project_object(&obj, Side::Back, 0.0, &Viewport::new(10.0)) else {
        panic!("expected image op");
    };
    assert!(!op.clip_to_outline);
    assert!(approx(op.width, 20.0));
    assert!(approx(op.placement.dest.x0, 5.0));
    assert!(approx(op.placement.dest.width(), 10.0));
    assert!(approx(op.placement.dest.height(), 10.0));
}

#[test]
fn test_fit_modes() {
    let cover = resolve_fit(ImageFit::Cover, 2.0, 1.0, 100, 100);
    assert_eq!(cover.dest.width(), 2.0);
    assert!(approx(cover.crop.y0, 0.25));
    assert!(approx(cover.crop.height(), 0.5));

    let stretch = resolve_fit(ImageFit::Stretch, 2.0, 1.0, 100, 100);
    assert_eq!(stretch.dest.width(), 2.0);
    assert_eq!(stretch.crop.width(), 1.0);

    let original = resolve_fit(ImageFit::Original, 2.0, 1.0, 300, 600);
    assert!(approx(original.dest.width(), 2.0));
    assert!(approx(original.dest.height(), 4.0));

    let unknown = resolve_fit(ImageFit::Contain, 2.0, 1.0, 0, 0);
    assert_eq!(unknown.dest.width(), 2.0);
}

#[test]
fn test_wrap_guides_follow_settings_and_cut_line_is_last() {
    let mut doc = fixture();
    doc.settings.show_fold_lines = true;
    doc.settings.show_safe_area = true;
    doc.settings.show_centerline = true;

    let list = project(&doc, &Viewport::new(72.0), PresentationMode::Wrap);
    let kinds: Vec<GuideKind> = list.guides().map(|g| g.kind).collect();
    assert_eq!(
        kinds,
        vec![
            GuideKind::FoldLine,
            GuideKind::FoldLine,
            GuideKind::SafeArea,
            GuideKind::Centerline,
            GuideKind::CutLine,
        ]
    );

    let folds: Vec<f64> = list
        .guides()
        .filter_map(|g| match g.shape {
            GuideShape::Line { from, .. } if g.kind == GuideKind::FoldLine => Some(from.x),
            _ => None,
        })
        .collect();
    assert!(approx(folds[0], 252.0));
    assert!(approx(folds[1], 261.0));

    let none = project_guides(&doc, &Viewport::points(), GuideSet::default());
    assert_eq!(none.len(), 1);
    assert_eq!(none[0].kind, GuideKind::CutLine);
}

#[test]
fn test_cut_line_is_inset_by_half_its_width() {
    let doc = fixture();
    let guides = project_guides(&doc, &Viewport::points(), GuideSet::default());
    let GuideShape::Outline(outline) = guides[0].shape else {
        panic!("cut line should be an outline");
    };
    assert!(approx(outline.rect.x0, 0.5));
    assert!(approx(outline.rect.width(), doc.wrap_width() * 72.0 - 1.0));
}

#[test]
fn test_wrap_image_drawn_before_objects() {
    let mut doc = fixture();
    doc.wrap_image.enabled = true;
    doc.wrap_image.src = "wrap.png".to_string();

    let list = project(&doc, &Viewport::new(96.0), PresentationMode::Wrap);
    let wrap_index = list
        .ops
        .iter()
        .position(|op| matches!(op, DrawOp::WrapImage(_)))
        .unwrap();
    let first_object = list
        .ops
        .iter()
        .position(|op| op.object_id().is_some())
        .unwrap();
    assert_eq!(wrap_index, 2);
    assert!(wrap_index < first_object);
}

#[test]
fn test_viewport_origin_and_round_trip() {
    let viewport = Viewport::new(50.0).with_origin(Point::new(10.0, 20.0));
    let device = viewport.to_device(Point::new(1.0, 2.0));
    assert_eq!(device, Point::new(60.0, 120.0));
    assert_eq!(viewport.to_inches(device), Point::new(1.0, 2.0));
}

#[test]
fn test_retain_ready_drops_pending_images() {
    let mut doc = fixture();
    doc.wrap_image.enabled = true;
    doc.wrap_image.src = "wrap.png".to_string();
    let mut ids = SequentialIds::new("img");
    doc.front.objects.push(create_image_object(&mut ids, "logo.png", 300, 300));

    let mut registry = ImageRegistry::new();
    assert_eq!(registry.request_all(&doc), vec!["wrap.png", "logo.png"]);
    assert!(registry.request_all(&doc).is_empty());

    registry.resolve("logo.png", 300, 300);
    registry.fail("wrap.png");

    let mut list = project(&doc, &Viewport::new(96.0), PresentationMode::Wrap);
    list.retain_ready(&registry);
    assert!(!list.ops.iter().any(|op| matches!(op, DrawOp::WrapImage(_))));
    assert_eq!(list.ops_for("img-1").count(), 1);
    assert_eq!(registry.status("wrap.png"), Some(ImageStatus::Failed));
}

#[test]
fn test_registry_retries_failures_and_prunes_unused_sources() {
    let mut doc = fixture();
    let mut ids = SequentialIds::new("img");
    doc.front.objects.push(create_image_object(&mut ids, "logo.png", 300, 300));
    doc.back.objects.push(create_image_object(&mut ids, "old.png", 300, 300));

    let mut registry = ImageRegistry::new();
    registry.request_all(&doc);
    registry.fail("logo.png");
    registry.resolve("old.png", 300, 300);

    // a failed source is handed out again, a ready one is not
    assert_eq!(registry.request_all(&doc), vec!["logo.png"]);
    assert_eq!(registry.status("logo.png"), Some(ImageStatus::Pending));

    doc.back.objects.clear();
    registry.retain_referenced(&doc);
    assert_eq!(registry.status("old.png"), None);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_referenced_sources_skip_hidden_images() {
    let mut doc = fixture();
    let mut ids = SequentialIds::new("img");
    let mut hidden = create_image_object(&mut ids, "hidden.png", 10, 10);
    hidden.visible = false;
    doc.back.objects.push(hidden);
    doc.back.objects.push(create_image_object(&mut ids, "a.png", 10, 10));
    doc.front.objects.push(create_image_object(&mut ids, "a.png", 10, 10));

    assert_eq!(referenced_sources(&doc), vec!["a.png"]);
}
