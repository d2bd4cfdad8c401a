use cover_core::units::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_inch_pixel_round_trip() {
    assert_eq!(inches_to_pixels(3.5, 96.0), 336.0);
    assert_eq!(pixels_to_inches(336.0, 96.0), 3.5);
}

#[test]
fn test_inch_point_conversion() {
    assert_eq!(inches_to_points(5.5), 396.0);
    assert_eq!(points_to_inches(72.0), 1.0);
}

#[test]
fn test_font_size_goes_through_inches() {
    // 72pt is one inch tall at any scale
    assert_eq!(font_size_to_pixels(72.0, 96.0), 96.0);
    assert_eq!(font_size_to_pixels(36.0, 200.0), 100.0);
}

#[test]
fn test_wrap_width() {
    for spine in [0.0625, 0.125, 0.25, 0.5] {
        assert!(approx(get_wrap_width(spine), 7.0 + spine));
    }
}

#[test]
fn test_fold_line_positions() {
    let folds = get_fold_line_positions(0.25);
    assert_eq!(folds.back_fold, 3.5);
    assert_eq!(folds.front_fold, 3.75);
}

#[test]
fn test_wrap_dimensions_with_and_without_bleed() {
    let plain = get_wrap_dimensions(0.125, false, 0.125);
    assert!(approx(plain.width, 7.125));
    assert!(approx(plain.height, 5.5));

    let bled = get_wrap_dimensions(0.125, true, 0.125);
    assert!(approx(bled.width, 7.375));
    assert!(approx(bled.height, 5.75));
}

#[test]
fn test_effective_dpi_examples() {
    let dpi = calculate_effective_dpi(1500.0, 1500.0, 5.0, 5.0);
    assert_eq!(dpi.min_dpi, 300.0);
    assert!(is_dpi_adequate(dpi.min_dpi, 150.0));

    let dpi = calculate_effective_dpi(300.0, 300.0, 5.0, 5.0);
    assert_eq!(dpi.min_dpi, 60.0);
    assert!(!is_dpi_adequate(dpi.min_dpi, 150.0));
}

#[test]
fn test_effective_dpi_takes_smaller_axis() {
    let dpi = calculate_effective_dpi(600.0, 300.0, 2.0, 2.0);
    assert_eq!(dpi.width_dpi, 300.0);
    assert_eq!(dpi.height_dpi, 150.0);
    assert_eq!(dpi.min_dpi, 150.0);
    assert!(is_print_dpi_adequate(dpi.min_dpi));
}

#[test]
fn test_shrinking_placement_raises_dpi() {
    let mut previous = 0.0;
    for placed in [4.0, 3.0, 2.0, 1.0] {
        let dpi = calculate_effective_dpi(1200.0, 900.0, placed, placed).min_dpi;
        assert!(dpi > previous);
        previous = dpi;
    }
}

#[test]
fn test_formatting() {
    assert_eq!(format_inches(3.5, 3), "3.500\"");
    assert_eq!(format_inches(0.1875, 1), "0.2\"");
    assert_eq!(format_millimeters(1.0), "25.4 mm");
}
