//! PDF content stream operators for guides and text
//!
//! Everything here is written in the flipped, y-down user space that the
//! page content establishes after placing the raster (`1 0 0 -1 0 H cm`),
//! so projector coordinates in points can be used as-is.

use std::fmt::Write as _;

use crate::constants::STANDARD_FONT_ASCENT_RATIO;
use crate::geometry::{BezPath, PathEl, Point};
use crate::model::TextAlign;
use crate::render::{GuideOp, GuideShape, TextOp};

use super::color::{parse_color, pdf_components};
use super::fonts::StandardFont;

/// Format a number for a content stream: at most three decimals, no
/// trailing zeros
pub fn num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".to_string(),
        _ => s.to_string(),
    }
}

/// PDF path construction operators for `path`. Quadratic curves are raised
/// to cubic.
pub fn path_ops(path: &BezPath) -> String {
    let mut ops = String::new();
    let mut current = Point::ZERO;
    let mut start = Point::ZERO;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(to) => {
                let _ = writeln!(ops, "{} {} m", num(to.x), num(to.y));
                current = to;
                start = to;
            }
            PathEl::LineTo(to) => {
                let _ = writeln!(ops, "{} {} l", num(to.x), num(to.y));
                current = to;
            }
            PathEl::QuadTo(ctrl, to) => {
                let c1 = current.lerp(ctrl, 2.0 / 3.0);
                let c2 = to.lerp(ctrl, 2.0 / 3.0);
                push_curve(&mut ops, c1, c2, to);
                current = to;
            }
            PathEl::CurveTo(c1, c2, to) => {
                push_curve(&mut ops, c1, c2, to);
                current = to;
            }
            PathEl::ClosePath => {
                ops.push_str("h\n");
                current = start;
            }
        }
    }
    ops
}

fn push_curve(ops: &mut String, c1: Point, c2: Point, to: Point) {
    let _ = writeln!(
        ops,
        "{} {} {} {} {} {} c",
        num(c1.x),
        num(c1.y),
        num(c2.x),
        num(c2.y),
        num(to.x),
        num(to.y)
    );
}

/// Stroke one guide
pub fn guide_ops(guide: &GuideOp) -> String {
    let mut ops = String::new();
    let [r, g, b] = pdf_components(guide.color);

    ops.push_str("q\n");
    let _ = writeln!(ops, "{} {} {} RG", num(r), num(g), num(b));
    let _ = writeln!(ops, "{} w", num(guide.width));
    let dash: Vec<String> = guide.dash.iter().map(|d| num(*d)).collect();
    let _ = writeln!(ops, "[{}] 0 d", dash.join(" "));

    match guide.shape {
        GuideShape::Line { from, to } => {
            let _ = writeln!(
                ops,
                "{} {} m {} {} l S",
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y)
            );
        }
        GuideShape::Outline(outline) => {
            ops.push_str(&path_ops(&outline.to_path()));
            ops.push_str("S\n");
        }
    }

    ops.push_str("Q\n");
    ops
}

/// Encode text as a WinAnsi PDF literal string body: delimiters escaped,
/// bytes above ASCII as octal escapes, unmappable characters as `?`
pub fn encode_win_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let byte = match ch {
            '\u{20}'..='\u{7e}' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2026}' => 0x85,
            '\u{20ac}' => 0x80,
            _ => b'?',
        };
        match byte {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            }
            0x20..=0x7e => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\{:03o}", byte);
            }
        }
    }
    out
}

/// Draw one text op set in `face`. `font` and `gstate` are resource names
/// already registered on the page (`gstate` only when the op is translucent).
/// Lines are aligned by their measured advance in `face`.
pub fn text_ops(op: &TextOp, face: StandardFont, font: &str, gstate: Option<&str>) -> String {
    let mut ops = String::new();
    let placement: Vec<String> = op
        .object
        .transform()
        .as_coeffs()
        .iter()
        .map(|v| num(*v))
        .collect();

    ops.push_str("q\n");
    if let Some(gs) = gstate {
        let _ = writeln!(ops, "/{} gs", gs);
    }
    let _ = writeln!(ops, "{} cm", placement.join(" "));

    let [r, g, b] = pdf_components(parse_color(&op.fill).unwrap_or([0, 0, 0]));
    let stroke = op
        .stroke
        .as_deref()
        .and_then(parse_color)
        .zip(op.stroke_width.filter(|w| *w > 0.0));

    ops.push_str("BT\n");
    let _ = writeln!(ops, "/{} {} Tf", font, num(op.font_size));
    let _ = writeln!(ops, "{} Tc", num(op.letter_spacing));
    let _ = writeln!(ops, "{} {} {} rg", num(r), num(g), num(b));
    match stroke {
        Some((rgb, width)) => {
            let [sr, sg, sb] = pdf_components(rgb);
            let _ = writeln!(ops, "{} {} {} RG", num(sr), num(sg), num(sb));
            let _ = writeln!(ops, "{} w", num(width));
            ops.push_str("2 Tr\n");
        }
        None => ops.push_str("0 Tr\n"),
    }

    let ascent = op.font_size * STANDARD_FONT_ASCENT_RATIO;
    for line in &op.lines {
        let width = face.line_width(&line.text, op.font_size, op.letter_spacing);
        let shift = match op.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => width / 2.0,
            TextAlign::Right => width,
        };
        let _ = writeln!(
            ops,
            "1 0 0 -1 {} {} Tm",
            num(line.offset.x - shift),
            num(line.offset.y + ascent)
        );
        let _ = writeln!(ops, "({}) Tj", encode_win_ansi(&line.text));
    }

    ops.push_str("ET\n");
    ops.push_str("Q\n");
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_trims_trailing_zeros() {
        assert_eq!(num(516.0), "516");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(1.23456), "1.235");
    }

    #[test]
    fn test_encode_escapes_delimiters_and_bullets() {
        assert_eq!(encode_win_ansi("a(b)\\"), "a\\(b\\)\\\\");
        assert_eq!(encode_win_ansi("• x"), "\\225 x");
        assert_eq!(encode_win_ansi("é"), "\\351");
    }

    #[test]
    fn test_quad_is_raised_to_cubic() {
        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.quad_to(Point::new(3.0, 0.0), Point::new(3.0, 3.0));
        path.close_path();
        let ops = path_ops(&path);
        assert!(ops.contains("2 0 3 1 3 3 c"));
        assert!(ops.ends_with("h\n"));
    }
}
