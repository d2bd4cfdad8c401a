//! CSS-style color strings to RGB

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` (alpha ignored), `rgb(r, g, b)` and a
/// handful of named colors. Returns `None` for anything else.
pub fn parse_color(value: &str) -> Option<[u8; 3]> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = value.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgb(")
        .or_else(|| lower.strip_prefix("rgba("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<u8> = args
            .split(',')
            .take(3)
            .map(|p| p.trim().parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0) as u8))
            .collect::<Option<_>>()?;
        return match parts.as_slice() {
            [r, g, b] => Some([*r, *g, *b]),
            _ => None,
        };
    }

    match lower.as_str() {
        "black" => Some([0, 0, 0]),
        "white" => Some([255, 255, 255]),
        "red" => Some([255, 0, 0]),
        "green" => Some([0, 128, 0]),
        "blue" => Some([0, 0, 255]),
        "gray" | "grey" => Some([128, 128, 128]),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(out)
        }
        6 | 8 => Some([
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        ]),
        _ => None,
    }
}

/// RGB bytes as PDF color components
pub fn pdf_components(rgb: [u8; 3]) -> [f64; 3] {
    rgb.map(|c| c as f64 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#c9b896"), Some([0xc9, 0xb8, 0x96]));
        assert_eq!(parse_color("#FFF"), Some([255, 255, 255]));
        assert_eq!(parse_color("#1a1a1a80"), Some([0x1a, 0x1a, 0x1a]));
    }

    #[test]
    fn test_parse_rgb_function() {
        assert_eq!(parse_color("rgb(10, 20, 30)"), Some([10, 20, 30]));
    }

    #[test]
    fn test_unknown_color() {
        assert_eq!(parse_color("chartreuse-ish"), None);
        assert_eq!(parse_color("#12345"), None);
    }
}
