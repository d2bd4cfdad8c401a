//! Standard PDF faces used for exported text, with their glyph metrics
//!
//! Advance widths come from the Adobe Core 14 AFM files, in thousandths of
//! the font size, for the WinAnsi characters the exporter can encode.

/// Standard face chosen for a font family and weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
    Courier,
    CourierBold,
}

// Printable ASCII, U+0020 through U+007E
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

/// Every Courier glyph has the same advance
const COURIER_WIDTH: u16 = 600;

impl StandardFont {
    /// Best-effort substitution: serif families map to Times, monospace to
    /// Courier, everything else to Helvetica
    pub fn for_family(family: &str, bold: bool) -> Self {
        let family = family.to_ascii_lowercase();
        let serif = !family.contains("sans")
            && ["serif", "times", "georgia", "garamond", "playfair", "merriweather"]
                .iter()
                .any(|name| family.contains(name));
        let mono = ["mono", "courier", "consolas"]
            .iter()
            .any(|name| family.contains(name));

        match (mono, serif, bold) {
            (true, _, false) => StandardFont::Courier,
            (true, _, true) => StandardFont::CourierBold,
            (false, true, false) => StandardFont::TimesRoman,
            (false, true, true) => StandardFont::TimesBold,
            (false, false, false) => StandardFont::Helvetica,
            (false, false, true) => StandardFont::HelveticaBold,
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
        }
    }

    fn ascii_widths(self) -> Option<&'static [u16; 95]> {
        match self {
            StandardFont::Helvetica => Some(&HELVETICA_WIDTHS),
            StandardFont::HelveticaBold => Some(&HELVETICA_BOLD_WIDTHS),
            StandardFont::TimesRoman => Some(&TIMES_ROMAN_WIDTHS),
            StandardFont::TimesBold => Some(&TIMES_BOLD_WIDTHS),
            StandardFont::Courier | StandardFont::CourierBold => None,
        }
    }

    /// Pick the width for this face from a Helvetica, Helvetica-Bold,
    /// Times-Roman, Times-Bold row
    fn pick(self, widths: [u16; 4]) -> u16 {
        match self {
            StandardFont::Helvetica => widths[0],
            StandardFont::HelveticaBold => widths[1],
            StandardFont::TimesRoman => widths[2],
            StandardFont::TimesBold => widths[3],
            StandardFont::Courier | StandardFont::CourierBold => COURIER_WIDTH,
        }
    }

    /// Advance width of `ch` in thousandths of the font size. Characters
    /// outside WinAnsi are drawn as `?` and measured as one.
    pub fn advance(self, ch: char) -> u16 {
        let Some(widths) = self.ascii_widths() else {
            return COURIER_WIDTH;
        };

        match ch {
            ' '..='~' => widths[ch as usize - 0x20],
            '\u{a0}' => self.advance(' '),
            'À'..='Å' => self.advance('A'),
            'Ç' => self.advance('C'),
            'È'..='Ë' => self.advance('E'),
            'Ì'..='Ï' => self.advance('I'),
            'Ð' => self.advance('D'),
            'Ñ' => self.advance('N'),
            'Ò'..='Ö' | 'Ø' => self.advance('O'),
            'Ù'..='Ü' => self.advance('U'),
            'Ý' => self.advance('Y'),
            'à'..='å' => self.advance('a'),
            'ç' => self.advance('c'),
            'è'..='ë' => self.advance('e'),
            'ñ' => self.advance('n'),
            'ò'..='ö' | 'ø' => self.advance('o'),
            'ù'..='ü' => self.advance('u'),
            'ý' | 'ÿ' => self.advance('y'),
            'þ' => self.advance('p'),
            'ì'..='ï' => 278,
            'ð' => self.pick([556, 611, 500, 500]),
            'Æ' => self.pick([1000, 1000, 889, 1000]),
            'æ' => self.pick([889, 889, 667, 722]),
            'Þ' => self.pick([667, 667, 556, 611]),
            'ß' => self.pick([611, 611, 500, 556]),
            '×' | '÷' => self.pick([584, 584, 564, 570]),
            '©' | '®' => self.pick([737, 737, 760, 747]),
            '°' => 400,
            '\u{2022}' => 350,
            '\u{2013}' | '\u{20ac}' => self.pick([556, 556, 500, 500]),
            '\u{2014}' | '\u{2026}' => 1000,
            '\u{2018}' | '\u{2019}' => self.pick([222, 278, 333, 333]),
            '\u{201c}' | '\u{201d}' => self.pick([333, 500, 444, 500]),
            _ => self.advance('?'),
        }
    }

    /// Width of one line at `font_size`, with `letter_spacing` added after
    /// every glyph, in the same units as `font_size`
    pub fn line_width(self, text: &str, font_size: f64, letter_spacing: f64) -> f64 {
        text.chars()
            .map(|ch| self.advance(ch) as f64 * font_size / 1000.0 + letter_spacing)
            .sum()
    }
}
