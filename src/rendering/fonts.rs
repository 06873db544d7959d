//! Metrics and encoding for the standard Helvetica Type1 font.

/// PostScript name of the only font the invoice uses.
pub const BASE_FONT: &str = "Helvetica";

/// Glyph advance widths (1/1000 em) for printable ASCII, starting at U+0020.
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const FALLBACK_WIDTH: u16 = 556;

fn glyph_width(byte: u8) -> u16 {
    match byte {
        0x20..=0x7e => ASCII_WIDTHS[(byte - 0x20) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Encodes text for a WinAnsi simple font; anything outside Latin-1 becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            0x20..=0x7e | 0xa0..=0xff => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Width of already-encoded text in points at `font_size` points.
pub fn text_width(encoded: &[u8], font_size: f64) -> f64 {
    let units: u32 = encoded.iter().map(|b| u32::from(glyph_width(*b))).sum();
    f64::from(units) * font_size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_characters_outside_latin1() {
        assert_eq!(encode_win_ansi("Café"), b"Caf\xe9".to_vec());
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
        assert_eq!(encode_win_ansi("a\tb"), b"a?b".to_vec());
    }

    #[test]
    fn measures_known_strings() {
        // "Total" = 611 + 556 + 278 + 556 + 222
        assert!((text_width(b"Total", 1000.0) - 2223.0).abs() < f64::EPSILON);
        assert_eq!(text_width(b"", 12.0), 0.0);
        assert!(text_width(b"WWW", 12.0) > text_width(b"iii", 12.0));
    }
}
