//! Raster Text
//!
//! Minimal embedded 5x7 binary glyph set for annotating maps (mask
//! names, counts, percentages). Each glyph is seven rows of five bits,
//! MSB on the left. Lowercase input maps to the uppercase glyphs;
//! characters without a glyph advance as blank space.

use crate::color::Rgba;
use crate::render::RasterImage;

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;
/// Horizontal advance per glyph (width + 1px gap).
pub const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

type Glyph = [u8; GLYPH_HEIGHT];

const DIGITS: [Glyph; 10] = [
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // 0
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // 2
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // 3
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 4
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // 5
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 6
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 7
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 8
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 9
];

const LETTERS: [Glyph; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x1B, 0x11], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
];

const PERIOD: Glyph = [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C];
const COMMA: Glyph = [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08];
const COLON: Glyph = [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00];
const PERCENT: Glyph = [0x19, 0x19, 0x02, 0x04, 0x08, 0x13, 0x13];
const PAREN_L: Glyph = [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02];
const PAREN_R: Glyph = [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08];
const HYPHEN: Glyph = [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00];
const UNDERSCORE: Glyph = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F];
const SLASH: Glyph = [0x01, 0x02, 0x02, 0x04, 0x08, 0x08, 0x10];

fn glyph(c: char) -> Option<&'static Glyph> {
    let c = c.to_ascii_uppercase();
    match c {
        '0'..='9' => Some(&DIGITS[c as usize - '0' as usize]),
        'A'..='Z' => Some(&LETTERS[c as usize - 'A' as usize]),
        '.' => Some(&PERIOD),
        ',' => Some(&COMMA),
        ':' => Some(&COLON),
        '%' => Some(&PERCENT),
        '(' => Some(&PAREN_L),
        ')' => Some(&PAREN_R),
        '-' => Some(&HYPHEN),
        '_' => Some(&UNDERSCORE),
        '/' => Some(&SLASH),
        _ => None,
    }
}

/// Pixel width of a rendered string at the given scale.
pub fn text_width(text: &str, scale: usize) -> usize {
    let n = text.chars().count();
    if n == 0 {
        return 0;
    }
    (n * GLYPH_ADVANCE - 1) * scale
}

/// Pixel height of rendered text at the given scale.
pub fn text_height(scale: usize) -> usize {
    GLYPH_HEIGHT * scale
}

/// Draw `text` with its top-left corner at `(x, y)`.
pub fn draw_text(img: &mut RasterImage, x: i64, y: i64, text: &str, color: Rgba, scale: usize) {
    let scale = scale.max(1);
    let mut pen_x = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        for sy in 0..scale {
                            for sx in 0..scale {
                                img.set_pixel(
                                    pen_x + (col * scale + sx) as i64,
                                    y + (row * scale + sy) as i64,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
        }
        pen_x += (GLYPH_ADVANCE * scale) as i64;
    }
}

/// Draw `text` centered on `(cx, cy)`.
pub fn draw_text_centered(
    img: &mut RasterImage,
    cx: i64,
    cy: i64,
    text: &str,
    color: Rgba,
    scale: usize,
) {
    let scale = scale.max(1);
    let x = cx - text_width(text, scale) as i64 / 2;
    let y = cy - text_height(scale) as i64 / 2;
    draw_text(img, x, y, text, color, scale);
}
