/*
 *  glyphs.rs
 *
 *  AvHUD - aviation weather at a glance
 *	(c) 2025-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

//! Fixed-size 1-bit pixel masks and the 5x7 monospace font.

/// A borrowed 1-bit mask, one `u16` per row.
///
/// Bit `width - 1` of a row is the leftmost column, so a row literal reads
/// the same way the glyph looks: `0b01110` is ` ### ` for a 5 wide mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    rows: &'static [u16],
}

impl Bitmap {
    pub const fn new(width: u32, rows: &'static [u16]) -> Self {
        Self { width, height: rows.len() as u32, rows }
    }

    /// True when the pixel at (col, row) is set. Out of range reads as unset.
    #[inline]
    pub fn is_set(&self, col: u32, row: u32) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }
        (self.rows[row as usize] >> (self.width - 1 - col)) & 1 == 1
    }

    /// Iterate the (col, row) coordinates of every set pixel, row-major.
    pub fn set_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width)
                .filter(move |&col| self.is_set(col, row))
                .map(move |col| (col, row))
        })
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }
}

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal distance between the left edges of two adjacent characters.
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

static FONT_BLANK: [u16; 7] = [0; 7];

static FONT_DIGITS: [[u16; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
];

static FONT_LETTERS: [[u16; 7]; 26] = [
    [0b01110, 0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

static FONT_COLON: [u16; 7] = [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000];
static FONT_PERIOD: [u16; 7] = [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100];
static FONT_MINUS: [u16; 7] = [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000];
static FONT_PLUS: [u16; 7] = [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000];
static FONT_SLASH: [u16; 7] = [0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000];
static FONT_PERCENT: [u16; 7] = [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011];
static FONT_DEGREE: [u16; 7] = [0b01100, 0b10010, 0b10010, 0b01100, 0b00000, 0b00000, 0b00000];

/// Look up the glyph for a character.
///
/// Lowercase letters share the uppercase glyphs. Anything without a glyph
/// renders as a blank cell so text layout never shifts.
pub fn glyph(c: char) -> Bitmap {
    let rows: &'static [u16; 7] = match c {
        '0'..='9' => &FONT_DIGITS[(c as u8 - b'0') as usize],
        'A'..='Z' => &FONT_LETTERS[(c as u8 - b'A') as usize],
        'a'..='z' => &FONT_LETTERS[(c as u8 - b'a') as usize],
        ':' => &FONT_COLON,
        '.' => &FONT_PERIOD,
        '-' => &FONT_MINUS,
        '+' => &FONT_PLUS,
        '/' => &FONT_SLASH,
        '%' => &FONT_PERCENT,
        '°' => &FONT_DEGREE,
        _ => &FONT_BLANK,
    };
    Bitmap::new(GLYPH_WIDTH, rows)
}
