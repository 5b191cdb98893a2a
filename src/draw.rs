/*
 *  draw.rs
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

//! Stateless compositor primitives over a `PixelBuffer`.
//!
//! Nothing here fails: everything outside the frame is clipped by the buffer.

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

use crate::glyphs::{glyph, Bitmap, GLYPH_ADVANCE};
use crate::vframebuf::PixelBuffer;

/// Paint every set pixel of `bitmap` with its top-left at (x, y).
/// Unset pixels are transparent.
pub fn stamp(buf: &mut PixelBuffer, bitmap: &Bitmap, x: i32, y: i32, color: Rgb888) {
    let pixels = bitmap
        .set_pixels()
        .map(|(col, row)| Pixel(Point::new(x + col as i32, y + row as i32), color));
    let _ = buf.draw_iter(pixels);
}

pub fn fill_rect(buf: &mut PixelBuffer, x: i32, y: i32, w: u32, h: u32, color: Rgb888) {
    let _ = Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(buf);
}

/// Draw a single line of monospace text. No wrapping; callers truncate.
pub fn draw_text(buf: &mut PixelBuffer, text: &str, x: i32, y: i32, color: Rgb888) {
    let mut cx = x;
    for c in text.chars() {
        stamp(buf, &glyph(c), cx, y, color);
        cx += GLYPH_ADVANCE as i32;
    }
}

/// Pixel width of `text`, without the trailing spacing column.
pub fn text_width(text: &str) -> u32 {
    match text.chars().count() as u32 {
        0 => 0,
        n => n * GLYPH_ADVANCE - 1,
    }
}

/// Longest prefix of `text` that fits in `width` pixels.
pub fn truncate_to_width(text: &str, width: u32) -> &str {
    let max_chars = ((width + 1) / GLYPH_ADVANCE) as usize;
    match text.char_indices().nth(max_chars) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

/// X that right-aligns `text` against `right_edge` (exclusive).
pub fn right_align_x(text: &str, right_edge: i32) -> i32 {
    right_edge - text_width(text) as i32
}

/// X that centers `text` across a span of `width` pixels.
pub fn center_x(text: &str, width: u32) -> i32 {
    (width as i32 - text_width(text) as i32) / 2
}

/// Plot a set of offsets around (cx, cy).
pub fn plot_offsets(buf: &mut PixelBuffer, offsets: &[(i32, i32)], cx: i32, cy: i32, color: Rgb888) {
    let pixels = offsets
        .iter()
        .map(|&(dx, dy)| Pixel(Point::new(cx + dx, cy + dy), color));
    let _ = buf.draw_iter(pixels);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_is_transparent_and_clipped() {
        let mut buf = PixelBuffer::new(8, 8);
        buf.set(1, 0, Rgb888::BLUE);
        // '1' has nothing in column 1 of row 0
        stamp(&mut buf, &glyph('1'), 0, 0, Rgb888::WHITE);
        assert_eq!(buf.pixel(1, 0), Some(Rgb888::BLUE));
        assert_eq!(buf.pixel(2, 0), Some(Rgb888::WHITE));

        let mut edge = PixelBuffer::new(8, 8);
        stamp(&mut edge, &glyph('8'), 6, 5, Rgb888::WHITE);
        stamp(&mut edge, &glyph('8'), -3, -6, Rgb888::WHITE);
        assert!(edge.lit_count() > 0);
    }

    #[test]
    fn text_advances_by_fixed_cell() {
        let mut a = PixelBuffer::new(32, 8);
        let mut b = PixelBuffer::new(32, 8);
        draw_text(&mut a, "LL", 0, 0, Rgb888::WHITE);
        stamp(&mut b, &glyph('L'), 0, 0, Rgb888::WHITE);
        stamp(&mut b, &glyph('L'), GLYPH_ADVANCE as i32, 0, Rgb888::WHITE);
        assert_eq!(a, b);
    }

    #[test]
    fn widths_and_truncation() {
        assert_eq!(text_width(""), 0);
        assert_eq!(text_width("A"), 5);
        assert_eq!(text_width("KDEN"), 23);
        assert_eq!(truncate_to_width("AVIATION WEATHER", 64), "AVIATION W");
        assert_eq!(truncate_to_width("KDEN", 64), "KDEN");
        assert_eq!(truncate_to_width("KDEN", 4), "");
        assert_eq!(truncate_to_width("12°C", 17), "12°");
        assert!(text_width(truncate_to_width("AVIATION WEATHER", 64)) <= 64);
    }

    #[test]
    fn alignment_helpers() {
        assert_eq!(right_align_x("12", 64), 53);
        assert_eq!(center_x("NO TAF", 64), 14);
    }

    #[test]
    fn fill_rect_clips() {
        let mut buf = PixelBuffer::new(10, 4);
        fill_rect(&mut buf, 8, -1, 5, 3, Rgb888::RED);
        assert_eq!(buf.lit_count(), 4);
    }
}
