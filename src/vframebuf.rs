/*
 *  vframebuf.rs
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// A runtime-sized RGB frame, row-major, origin top-left.
///
/// Dimensions are fixed at construction. Every write outside the frame is
/// dropped silently, so layouts can draw without bounds checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    buf: Vec<Rgb888>,
    w: usize,
    h: usize,
}

impl PixelBuffer {
    /// New all-black frame
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![Rgb888::BLACK; w * h], w, h }
    }

    pub fn width(&self) -> u32 { self.w as u32 }
    pub fn height(&self) -> u32 { self.h as u32 }

    /// Immutable raw access
    pub fn as_slice(&self) -> &[Rgb888] { &self.buf }

    /// Color at (x, y), None when outside the frame
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb888> {
        self.idx(Point::new(x, y)).map(|i| self.buf[i])
    }

    /// Write a single pixel, clipped
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Rgb888) {
        if let Some(i) = self.idx(Point::new(x, y)) {
            self.buf[i] = color;
        }
    }

    /// Clear to a color
    pub fn clear_color(&mut self, color: Rgb888) {
        self.buf.fill(color);
    }

    /// Packed RGB bytes, 3 per pixel
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.buf.iter().flat_map(|c| [c.r(), c.g(), c.b()]).collect()
    }

    /// Copy into an RGBA surface such as a `pixels` frame, alpha forced opaque.
    /// Extra destination bytes are left alone.
    pub fn write_rgba(&self, dst: &mut [u8]) {
        for (px, c) in dst.chunks_exact_mut(4).zip(self.buf.iter()) {
            px.copy_from_slice(&[c.r(), c.g(), c.b(), 0xff]);
        }
    }

    /// Binary PPM (P6) image of the frame
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.w, self.h).into_bytes();
        out.extend(self.to_rgb_bytes());
        out
    }

    /// Count of non-black pixels, handy for coarse assertions
    pub fn lit_count(&self) -> usize {
        self.buf.iter().filter(|&&c| c != Rgb888::BLACK).count()
    }

    /// Map (x,y) to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for PixelBuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_color(color);
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        // fast path for the bars and strips, clipped to the frame
        let area = area.intersection(&self.bounding_box());
        let Some(br) = area.bottom_right() else { return Ok(()) };
        let (x0, y0) = (area.top_left.x as usize, area.top_left.y as usize);
        let (x1, y1) = (br.x as usize, br.y as usize);
        for y in y0..=y1 {
            let row = y * self.w;
            self.buf[row + x0..=row + x1].fill(color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_black_and_sized() {
        let fb = PixelBuffer::new(64, 32);
        assert_eq!(fb.as_slice().len(), 64 * 32);
        assert_eq!(fb.lit_count(), 0);
        assert_eq!(fb.size(), Size::new(64, 32));
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut fb = PixelBuffer::new(4, 4);
        fb.set(-1, 0, Rgb888::RED);
        fb.set(0, 4, Rgb888::RED);
        fb.set(4, 0, Rgb888::RED);
        assert_eq!(fb.lit_count(), 0);
        assert_eq!(fb.pixel(4, 0), None);
        fb.set(3, 3, Rgb888::RED);
        assert_eq!(fb.pixel(3, 3), Some(Rgb888::RED));
    }

    #[test]
    fn fill_solid_clips_to_frame() {
        let mut fb = PixelBuffer::new(8, 8);
        fb.fill_solid(&Rectangle::new(Point::new(-2, 6), Size::new(20, 5)), Rgb888::GREEN)
            .unwrap();
        assert_eq!(fb.lit_count(), 16);
        assert_eq!(fb.pixel(0, 5), Some(Rgb888::BLACK));
        assert_eq!(fb.pixel(7, 7), Some(Rgb888::GREEN));

        // fully outside is a no-op
        fb.fill_solid(&Rectangle::new(Point::new(10, 10), Size::new(3, 3)), Rgb888::RED)
            .unwrap();
        assert_eq!(fb.lit_count(), 16);
    }

    #[test]
    fn ppm_has_header_and_payload() {
        let mut fb = PixelBuffer::new(2, 1);
        fb.set(1, 0, Rgb888::new(1, 2, 3));
        let ppm = fb.to_ppm();
        assert!(ppm.starts_with(b"P6\n2 1\n255\n"));
        assert_eq!(&ppm[ppm.len() - 6..], &[0, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn rgba_export_is_opaque() {
        let mut fb = PixelBuffer::new(2, 1);
        fb.set(1, 0, Rgb888::new(1, 2, 3));
        let mut out = vec![0u8; 8];
        fb.write_rgba(&mut out);
        assert_eq!(out, vec![0, 0, 0, 255, 1, 2, 3, 255]);
        assert_eq!(fb.to_rgb_bytes(), vec![0, 0, 0, 1, 2, 3]);
    }
}
