/*
 *  display/drivers/terminal.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  Truecolor terminal preview, two panel rows per text row
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::fmt::Write as _;
use std::io::{self, Stdout, Write};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use log::debug;

use crate::display::error::DisplayError;
use crate::display::traits::DisplaySink;
use crate::pacer::Pacer;
use crate::vframebuf::PixelBuffer;

const HOME: &str = "\x1b[H";
const CLEAR_SCREEN: &str = "\x1b[2J";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const RESET: &str = "\x1b[0m";
const UPPER_HALF: char = '\u{2580}';

/// Renders each frame as ANSI truecolor half blocks: the foreground paints
/// the upper pixel of a cell and the background the lower one.
pub struct TerminalSink<W: Write = Stdout> {
    width: u32,
    height: u32,
    out: W,
    pacer: Pacer,
    started: bool,
}

impl TerminalSink<Stdout> {
    pub fn stdout(width: u32, height: u32) -> Self {
        Self::new(width, height, io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(width: u32, height: u32, out: W) -> Self {
        debug!("Terminal sink {}x{} ({} text rows)", width, height, height.div_ceil(2));
        Self { width, height, out, pacer: Pacer::new(30), started: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_all(&mut self, text: &str) -> Result<(), DisplayError> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// One full frame as escape sequences, cursor homed first.
pub fn encode_frame(frame: &PixelBuffer) -> String {
    let (w, h) = (frame.width() as i32, frame.height() as i32);
    let mut s = String::with_capacity((w * h) as usize * 20);
    s.push_str(HOME);
    for y in (0..h).step_by(2) {
        for x in 0..w {
            let top = frame.pixel(x, y).unwrap_or(Rgb888::BLACK);
            let bottom = frame.pixel(x, y + 1).unwrap_or(Rgb888::BLACK);
            let _ = write!(
                s,
                "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}",
                top.r(), top.g(), top.b(),
                bottom.r(), bottom.g(), bottom.b(),
                UPPER_HALF
            );
        }
        s.push_str(RESET);
        s.push('\n');
    }
    s
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &PixelBuffer) -> Result<(), DisplayError> {
        self.check_frame(frame)?;
        if !self.started {
            self.started = true;
            self.write_all(&format!("{}{}", CLEAR_SCREEN, HIDE_CURSOR))?;
        }
        self.write_all(&encode_frame(frame))
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        let blank = PixelBuffer::new(self.width, self.height);
        self.present(&blank)?;
        self.write_all(SHOW_CURSOR)
    }

    fn pace(&mut self, fps: u32) -> bool {
        self.pacer.set_fps(fps);
        self.pacer.wait();
        true
    }
}
