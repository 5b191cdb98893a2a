/*
 *  display/traits.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  Capability contract every display target satisfies
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

use crate::display::error::DisplayError;
use crate::vframebuf::PixelBuffer;

/// Where finished frames go.
///
/// The physical panel, the desktop emulator, the terminal preview and the
/// test mock all implement this. The controller never asks which one it has.
pub trait DisplaySink {
    /// Panel dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Show a complete frame. The frame is always the full panel.
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), DisplayError>;

    /// Blank the panel
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// True once the operator asked to quit (window closed, key pressed).
    fn poll_stop(&mut self) -> bool {
        false
    }

    /// Block until the next frame is due at `fps`.
    ///
    /// Returns false when the sink has no pacing of its own, in which case
    /// the controller sleeps a fixed frame interval instead.
    fn pace(&mut self, _fps: u32) -> bool {
        false
    }

    /// Check a frame matches the panel before presenting it
    fn check_frame(&self, frame: &PixelBuffer) -> Result<(), DisplayError> {
        let expected = self.dimensions();
        let actual = (frame.width(), frame.height());
        if expected != actual {
            return Err(DisplayError::BufferSizeMismatch { expected, actual });
        }
        Ok(())
    }
}
