/*
 *  display/drivers/matrix.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  HUB75 RGB LED panel on a Raspberry Pi
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

use embedded_graphics::pixelcolor::RgbColor;
use log::info;
use rpi_led_matrix::{LedCanvas, LedColor, LedMatrix, LedMatrixOptions, LedRuntimeOptions};

use crate::display::error::DisplayError;
use crate::display::traits::DisplaySink;
use crate::pacer::Pacer;
use crate::vframebuf::PixelBuffer;

const HARDWARE_MAPPING: &str = "regular";
const GPIO_SLOWDOWN: u32 = 4;
const PWM_LSB_NANOSECONDS: u32 = 130;

/// Double-buffered panel: frames are drawn to an offscreen canvas and
/// swapped in on vsync.
pub struct MatrixSink {
    width: u32,
    height: u32,
    matrix: LedMatrix,
    canvas: Option<LedCanvas>,
    pacer: Pacer,
}

impl MatrixSink {
    /// Bring up the panel. Needs root for GPIO access.
    pub fn new(width: u32, height: u32, brightness: u8) -> Result<Self, DisplayError> {
        let mut options = LedMatrixOptions::new();
        options.set_rows(height);
        options.set_cols(width);
        options.set_hardware_mapping(HARDWARE_MAPPING);
        options.set_pwm_lsb_nanoseconds(PWM_LSB_NANOSECONDS);
        options
            .set_brightness(brightness.clamp(1, 100))
            .map_err(|e| DisplayError::InvalidConfiguration(e.to_string()))?;

        let mut rt_options = LedRuntimeOptions::new();
        rt_options.set_gpio_slowdown(GPIO_SLOWDOWN);

        let matrix = LedMatrix::new(Some(options), Some(rt_options))
            .map_err(|e| DisplayError::InitializationFailed(format!("LED matrix: {}", e)))?;
        let canvas = matrix.offscreen_canvas();

        info!(
            "LED matrix {}x{} mapping {} brightness {}%",
            width, height, HARDWARE_MAPPING, brightness
        );

        Ok(Self { width, height, matrix, canvas: Some(canvas), pacer: Pacer::new(30) })
    }
}

impl DisplaySink for MatrixSink {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &PixelBuffer) -> Result<(), DisplayError> {
        self.check_frame(frame)?;
        let Some(mut canvas) = self.canvas.take() else {
            return Err(DisplayError::PresentFailed("offscreen canvas lost".to_string()));
        };

        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if let Some(c) = frame.pixel(x, y) {
                    canvas.set(x, y, &LedColor { red: c.r(), green: c.g(), blue: c.b() });
                }
            }
        }

        self.canvas = Some(self.matrix.swap(canvas));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        let blank = PixelBuffer::new(self.width, self.height);
        self.present(&blank)
    }

    fn pace(&mut self, fps: u32) -> bool {
        self.pacer.set_fps(fps);
        self.pacer.wait();
        true
    }
}
