/*
 *  display/drivers/emulator.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  Desktop window standing in for the LED panel
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

use std::fs;
use std::time::Instant;

use log::{error, info};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};
use winit_input_helper::WinitInputHelper;

use crate::display::error::DisplayError;
use crate::display::traits::DisplaySink;
use crate::pacer::Pacer;
use crate::vframebuf::PixelBuffer;

struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
    current_fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Returns a fresh reading once a second, None in between
    fn tick(&mut self) -> Option<f32> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f32() >= 1.0 {
            self.current_fps = self.frame_count as f32 / elapsed.as_secs_f32();
            self.frame_count = 0;
            self.last_update = Instant::now();
            return Some(self.current_fps);
        }
        None
    }
}

/// Panel emulation in a desktop window.
///
/// The event loop is pumped from `poll_stop` with `run_return`, so the
/// controller keeps ownership of the main loop. Must be created on the
/// main thread.
pub struct EmulatorSink {
    width: u32,
    height: u32,
    brightness: u8,

    // pixels holds a surface on the window, keep it declared first so it drops first
    pixels: Pixels,
    window: Window,
    event_loop: EventLoop<()>,
    input: WinitInputHelper,

    pacer: Pacer,
    fps_counter: FpsCounter,
    last_frame: PixelBuffer,
}

impl EmulatorSink {
    pub fn new(width: u32, height: u32, scale: u32, brightness: u8) -> Result<Self, DisplayError> {
        let event_loop = EventLoop::new();

        let scale = scale.max(1);
        // PhysicalSize keeps the panel pixels square under Wayland scaling
        let window = WindowBuilder::new()
            .with_title(format!("AvHUD Emulator ({}x{})", width, height))
            .with_inner_size(PhysicalSize::new(width * scale, height * scale))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(|e| DisplayError::InitializationFailed(format!("window: {}", e)))?;

        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        let pixels = Pixels::new(width, height, surface_texture)
            .map_err(|e| DisplayError::InitializationFailed(format!("pixels: {}", e)))?;

        info!("Emulator window {}x{} at {}x scale", width, height, scale);
        info!("  ESC / Q  quit");
        info!("  S        save screenshot");

        Ok(Self {
            width,
            height,
            brightness: brightness.min(100),
            pixels,
            window,
            event_loop,
            input: WinitInputHelper::new(),
            pacer: Pacer::new(30),
            fps_counter: FpsCounter::new(),
            last_frame: PixelBuffer::new(width, height),
        })
    }

    fn save_screenshot(&self) {
        let name = format!("avhud-{}.ppm", chrono::Local::now().format("%Y%m%d-%H%M%S"));
        match fs::write(&name, self.last_frame.to_ppm()) {
            Ok(()) => info!("Screenshot saved to {}", name),
            Err(e) => error!("Screenshot {} failed: {}", name, e),
        }
    }
}

/// Scale RGB channels of an RGBA surface by `percent`, alpha untouched.
fn dim_rgba(frame: &mut [u8], percent: u8) {
    if percent >= 100 {
        return;
    }
    for px in frame.chunks_exact_mut(4) {
        for c in &mut px[..3] {
            *c = (*c as u16 * percent as u16 / 100) as u8;
        }
    }
}

impl DisplaySink for EmulatorSink {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &PixelBuffer) -> Result<(), DisplayError> {
        self.check_frame(frame)?;
        self.last_frame = frame.clone();

        let surface = self.pixels.frame_mut();
        frame.write_rgba(surface);
        dim_rgba(surface, self.brightness);

        self.pixels
            .render()
            .map_err(|e| DisplayError::PresentFailed(format!("pixels.render() failed: {}", e)))?;

        if let Some(fps) = self.fps_counter.tick() {
            self.window.set_title(&format!(
                "AvHUD Emulator ({}x{}) - {:.1} FPS",
                self.width, self.height, fps
            ));
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        let blank = PixelBuffer::new(self.width, self.height);
        self.present(&blank)
    }

    fn poll_stop(&mut self) -> bool {
        let input = &mut self.input;
        let mut close_requested = false;

        // drain pending events, return at the end of this loop iteration
        self.event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;
            if let Event::WindowEvent { event: WindowEvent::CloseRequested, .. } = &event {
                close_requested = true;
            }
            if input.update(&event) {
                *control_flow = ControlFlow::Exit;
            }
        });

        if self.input.key_pressed(VirtualKeyCode::S) {
            self.save_screenshot();
        }

        close_requested
            || self.input.key_pressed(VirtualKeyCode::Escape)
            || self.input.key_pressed(VirtualKeyCode::Q)
    }

    fn pace(&mut self, fps: u32) -> bool {
        self.pacer.set_fps(fps);
        self.pacer.wait();
        true
    }
}
