/*
 *  display/drivers/mock.rs
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 *
 *  Mock display sink for testing without hardware
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

use std::sync::{Arc, Mutex};

use crate::display::error::DisplayError;
use crate::display::traits::DisplaySink;
use crate::vframebuf::PixelBuffer;

/// Mock display sink
///
/// Records every presented frame so tests can look at exactly what the
/// controller produced. The state is shared, keep a handle from `state()`
/// before boxing the sink into a controller.
#[derive(Debug, Clone)]
pub struct MockSink {
    width: u32,
    height: u32,
    state: Arc<Mutex<MockSinkState>>,
}

/// Internal state for the mock sink (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockSinkState {
    /// Every frame handed to present(), oldest first
    pub frames: Vec<PixelBuffer>,

    /// Number of times clear() was called
    pub clear_count: usize,

    /// Number of times poll_stop() was called
    pub polls: usize,

    /// Report a stop request once this many polls have been made
    pub stop_after_polls: Option<usize>,

    /// Number of times pace() was called
    pub pace_calls: usize,

    /// Simulate failures (for error testing)
    pub simulate_present_failure: bool,
}

impl MockSink {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: Arc::new(Mutex::new(MockSinkState::default())),
        }
    }

    /// Ask to stop after `polls` calls to poll_stop()
    pub fn stop_after(self, polls: usize) -> Self {
        self.state.lock().unwrap().stop_after_polls = Some(polls);
        self
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockSinkState>> {
        Arc::clone(&self.state)
    }

    pub fn present_count(&self) -> usize {
        self.state.lock().unwrap().frames.len()
    }

    pub fn last_frame(&self) -> Option<PixelBuffer> {
        self.state.lock().unwrap().frames.last().cloned()
    }
}

impl DisplaySink for MockSink {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &PixelBuffer) -> Result<(), DisplayError> {
        self.check_frame(frame)?;
        let mut state = self.state.lock().unwrap();
        if state.simulate_present_failure {
            return Err(DisplayError::PresentFailed("Simulated present failure".to_string()));
        }
        state.frames.push(frame.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        {
            let mut state = self.state.lock().unwrap();
            state.clear_count += 1;
        } // Release lock before presenting

        let blank = PixelBuffer::new(self.width, self.height);
        self.present(&blank)
    }

    fn poll_stop(&mut self) -> bool {
        let mut state = self.state.lock().unwrap();
        state.polls += 1;
        matches!(state.stop_after_polls, Some(n) if state.polls >= n)
    }

    // counts the call but does not wait, so tests run at full speed
    fn pace(&mut self, _fps: u32) -> bool {
        self.state.lock().unwrap().pace_calls += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::Rgb888;

    #[test]
    fn test_mock_sink_records_frames() {
        let mut sink = MockSink::new(64, 32);
        let mut frame = PixelBuffer::new(64, 32);
        frame.set(3, 4, Rgb888::new(255, 0, 0));

        sink.present(&frame).unwrap();

        assert_eq!(sink.present_count(), 1);
        assert_eq!(sink.last_frame().unwrap().pixel(3, 4), Some(Rgb888::new(255, 0, 0)));
    }

    #[test]
    fn test_mock_sink_clear_presents_black() {
        let mut sink = MockSink::new(64, 32);
        let mut frame = PixelBuffer::new(64, 32);
        frame.set(0, 0, Rgb888::new(0, 255, 0));
        sink.present(&frame).unwrap();

        sink.clear().unwrap();

        assert_eq!(sink.state().lock().unwrap().clear_count, 1);
        assert_eq!(sink.last_frame().unwrap().lit_count(), 0);
    }

    #[test]
    fn test_mock_sink_rejects_wrong_size() {
        let mut sink = MockSink::new(64, 32);
        let frame = PixelBuffer::new(64, 64);

        let err = sink.present(&frame).unwrap_err();
        assert!(matches!(err, DisplayError::BufferSizeMismatch { expected: (64, 32), actual: (64, 64) }));
        assert_eq!(sink.present_count(), 0);
    }

    #[test]
    fn test_mock_sink_stop_after_polls() {
        let mut sink = MockSink::new(64, 32).stop_after(3);
        assert!(!sink.poll_stop());
        assert!(!sink.poll_stop());
        assert!(sink.poll_stop());
        assert!(sink.poll_stop());
    }

    #[test]
    fn test_mock_sink_simulated_failure() {
        let mut sink = MockSink::new(64, 32);
        let frame = PixelBuffer::new(64, 32);

        sink.state().lock().unwrap().simulate_present_failure = true;
        assert!(sink.present(&frame).is_err());

        sink.state().lock().unwrap().simulate_present_failure = false;
        assert!(sink.present(&frame).is_ok());
    }
}
