/*
 *  pacer.rs
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
use std::thread;
use std::time::{Duration, Instant};

pub struct Pacer {
    next_deadline: Instant,
    frame: Duration,
}

#[inline]
fn frame_duration(fps: u32) -> Duration {
    Duration::from_micros((1_000_000u32 / fps.max(1)) as u64)
}

// deadlines advance from the previous deadline, not from "now"
impl Pacer {
    pub fn new(target_fps: u32) -> Self {
        Self { next_deadline: Instant::now(), frame: frame_duration(target_fps) }
    }

    #[inline]
    pub fn set_fps(&mut self, fps: u32) {
        self.frame = frame_duration(fps);
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Returns true if we should flush now; if true, it also schedules the next deadline.
    #[inline]
    pub fn should_flush(&mut self) -> bool {
        let now = Instant::now();
        if now >= self.next_deadline {
            self.next_deadline = now + self.frame;
            true
        } else {
            false
        }
    }

    /// Sleep until the next frame deadline, then schedule the one after.
    /// When already late, resync to now instead of bursting to catch up.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next_deadline {
            thread::sleep(self.next_deadline - now);
            self.next_deadline += self.frame;
        } else {
            self.next_deadline = now + self.frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_length_follows_fps() {
        let mut p = Pacer::new(50);
        assert_eq!(p.frame(), Duration::from_millis(20));
        p.set_fps(0);
        assert_eq!(p.frame(), Duration::from_secs(1));
    }

    #[test]
    fn flush_is_gated_by_deadline() {
        let mut p = Pacer::new(1);
        assert!(p.should_flush());
        assert!(!p.should_flush());
    }

    #[test]
    fn wait_holds_roughly_one_frame() {
        let mut p = Pacer::new(100);
        p.wait();
        let start = Instant::now();
        p.wait();
        p.wait();
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
