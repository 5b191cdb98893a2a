/*
 *  weather_glyph.rs
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

use crate::glyphs::Bitmap;

/// Weather icon glyph dimensions
pub const ICON_WIDTH: u32 = 10;
pub const ICON_HEIGHT: u32 = 10;

/// Icon family picked for the current-conditions screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
    Fog,
}

impl IconKind {
    pub const ALL: [IconKind; 6] = [
        IconKind::Clear,
        IconKind::Cloudy,
        IconKind::Rain,
        IconKind::Snow,
        IconKind::Thunderstorm,
        IconKind::Fog,
    ];

    /// Animation ticks each variant stays on screen.
    pub const fn ticks_per_frame(self) -> u32 {
        match self {
            IconKind::Clear => 15,
            IconKind::Cloudy => 1,
            IconKind::Rain => 10,
            IconKind::Snow => 15,
            IconKind::Thunderstorm => 5,
            IconKind::Fog => 30,
        }
    }

    /// Full animation cycle in ticks. Always divides 60 so the loop is seamless
    /// across the animation phase wrap.
    pub const fn period(self) -> u32 {
        self.frames().len() as u32 * self.ticks_per_frame()
    }

    const fn frames(self) -> &'static [[u16; 10]] {
        match self {
            IconKind::Clear => &SUN,
            IconKind::Cloudy => &CLOUDY,
            IconKind::Rain => &RAIN,
            IconKind::Snow => &SNOW,
            IconKind::Thunderstorm => &LIGHTNING,
            IconKind::Fog => &FOG,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IconKind::Clear => "clear",
            IconKind::Cloudy => "cloudy",
            IconKind::Rain => "rain",
            IconKind::Snow => "snow",
            IconKind::Thunderstorm => "thunderstorm",
            IconKind::Fog => "fog",
        }
    }
}

// sun with rays pulsing between cardinal and diagonal
static SUN: [[u16; 10]; 2] = [
    [
        0b0000110000,
        0b0100000010,
        0b0001111000,
        0b0011111100,
        0b1011111101,
        0b1011111101,
        0b0011111100,
        0b0001111000,
        0b0100000010,
        0b0000110000,
    ],
    [
        0b1000000001,
        0b0000000000,
        0b0001111000,
        0b0011111100,
        0b0011111100,
        0b0011111100,
        0b0011111100,
        0b0001111000,
        0b0000000000,
        0b1000000001,
    ],
];

static CLOUDY: [[u16; 10]; 1] = [[
    0b0000000000,
    0b0000000000,
    0b0001100000,
    0b0011110110,
    0b0111111111,
    0b1111111111,
    0b1111111111,
    0b0111111110,
    0b0000000000,
    0b0000000000,
]];

// cloud drawn behind precipitation, rows 0-5 of the icon cell
static CLOUD_BACKDROP: [u16; 10] = [
    0b0001100000,
    0b0011110110,
    0b0111111111,
    0b1111111111,
    0b1111111111,
    0b0111111110,
    0b0000000000,
    0b0000000000,
    0b0000000000,
    0b0000000000,
];

// drops step down one row per frame
static RAIN: [[u16; 10]; 2] = [
    [0, 0, 0, 0, 0, 0, 0b0100100100, 0, 0b0010010010, 0],
    [0, 0, 0, 0, 0, 0, 0, 0b0100100100, 0, 0b0010010010],
];

static SNOW: [[u16; 10]; 2] = [
    [0, 0, 0, 0, 0, 0, 0b1000100010, 0, 0b0010001000, 0],
    [0, 0, 0, 0, 0, 0, 0, 0b0100010001, 0, 0b0001000100],
];

// bolt, bolt, dark, bolt
static LIGHTNING: [[u16; 10]; 4] = [
    [0, 0, 0, 0, 0, 0, 0b0000110000, 0b0001100000, 0b0000110000, 0b0001100000],
    [0, 0, 0, 0, 0, 0, 0b0000110000, 0b0001100000, 0b0000110000, 0b0001100000],
    [0; 10],
    [0, 0, 0, 0, 0, 0, 0b0000110000, 0b0001100000, 0b0000110000, 0b0001100000],
];

// banks drift one column left and right
static FOG: [[u16; 10]; 2] = [
    [
        0,
        0b1111111000,
        0,
        0b0001111111,
        0,
        0b1111111000,
        0,
        0b0001111111,
        0,
        0,
    ],
    [
        0,
        0b0111111100,
        0,
        0b0011111110,
        0,
        0b0111111100,
        0,
        0b0011111110,
        0,
        0,
    ],
];

static AIRPLANE: [u16; 10] = [
    0b0000110000,
    0b0000110000,
    0b0001111000,
    0b0111111110,
    0b1111111111,
    0b0000110000,
    0b0000110000,
    0b0001111000,
    0b0011111100,
    0b0000000000,
];

/// Animated icon layer for `kind` at the given animation phase.
///
/// `phase` is reduced modulo the kind's period, so any counter value works.
pub fn icon(kind: IconKind, phase: u32) -> Bitmap {
    let frames = kind.frames();
    let index = (phase % kind.period()) / kind.ticks_per_frame();
    Bitmap::new(ICON_WIDTH, &frames[index as usize])
}

/// Static cloud drawn underneath the precipitation kinds, in a dimmer color.
pub fn icon_backdrop(kind: IconKind) -> Option<Bitmap> {
    match kind {
        IconKind::Rain | IconKind::Snow | IconKind::Thunderstorm => {
            Some(Bitmap::new(ICON_WIDTH, &CLOUD_BACKDROP))
        }
        _ => None,
    }
}

pub fn airplane() -> Bitmap {
    Bitmap::new(ICON_WIDTH, &AIRPLANE)
}
