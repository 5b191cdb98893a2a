/*
 *  lib.rs
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

// drawing primitives
pub mod glyphs;
pub mod weather_glyph;
pub mod wind;
pub mod vframebuf;
pub mod draw;

// weather data and where it comes from
pub mod weather;
pub mod avwx;
pub mod demo;

pub mod config;
pub mod pacer;

// screens, controller and sinks
pub mod display;
