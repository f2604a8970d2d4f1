// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Colour palette for the TUI.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    /// Also painted onto the terminal emulator itself on start-up.
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) active_border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) highlight_colour: Color,

    pub(crate) text_colour: Color,
    pub(crate) dim_colour: Color,
    pub(crate) commander_colour: Color,
    pub(crate) error_colour: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_colour: Color::Rgb(24, 26, 38),
            accent_colour: Color::Rgb(98, 209, 190),
            border_colour: Color::Rgb(88, 92, 112),
            active_border_colour: Color::Rgb(98, 209, 190),
            gauge_track_colour: Color::Rgb(40, 44, 62),
            highlight_colour: Color::Rgb(52, 78, 110),

            text_colour: Color::Rgb(230, 230, 236),
            dim_colour: Color::Rgb(140, 144, 160),
            commander_colour: Color::Rgb(250, 210, 120),
            error_colour: Color::Rgb(240, 110, 110),
        }
    }
}
