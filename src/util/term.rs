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

//! Terminal emulator background control.
//!
//! The TUI paints its own background colour, but terminals leave a thin
//! border around the cell grid in their own colour. Setting the emulator
//! background with OSC 11 (and restoring it with OSC 111) hides that border.
//! Terminals that do not understand the sequences ignore them.

use std::io::{self, Write};

use ratatui::style::Color;

/// Converts an RGB colour to a `#rrggbb` string, `None` for palette colours.
pub(crate) fn to_hex(colour: Color) -> Option<String> {
    match colour {
        Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
        _ => None,
    }
}

/// Sets the emulator background to `colour` using an OSC 11 escape sequence.
///
/// Palette colours have no portable hex form and are left alone.
pub(crate) fn set_terminal_bg<W: Write>(out: &mut W, colour: Color) -> io::Result<()> {
    if let Some(hex) = to_hex(colour) {
        write!(out, "\x1b]11;{}\x07", hex)?;
        out.flush()?;
    }
    Ok(())
}

/// Restores the emulator's configured background (OSC 111).
pub(crate) fn reset_terminal_bg<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b]111\x07")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_colours_convert_to_hex() {
        assert_eq!(to_hex(Color::Rgb(40, 20, 250)).as_deref(), Some("#2814fa"));
        assert_eq!(to_hex(Color::Blue), None);
    }

    #[test]
    fn writes_osc_sequences() {
        let mut out = Vec::new();
        set_terminal_bg(&mut out, Color::Rgb(0, 0, 0)).unwrap();
        reset_terminal_bg(&mut out).unwrap();

        assert_eq!(out, b"\x1b]11;#000000\x07\x1b]111\x07");
    }

    #[test]
    fn palette_colours_write_nothing() {
        let mut out = Vec::new();
        set_terminal_bg(&mut out, Color::Reset).unwrap();

        assert!(out.is_empty());
    }
}
