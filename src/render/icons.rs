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

//! Unicode symbols for the player bar and playlist.

pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}";
pub(crate) const ICON_STOP: &str = "\u{23F9}";
pub(crate) const ICON_NEXT: &str = "\u{23ED}";
pub(crate) const ICON_PREV: &str = "\u{23EE}";

// Hourglass, shown while the backend is still opening the file.
pub(crate) const ICON_LOADING: &str = "\u{231B}";

// Volume State Icons (Unicode Speaker Symbols)
pub(crate) const ICON_VOLUME_HIGH: &str = "\u{1F50A}";
pub(crate) const ICON_VOLUME_MEDIUM: &str = "\u{1F509}";
pub(crate) const ICON_VOLUME_LOW: &str = "\u{1F508}";
pub(crate) const ICON_MUTED: &str = "\u{1F507}";

/// The speaker symbol for a volume in `0.0..=1.0`.
pub(crate) fn volume_icon(volume: f64) -> &'static str {
    if volume <= 0.0 {
        ICON_MUTED
    } else if volume < 0.34 {
        ICON_VOLUME_LOW
    } else if volume < 0.67 {
        ICON_VOLUME_MEDIUM
    } else {
        ICON_VOLUME_HIGH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_icon_steps() {
        assert_eq!(volume_icon(0.0), ICON_MUTED);
        assert_eq!(volume_icon(0.2), ICON_VOLUME_LOW);
        assert_eq!(volume_icon(0.5), ICON_VOLUME_MEDIUM);
        assert_eq!(volume_icon(1.0), ICON_VOLUME_HIGH);
    }
}
