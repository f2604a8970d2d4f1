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

/// Formats a duration in seconds into a human-readable `MM:SS` string.
///
/// This is used primarily for displaying track positions and total durations
/// in the player interface.
///
/// # Arguments
///
/// * `total_seconds` - The duration to format, represented as a 64-bit integer.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_time(65), "01:05");
/// assert_eq!(format_time(3600), "60:00");
/// ```
pub(crate) fn format_time(total_seconds: u64) -> String {
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Parses a position typed by the user, either plain seconds (`95`) or
/// minutes and seconds (`1:35`).
pub(crate) fn parse_time(text: &str) -> Option<f64> {
    match text.trim().split_once(':') {
        Some((mins, secs)) => {
            let mins: u64 = mins.parse().ok()?;
            let secs: f64 = secs.parse().ok()?;
            (0.0..60.0).contains(&secs).then(|| mins as f64 * 60.0 + secs)
        }
        None => text.trim().parse::<f64>().ok().filter(|s| *s >= 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn parses_seconds_and_clock_positions() {
        assert_eq!(parse_time("95"), Some(95.0));
        assert_eq!(parse_time("1:35"), Some(95.0));
        assert_eq!(parse_time(" 0:05 "), Some(5.0));
        assert_eq!(parse_time("1:75"), None);
        assert_eq!(parse_time("-3"), None);
        assert_eq!(parse_time("abc"), None);
    }
}
