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

//! Deterministic record identifiers.
//!
//! Artist, album and track identifiers are slugs derived from names and
//! paths. The slug is lossy: names that differ only in case, punctuation or
//! non-ASCII characters map to the same identifier, and such collisions are
//! not detected.

/// Derives an identifier from arbitrary text.
///
/// The input is lowercased, every run of whitespace becomes a single `-`, and
/// anything outside `[a-z0-9-]` is dropped.
///
/// ```ignore
/// assert_eq!(generate_id("Daft Punk"), "daft-punk");
/// ```
pub(crate) fn generate_id(input: &str) -> String {
    let mut id = String::with_capacity(input.len());
    let mut in_whitespace = false;

    for c in input.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('-');
            }
            in_whitespace = true;
            continue;
        }

        in_whitespace = false;

        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            id.push(c);
        }
    }

    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_single_hyphens() {
        assert_eq!(generate_id("The  Velvet\tUnderground"), "the-velvet-underground");
    }

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(generate_id("AC/DC"), "acdc");
        assert_eq!(generate_id("Unknown Artist-Unknown Album"), "unknown-artist-unknown-album");
    }

    #[test]
    fn paths_keep_their_separator_free_text() {
        assert_eq!(generate_id("/home/me/Music/01 Intro.mp3"), "homememusic01-intromp3");
    }

    #[test]
    fn is_stable_for_the_same_input() {
        assert_eq!(generate_id("Boards of Canada"), generate_id("Boards of Canada"));
    }

    #[test]
    fn case_and_punctuation_variants_collide() {
        assert_eq!(generate_id("Sigur Ros!"), generate_id("sigur ros"));
    }

    #[test]
    fn non_ascii_names_collapse() {
        assert_eq!(generate_id("周杰伦"), "");
        assert_eq!(generate_id("Björk"), "bjrk");
    }
}
