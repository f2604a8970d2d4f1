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

//! Display-order comparison of names and titles.

use std::cmp::Ordering;

/// Compares two display strings the way a listing should order them.
///
/// Letters are compared case-insensitively; strings that only differ in case
/// fall back to a plain comparison so the order stays total.
pub(crate) fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case_when_ordering() {
        let mut names = vec!["beta", "Alpha", "alpha", "Gamma", "delta"];
        names.sort_by(|a, b| locale_cmp(a, b));

        assert_eq!(names, vec!["Alpha", "alpha", "beta", "delta", "Gamma"]);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(locale_cmp("Kind", "Kind of Blue"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }
}
