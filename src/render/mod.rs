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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event, including the periodic tick.

mod browser;
mod commander;
mod icons;
mod now_playing;
mod player;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
};

use crate::{
    App, MainView,
    render::{
        browser::draw_browser, commander::draw_commander, now_playing::draw_now_playing,
        player::draw_player,
    },
};

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the main view (browser or now playing), the
/// player bar and the command/status line.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background_colour)),
        area,
    );

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(area);

    match app.main_view {
        MainView::Browse => {
            let theme = app.theme;
            draw_browser(f, outer[0], &mut app.media_browser, app.library_loaded, &theme)
        }
        MainView::NowPlaying => draw_now_playing(f, outer[0], app),
    }

    draw_player(f, outer[1], app);

    draw_commander(f, outer[2], app);
}
