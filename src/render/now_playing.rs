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

//! Render the active playlist.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::{
    App,
    render::icons::{ICON_PAUSE, ICON_PLAY},
    util::format::format_time,
};

/// Renders the playlist with the current entry marked.
pub(crate) fn draw_now_playing(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let player = &app.player;

    let current_icon = if player.is_playing() { ICON_PLAY } else { ICON_PAUSE };
    let current_id = player.current_track().map(|t| t.id.as_str());
    let width = player.playlist().len().to_string().len().max(2);

    let items: Vec<ListItem> = player
        .playlist()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_current = i == player.index() && current_id == Some(track.id.as_str());
            let marker = if is_current { current_icon } else { " " };
            let title_style = if is_current {
                Style::default()
                    .fg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_colour)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), Style::default().fg(theme.accent_colour)),
                Span::styled(format!("{:0width$} ", i + 1), Style::default().fg(theme.dim_colour)),
                Span::styled(track.title.as_str(), title_style),
                Span::styled(
                    format!("  {} / {}", track.artist, track.album),
                    Style::default().fg(theme.dim_colour),
                ),
                Span::styled(
                    format!("  {}", format_time(track.duration)),
                    Style::default().fg(theme.dim_colour),
                ),
            ]))
        })
        .collect();

    let title = format!(" Now Playing ({}) ", player.playlist().len());

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_colour)),
        )
        .highlight_style(Style::default().bg(theme.highlight_colour));

    f.render_stateful_widget(list, area, &mut app.now_playing_state);
}
