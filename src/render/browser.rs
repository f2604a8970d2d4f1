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

//! Render the media browser interface.
//!
//! Three side-by-side lists: artists, the selected artist's albums, and the
//! selected album's tracks. While the library is empty a placeholder message
//! is drawn instead.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
};

use crate::{
    browser::{MediaBrowser, MediaBrowserPane},
    theme::Theme,
    util::format::format_time,
};

/// Renders the media browser widget including artist, album, and track info.
pub(crate) fn draw_browser(
    f: &mut Frame,
    area: Rect,
    browser: &mut MediaBrowser,
    library_loaded: bool,
    theme: &Theme,
) {
    if browser.artists.is_empty() {
        let message = if library_loaded {
            "Your library is empty. Press r or type :scan to scan your music folders."
        } else {
            "Loading library..."
        };
        draw_empty(f, area, message, theme);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(30),
            Constraint::Percentage(45),
        ])
        .split(area);

    let artist_items: Vec<ListItem> = browser
        .artists
        .iter()
        .map(|a| {
            ListItem::new(Line::from(vec![
                Span::raw(a.name.as_str()),
                Span::styled(format!(" ({})", a.album_count), Style::default().fg(theme.dim_colour)),
            ]))
        })
        .collect();

    render_list(
        f,
        chunks[0],
        " Artists ",
        artist_items,
        &mut browser.artists_state,
        browser.active_pane == MediaBrowserPane::Artist,
        theme,
    );

    let album_items: Vec<ListItem> = browser
        .albums
        .iter()
        .map(|a| {
            let year = a.year.as_deref().map(|y| format!(" {}", y)).unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::raw(a.title.as_str()),
                Span::styled(year, Style::default().fg(theme.dim_colour)),
            ]))
        })
        .collect();

    render_list(
        f,
        chunks[1],
        " Albums ",
        album_items,
        &mut browser.albums_state,
        browser.active_pane == MediaBrowserPane::Album,
        theme,
    );

    let width = browser.tracks.len().to_string().len().max(2);
    let track_items: Vec<ListItem> = browser
        .tracks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:0width$} ", i + 1), Style::default().fg(theme.dim_colour)),
                Span::raw(t.title.as_str()),
                Span::styled(format!("  {}", format_time(t.duration)), Style::default().fg(theme.dim_colour)),
            ]))
        })
        .collect();

    render_list(
        f,
        chunks[2],
        " Tracks ",
        track_items,
        &mut browser.tracks_state,
        browser.active_pane == MediaBrowserPane::Track,
        theme,
    );
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<ListItem>,
    state: &mut ListState,
    is_active: bool,
    theme: &Theme,
) {
    let border_style = if is_active {
        Style::default()
            .fg(theme.active_border_colour)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_colour)
    };

    let list = List::new(items)
        .style(Style::default().fg(theme.text_colour))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(theme.highlight_colour))
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, state);
}

fn draw_empty(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::vertical(area.height.saturating_sub(3) / 2));

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(theme.dim_colour))
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(paragraph, area);
}
