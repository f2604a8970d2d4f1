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

//! Render the music player interface.
//!
//! This module renders the player bar: the current track, elapsed and total
//! time, a progress gauge, the transport controls and the volume.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    player::{PlayerState, coordinator::PlaybackSnapshot},
    render::icons::{ICON_LOADING, ICON_NEXT, ICON_PAUSE, ICON_PLAY, ICON_PREV, ICON_STOP, volume_icon},
    theme::Theme,
    util::format::format_time,
};

/// Renders the main player widget including track info and controls.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let snapshot = app.player.snapshot();

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16)])
        .split(chunks[0]);

    f.render_widget(Paragraph::new(track_line(&snapshot, theme)), info_chunks[0]);

    if snapshot.track.is_some() {
        let time_line = Line::from(vec![
            Span::styled(
                format_time(snapshot.position as u64),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(theme.accent_colour),
            Span::raw(" / ").fg(theme.text_colour),
            Span::styled(
                format_time(snapshot.duration as u64),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(theme.accent_colour),
        ]);
        f.render_widget(
            Paragraph::new(time_line).alignment(Alignment::Right),
            info_chunks[1],
        );
    }

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .ratio(snapshot.progress())
        .label("")
        .use_unicode(true);
    f.render_widget(position_gauge, chunks[1]);

    let control_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(chunks[2]);

    f.render_widget(
        Paragraph::new(transport_line(&snapshot, theme)),
        control_chunks[0],
    );

    let volume_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(5),
        ])
        .split(control_chunks[1]);

    f.render_widget(
        Paragraph::new(volume_icon(snapshot.volume)).fg(theme.text_colour),
        volume_layout[0],
    );

    let volume_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .ratio(snapshot.volume.clamp(0.0, 1.0))
        .label("")
        .use_unicode(true);
    f.render_widget(volume_gauge, volume_layout[1]);

    let volume_label = Paragraph::new(format!("{}%", (snapshot.volume * 100.0).round() as u16))
        .alignment(Alignment::Right)
        .fg(theme.text_colour);
    f.render_widget(volume_label, volume_layout[2]);
}

fn track_line<'a>(snapshot: &'a PlaybackSnapshot, theme: &Theme) -> Line<'a> {
    let Some(track) = &snapshot.track else {
        return Line::from(Span::raw("Nothing playing").fg(theme.dim_colour));
    };

    let icon = if snapshot.loading {
        ICON_LOADING
    } else {
        match snapshot.state {
            PlayerState::Playing => ICON_PLAY,
            PlayerState::Paused => ICON_PAUSE,
            PlayerState::Stopped => ICON_STOP,
        }
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled(format!("{} ", icon), bold).fg(theme.text_colour),
        Span::styled(track.title.as_str(), bold).fg(theme.accent_colour),
        Span::raw(" from ").fg(theme.dim_colour),
        Span::styled(track.album.as_str(), bold).fg(theme.accent_colour),
        Span::raw(" by ").fg(theme.dim_colour),
        Span::styled(track.artist.as_str(), bold).fg(theme.accent_colour),
    ])
}

// Previous and next are dimmed at the playlist bounds.
fn transport_line(snapshot: &PlaybackSnapshot, theme: &Theme) -> Line<'static> {
    let enabled = Style::default().fg(theme.text_colour);
    let disabled = Style::default().fg(theme.dim_colour);

    let has_previous = snapshot.track.is_some() && snapshot.index > 0;
    let has_next = snapshot.index + 1 < snapshot.playlist_len;
    let toggle = if snapshot.state == PlayerState::Playing {
        ICON_PAUSE
    } else {
        ICON_PLAY
    };

    let position = if snapshot.playlist_len > 0 {
        format!("   {}/{}", snapshot.index + 1, snapshot.playlist_len)
    } else {
        String::new()
    };

    Line::from(vec![
        Span::styled(ICON_PREV, if has_previous { enabled } else { disabled }),
        Span::raw("  "),
        Span::styled(toggle, if snapshot.track.is_some() { enabled } else { disabled }),
        Span::raw("  "),
        Span::styled(ICON_NEXT, if has_next { enabled } else { disabled }),
        Span::styled(position, disabled),
    ])
}
