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

//! Render the bottom line.
//!
//! While the command line is open it shows the prompt, the current text and
//! the cursor; otherwise it shows the latest status message.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::App;

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;
    let theme = &app.theme;

    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    if commander.active() {
        f.render_widget(
            Paragraph::new(format!(":{}", commander.input.value())).style(
                Style::default()
                    .fg(theme.commander_colour)
                    .bg(theme.gauge_track_colour),
            ),
            container[0],
        );

        let cursor_x = container[0].x + 1 + commander.input.cursor() as u16;
        let cursor_y = container[0].y;
        f.set_cursor_position((cursor_x, cursor_y));
        return;
    }

    let (text, colour) = match &app.status {
        Some(status) if status.is_error => (status.text.as_str(), theme.error_colour),
        Some(status) => (status.text.as_str(), theme.dim_colour),
        None => ("", theme.dim_colour),
    };

    let backend = format!("[{}] ", app.player.backend_name());
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(backend.len() as u16)])
        .split(container[0]);

    f.render_widget(Paragraph::new(text).style(Style::default().fg(colour)), layout[0]);
    f.render_widget(
        Paragraph::new(backend).style(Style::default().fg(theme.dim_colour)),
        layout[1],
    );
}
