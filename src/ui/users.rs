use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::AppState;
use crate::store::UserRecord;

const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: u16 = 5;

fn list_block<'a>(app: &AppState, title: &'a str) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    block = if app.is_loading() {
        block.title(Line::from(vec![
            Span::raw(title),
            Span::styled(" (loading...)", Style::default().fg(app.theme.loading)),
        ]))
    } else {
        block.title(title)
    };
    block
}

/// Placeholder for a page without rows. Returns true if it drew something.
fn render_empty(f: &mut Frame, area: Rect, app: &AppState, title: &str) -> bool {
    if !app.result.items.is_empty() {
        return false;
    }
    let msg = if app.is_loading() {
        "Loading..."
    } else {
        "No users found"
    };
    let p = Paragraph::new(msg)
        .style(Style::default().fg(app.theme.muted))
        .block(list_block(app, title));
    f.render_widget(p, area);
    true
}

/// Index range of the window of `capacity` items that contains `selected`.
fn visible_window(selected: usize, capacity: usize, len: usize) -> std::ops::Range<usize> {
    let capacity = capacity.max(1);
    let start = (selected.min(len.saturating_sub(1)) / capacity) * capacity;
    start..(start + capacity).min(len)
}

fn status_span(app: &AppState, u: &UserRecord) -> Span<'static> {
    if u.is_active {
        Span::styled("active", Style::default().fg(app.theme.active))
    } else {
        Span::styled("inactive", Style::default().fg(app.theme.inactive))
    }
}

pub fn render_user_rows(f: &mut Frame, area: Rect, app: &AppState) {
    if render_empty(f, area, app, "Users") {
        return;
    }

    // Borders plus header row
    let body_height = area.height.saturating_sub(3) as usize;
    let window = visible_window(app.selected_index, body_height, app.result.items.len());
    let start = window.start;

    let rows = app.result.items[window].iter().enumerate().map(|(i, u)| {
        let style = if start + i == app.selected_index {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.id.clone()),
            Cell::from(u.display_name.clone()),
            Cell::from(status_span(app, u)),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(8),
        Constraint::Percentage(60),
        Constraint::Length(10),
    ];
    let header = Row::new(vec!["ID", "NAME", "STATUS"]).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(list_block(app, "Users"))
        .column_spacing(1);
    f.render_widget(table, area);
}

pub fn render_user_cards(f: &mut Frame, area: Rect, app: &AppState) {
    if render_empty(f, area, app, "Users") {
        return;
    }

    let outer = list_block(app, "Users");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let cols = (inner.width / CARD_WIDTH).max(1) as usize;
    let rows = (inner.height / CARD_HEIGHT).max(1) as usize;
    let window = visible_window(app.selected_index, cols * rows, app.result.items.len());
    let start = window.start;

    for (i, u) in app.result.items[window].iter().enumerate() {
        let col = (i % cols) as u16;
        let row = (i / cols) as u16;
        let rect = Rect {
            x: inner.x + col * CARD_WIDTH,
            y: inner.y + row * CARD_HEIGHT,
            width: CARD_WIDTH.min(inner.width),
            height: CARD_HEIGHT.min(inner.height),
        };

        let selected = start + i == app.selected_index;
        let border = if selected {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.border)
        };
        let body = vec![
            Line::from(Span::styled(
                u.display_name.clone(),
                Style::default()
                    .fg(app.theme.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("id: {}", u.id),
                Style::default().fg(app.theme.muted),
            )),
            Line::from(status_span(app, u)),
        ];
        let card = Paragraph::new(body).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border),
        );
        f.render_widget(card, rect);
    }
}
