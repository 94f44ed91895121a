//! Shared UI components (pager, status bar, modal helpers).
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState};
use crate::config::PAGE_SIZE_OPTIONS;

/// Most page buttons shown at once; the rest collapse into "…".
const PAGER_WINDOW: usize = 9;

/// Page numbers to draw, windowed around `current`. `None` marks an elision.
pub fn pager_items(pages: &[u32], current: u32) -> Vec<Option<u32>> {
    if pages.len() <= PAGER_WINDOW {
        return pages.iter().copied().map(Some).collect();
    }
    let last = pages.len() as u32;
    let half = (PAGER_WINDOW as u32 - 2) / 2;
    let start = current.saturating_sub(half).max(2);
    let end = (start + PAGER_WINDOW as u32 - 3).min(last - 1);
    let start = end.saturating_sub(PAGER_WINDOW as u32 - 3).max(2);

    let mut out = vec![Some(1)];
    if start > 2 {
        out.push(None);
    }
    out.extend((start..=end).map(Some));
    if end < last - 1 {
        out.push(None);
    }
    out.push(Some(last));
    out
}

/// Render the page buttons and the page-size selector.
pub fn render_pager(f: &mut Frame, area: Rect, app: &AppState) {
    let current = app.current_page();
    let selected = Style::default()
        .fg(app.theme.highlight_fg)
        .add_modifier(Modifier::REVERSED | Modifier::BOLD);
    let normal = Style::default().fg(app.theme.text);

    let mut spans = vec![Span::raw(" Pages: ")];
    for item in pager_items(&app.pages, current) {
        match item {
            Some(p) if p == current => spans.push(Span::styled(format!(" {p} "), selected)),
            Some(p) => spans.push(Span::styled(format!(" {p} "), normal)),
            None => spans.push(Span::raw(" … ")),
        }
    }
    spans.push(Span::raw("   Per page: "));
    for n in PAGE_SIZE_OPTIONS {
        let style = if n == app.items_per_page { selected } else { normal };
        spans.push(Span::styled(format!(" {n} "), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the bottom status bar with mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let loading = if app.is_loading() { "  loading..." } else { "" };
    let msg = format!(
        "mode: {mode}  matches:{}  page:{}/{}  per page:{}  view:{}{loading}",
        app.result.total_count,
        app.current_page(),
        app.total_pages(),
        app.items_per_page,
        app.view_mode.label(),
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn render_delete_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::DeleteConfirm { id, name, selected } = state {
        let rect = centered_rect(50, 7, area);
        let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
        let no = if *selected == 1 { "[No]" } else { " No " };
        let body = format!("Delete user '{name}' ({id})?\n\n  {yes}    {no}");
        let p = Paragraph::new(body).block(
            Block::default()
                .title("Confirm delete")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

/// Width and height of the info dialog for a message of `message_len` bytes.
fn info_modal_size(area: Rect, message_len: usize) -> (u16, u16) {
    let max_w = area.width.saturating_sub(6).max(30);
    let width = 40u16.min(max_w);
    let msg_len = u16::try_from(message_len).unwrap_or(u16::MAX);
    let approx_lines = (msg_len / width.saturating_sub(4).max(10)).max(1);
    let max_h = area.height.saturating_sub(6).max(5);
    let height = approx_lines.saturating_add(4).min(max_h).max(5);
    (width, height)
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::Info { message } = state {
        let (width, height) = info_modal_size(area, message.len());
        let rect = centered_rect(width, height, area);
        let p = Paragraph::new(message.clone())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Info")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border)),
            );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}

/// Render the help modal listing the active keybindings.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 20u16.min(area.height.saturating_sub(2)).max(10);
    let rect = centered_rect(width, height, area);

    let rows = [
        ("Search", KeyAction::StartSearch),
        ("Toggle card/row view", KeyAction::ToggleView),
        ("Cycle page size", KeyAction::CyclePageSize),
        ("Delete selected user", KeyAction::DeleteSelection),
        ("Move up", KeyAction::MoveUp),
        ("Move down", KeyAction::MoveDown),
        ("Previous page", KeyAction::PrevPage),
        ("Next page", KeyAction::NextPage),
        ("First page", KeyAction::FirstPage),
        ("Last page", KeyAction::LastPage),
        ("Quit", KeyAction::Quit),
    ];
    let mut lines = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::raw(""),
    ];
    for (label, action) in rows {
        lines.push(Line::from(vec![
            Span::raw(format!("{label:<24}")),
            Span::styled(
                app.keymap.keys_for(action).join(", "),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("In search: type to filter, Enter keeps, Esc clears."));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
