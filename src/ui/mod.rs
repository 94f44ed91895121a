pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState, ViewMode};

pub fn render(f: &mut Frame, app: &AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let cursor = if app.input_mode == InputMode::Search { "▏" } else { "" };
    let applied = if app.search_input != app.search_query {
        "  (pending)"
    } else {
        ""
    };
    let p = Paragraph::new(format!(
        "Search: {}{cursor}{applied}    /: search  v: view  s: page size  d: delete  ?: help  q: quit",
        app.search_input
    ))
    .block(
        Block::default()
            .title("usrlist-manager")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    match app.view_mode {
        ViewMode::Card => users::render_user_cards(f, root[1], app),
        ViewMode::Row => users::render_user_rows(f, root[1], app),
    }

    components::render_pager(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    if let Some(state) = &app.modal {
        match state {
            ModalState::DeleteConfirm { .. } => components::render_delete_modal(f, f.area(), app, state),
            ModalState::Info { .. } => components::render_info_modal(f, f.area(), app, state),
            ModalState::Help => components::render_help_modal(f, f.area(), app),
        }
    }
}
