use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{debug, info};

use crate::app::{AppState, InputMode, KeyAction, ModalState};
use crate::ui;

/// How long the loop sleeps between frames. Spawned queries run during the sleep.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Whether the event loop should keep going after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: AppState) -> Result<()> {
    app.init();

    'outer: loop {
        app.tick();
        terminal
            .draw(|f| ui::render(f, &app))
            .context("draw frame")?;

        // crossterm blocks the thread while polling, so only drain what is
        // already queued and let tokio run in the sleep below.
        while event::poll(Duration::ZERO).context("poll terminal events")? {
            if let Event::Key(key) = event::read().context("read terminal event")? {
                if key.kind == KeyEventKind::Press && handle_key(&mut app, key).await == Flow::Quit {
                    break 'outer;
                }
            }
        }

        tokio::time::sleep(FRAME_INTERVAL).await;
    }

    info!("quit requested");
    Ok(())
}

/// Route one key press according to the current input mode.
pub async fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match app.input_mode {
        InputMode::Search => {
            handle_search_key(app, key);
            Flow::Continue
        }
        InputMode::Modal => {
            handle_modal_key(app, key).await;
            Flow::Continue
        }
        InputMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::StartSearch => app.begin_search(),
        KeyAction::DeleteSelection => app.request_delete_selected(),
        KeyAction::ToggleView => app.toggle_view(),
        KeyAction::CyclePageSize => app.cycle_page_size(),
        KeyAction::OpenHelp => app.open_help(),
        KeyAction::MoveUp => app.move_selection_up(),
        KeyAction::MoveDown => app.move_selection_down(),
        KeyAction::PrevPage => app.prev_page(),
        KeyAction::NextPage => app.next_page(),
        KeyAction::FirstPage => app.first_page(),
        KeyAction::LastPage => app.last_page(),
        KeyAction::Ignore => {}
    }
    Flow::Continue
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.end_search(),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_search_char(c)
        }
        _ => {}
    }
}

async fn handle_modal_key(app: &mut AppState, key: KeyEvent) {
    let Some(modal) = app.modal.clone() else {
        app.close_modal();
        return;
    };
    match modal {
        ModalState::DeleteConfirm { id, name, selected } => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                app.modal = Some(ModalState::DeleteConfirm {
                    id,
                    name,
                    selected: selected ^ 1,
                });
            }
            KeyCode::Char('y') => confirm_delete(app, &id).await,
            KeyCode::Enter if selected == 0 => confirm_delete(app, &id).await,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('n') => app.close_modal(),
            _ => {}
        },
        ModalState::Info { .. } | ModalState::Help => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                app.close_modal()
            }
            _ => {}
        },
    }
}

async fn confirm_delete(app: &mut AppState, id: &str) {
    app.close_modal();
    if let Err(e) = app.delete_user(id).await {
        debug!(user_id = id, error = %e, "delete reported to user");
    }
}
