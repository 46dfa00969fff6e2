use std::io;
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::client::ApiClient;

mod app;
pub mod modals;
pub mod types;
pub mod views;
mod worker;

use app::App;
use modals::product_form::ProductFormModal;

fn draw(frame: &mut Frame, app: &mut App) {
    let rows = app.state.rows();
    views::products::draw(
        frame,
        &rows,
        app.state.stats(),
        &mut app.table_state,
        app.notifier.current(),
        app.confirm_delete.as_ref().map(|p| p.name.as_str()),
        app.busy,
        app.last_refresh,
    );

    if let Some(modal) = &app.form_modal {
        modals::product_form::draw(frame, modal);
    }
}

pub async fn run(client: ApiClient) -> io::Result<()> {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let (result_tx, result_rx) = mpsc::unbounded_channel();
    tokio::spawn(worker::action_worker(client, action_rx, result_tx));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(action_tx, result_rx);
    app.load();

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        // Check for results from background worker
        while let Ok(result) = app.result_rx.try_recv() {
            app.handle_result(result);
        }
        app.notifier.expire(Instant::now());

        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if app.form_modal.is_some() {
                handle_form_modal_input(app, key.code);
            } else if app.confirm_delete.is_some() {
                handle_confirm_delete_input(app, key.code);
            } else {
                handle_normal_input(app, key.code);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_form_modal_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Esc => app.close_form_modal(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(modal) = &mut app.form_modal {
                modal.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(modal) = &mut app.form_modal {
                modal.focus_prev();
            }
        }
        KeyCode::Enter => {
            let on_submit = app
                .form_modal
                .as_ref()
                .is_some_and(|modal| modal.is_submit_field());
            if on_submit {
                app.submit_form();
            } else if let Some(modal) = &mut app.form_modal {
                modal.focus_next();
            }
        }
        KeyCode::Backspace => {
            if let Some(modal) = &mut app.form_modal
                && let Some(input) = modal.current_input()
            {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(modal) = &mut app.form_modal {
                let accepted =
                    !modal.is_numeric_field() || ProductFormModal::is_valid_numeric_char(c);
                if accepted && let Some(input) = modal.current_input() {
                    input.push(c);
                }
            }
        }
        _ => {}
    }
}

fn handle_confirm_delete_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

fn handle_normal_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char('a') => app.open_add_modal(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_selected(),
        KeyCode::Char('d') => app.request_delete_selected(),
        KeyCode::Char('r') => app.load(),
        _ => {}
    }
}
