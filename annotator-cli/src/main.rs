//! Annotator CLI - Terminal-based span annotator

mod config;
mod io;
mod ui;

use std::fs::OpenOptions;
use std::io::stdout;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use annotator_core::{Mode, Session};

use crate::config::{Args, Config};
use crate::io::FileSink;

fn main() -> Result<()> {
    let config = Config::from_args(Args::parse())?;
    init_logging(&config)?;

    let mut session = Session::new(config.store);
    session.set_label(&config.label);

    if let Some(path) = &config.file {
        match io::load_file(path) {
            Ok((title, content)) => {
                session.load_text(&title, &content);
                session.set_status(&format!("Loaded {}", path.display()));
            }
            Err(e) => {
                tracing::warn!("could not load {}: {:#}", path.display(), e);
                session.set_status(&format!("Error: {}", e));
            }
        }
    } else {
        session.set_status("Select text with 'v', label it with 'L', save with 's'. '?' for help");
    }

    let mut sink = FileSink::new(config.out_dir.clone());
    tracing::info!(out_dir = %config.out_dir.display(), "annotator started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut session, &mut sink);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        tracing::error!("{:#}", e);
        eprintln!("Error: {}", e);
    }
    if !session.store.is_empty() {
        eprintln!(
            "{} annotation(s) were not finalized and have been discarded",
            session.store.len()
        );
    }

    Ok(())
}

/// Log to a file in the output directory; the terminal belongs to the UI
fn init_logging(config: &Config) -> Result<()> {
    let path = config.out_dir.join("annotator.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ANNOTATOR_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    sink: &mut FileSink,
) -> Result<()> {
    while session.running {
        terminal.draw(|f| ui::draw(f, session))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            session.clear_status();

            match session.mode {
                Mode::Normal => handle_normal_mode(session, key.code, sink),
                Mode::Visual => handle_visual_mode(session, key.code),
                Mode::Insert => handle_insert_mode(session, key.code),
                Mode::Label => handle_label_mode(session, key.code),
                Mode::Help => session.mode = Mode::Normal,
            }
        }
    }
    Ok(())
}

/// Caret movement shared by normal and visual mode
fn handle_motion(session: &mut Session, code: KeyCode) -> bool {
    let surface = &mut session.surface;
    match code {
        KeyCode::Char('j') | KeyCode::Down => surface.move_down(),
        KeyCode::Char('k') | KeyCode::Up => surface.move_up(),
        KeyCode::Char('h') | KeyCode::Left => surface.move_left(),
        KeyCode::Char('l') | KeyCode::Right => surface.move_right(),
        KeyCode::Char('w') => surface.move_word_forward(),
        KeyCode::Char('b') => surface.move_word_back(),
        KeyCode::Char('0') | KeyCode::Home => surface.move_to_start(),
        KeyCode::Char('$') | KeyCode::End => surface.move_to_end(),
        KeyCode::Char('g') => surface.move_to_top(),
        KeyCode::Char('G') => surface.move_to_bottom(),
        _ => return false,
    }
    true
}

fn handle_normal_mode(session: &mut Session, code: KeyCode, sink: &mut FileSink) {
    if handle_motion(session, code) {
        return;
    }

    match code {
        KeyCode::Char('q') => session.running = false,
        KeyCode::Char('?') => session.mode = Mode::Help,
        KeyCode::Char('v') => session.enter_visual_mode(),
        KeyCode::Char('i') => session.enter_insert_mode(),
        KeyCode::Char('L') => session.begin_label_edit(),
        KeyCode::Char('F') => {
            if session.finalize(sink) {
                if let Some(path) = sink.last_written() {
                    let msg = format!("Finalized: {}", path.display());
                    session.set_status(&msg);
                }
            }
        }
        _ => {}
    }
}

fn handle_visual_mode(session: &mut Session, code: KeyCode) {
    if handle_motion(session, code) {
        return;
    }

    match code {
        KeyCode::Esc => session.cancel_selection(),
        KeyCode::Char('s') | KeyCode::Enter => {
            session.save_selection();
        }
        _ => {}
    }
}

fn handle_insert_mode(session: &mut Session, code: KeyCode) {
    if code == KeyCode::Esc {
        session.exit_to_normal();
        return;
    }

    let surface = &mut session.surface;
    match code {
        KeyCode::Enter => surface.insert_newline(),
        KeyCode::Backspace => surface.backspace(),
        KeyCode::Delete => surface.delete(),
        KeyCode::Left => surface.move_left(),
        KeyCode::Right => surface.move_right(),
        KeyCode::Up => surface.move_up(),
        KeyCode::Down => surface.move_down(),
        KeyCode::Home => surface.move_to_start(),
        KeyCode::End => surface.move_to_end(),
        KeyCode::Char(c) => surface.insert_char(c),
        _ => {}
    }
}

fn handle_label_mode(session: &mut Session, code: KeyCode) {
    match code {
        KeyCode::Esc => session.cancel_label_edit(),
        KeyCode::Enter => session.commit_label(),
        KeyCode::Backspace => {
            session.label_buffer.pop();
        }
        KeyCode::Char(c) => session.label_buffer.push(c),
        _ => {}
    }
}
