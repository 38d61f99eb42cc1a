//! Annotator Web - WebAssembly version of the span annotator
//!
//! Renders the annotator through Ratzilla and downloads the finalized
//! `annotations.json` through the browser. If the page carries an element
//! with id `annotator-source`, its text seeds the editor and its native
//! text selection can be saved with `S`.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::Terminal;
use ratzilla::{event::KeyCode, DomBackend, WebRenderer};
use wasm_bindgen::prelude::*;

use annotator_core::{Mode, OffsetMode, Session, StoreConfig};

pub mod dom;
pub mod io;
mod ui;

/// Initialize the annotator web application
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug)
        .map_err(|e| JsValue::from_str(&format!("Failed to initialize logger: {}", e)))?;

    let mut session = Session::new(StoreConfig::default());
    if let Some(text) = dom::source_text() {
        session.load_text("Page text", &text);
    }
    session.set_status("Press 'v' to start selecting, 'L' to set a label, '?' for help");

    let session = Rc::new(RefCell::new(session));

    let backend = DomBackend::new()
        .map_err(|e| JsValue::from_str(&format!("Failed to create backend: {:?}", e)))?;
    let mut terminal = Terminal::new(backend)
        .map_err(|e| JsValue::from_str(&format!("Failed to create terminal: {:?}", e)))?;

    terminal.on_key_event({
        let session = session.clone();
        move |event| {
            let mut session = session.borrow_mut();
            session.clear_status();

            match session.mode {
                Mode::Normal => handle_normal_mode(&mut session, event.code),
                Mode::Visual => handle_visual_mode(&mut session, event.code),
                Mode::Insert => handle_insert_mode(&mut session, event.code),
                Mode::Label => handle_label_mode(&mut session, event.code),
                Mode::Help => session.mode = Mode::Normal,
            }
        }
    });

    terminal.draw_web(move |frame| {
        let session = session.borrow();
        ui::draw(frame, &session);
    });

    log::info!("annotator wasm initialized");

    Ok(())
}

/// Caret movement shared by normal and visual mode
fn handle_motion(session: &mut Session, code: &KeyCode) -> bool {
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

fn handle_normal_mode(session: &mut Session, code: KeyCode) {
    if handle_motion(session, &code) {
        return;
    }

    match code {
        KeyCode::Char('?') => session.mode = Mode::Help,
        KeyCode::Char('v') => session.enter_visual_mode(),
        KeyCode::Char('i') => session.enter_insert_mode(),
        KeyCode::Char('L') => session.begin_label_edit(),
        KeyCode::Char('S') => {
            let candidate = dom::capture_source_selection(OffsetMode::FullText);
            session.save_candidate(candidate);
        }
        KeyCode::Char('F') => {
            session.finalize(&mut io::BrowserDownload);
        }
        _ => {}
    }
}

fn handle_visual_mode(session: &mut Session, code: KeyCode) {
    if handle_motion(session, &code) {
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
    if matches!(code, KeyCode::Esc) {
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
