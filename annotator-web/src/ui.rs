//! Terminal UI rendering for the web front end
//!
//! Mirrors annotator-cli's UI but renders through ratzilla.

use ratzilla::ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use annotator_core::{Mode, Session};

// Catppuccin Mocha colors
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const YELLOW: Color = Color::Rgb(249, 226, 175);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);
const TEAL: Color = Color::Rgb(148, 226, 213);

pub fn draw(frame: &mut Frame, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, session, chunks[0]);
    draw_main_area(frame, session, chunks[1]);
    draw_status_bar(frame, session, chunks[2]);

    match session.mode {
        Mode::Label => draw_label_dialog(frame, session),
        Mode::Help => draw_help(frame),
        _ => {}
    }
}

fn draw_title_bar(frame: &mut Frame, session: &Session, area: Rect) {
    let title_text = format!(
        " Annotator (Web) - {} [{} saved]",
        session.title,
        session.store.len()
    );

    let title_bar = Paragraph::new(title_text).style(Style::default().fg(TEXT).bg(SURFACE0));

    frame.render_widget(title_bar, area);
}

fn draw_main_area(frame: &mut Frame, session: &Session, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Editor
            Constraint::Length(40), // Label + annotations
        ])
        .split(area);

    draw_editor(frame, session, chunks[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(chunks[1]);

    draw_label(frame, session, side[0]);
    draw_annotations(frame, session, side[1]);
}

fn draw_editor(frame: &mut Frame, session: &Session, area: Rect) {
    let mode_indicator = match session.mode {
        Mode::Visual => " [VISUAL]",
        Mode::Insert => " [INSERT]",
        _ => "",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title(format!("Text{}", mode_indicator));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let surface = &session.surface;
    let selection = session.selection_range();
    let annotations = session.store.annotations();
    let caret = surface.caret_offset();

    let lines: Vec<Line> = surface
        .lines()
        .enumerate()
        .map(|(row, line_text)| {
            let line_start = surface.cursor_to_offset(row, 0);
            let spans: Vec<Span> = line_text
                .chars()
                .enumerate()
                .map(|(col, ch)| {
                    let offset = line_start + col;
                    let mut style = Style::default().fg(TEXT);

                    if annotations.iter().any(|a| a.range.contains(offset)) {
                        style = style.fg(YELLOW).add_modifier(Modifier::UNDERLINED);
                    }
                    if let Some((sel_start, sel_end)) = selection {
                        if offset >= sel_start && offset < sel_end {
                            style = style.bg(SURFACE1).add_modifier(Modifier::BOLD);
                        }
                    }
                    if offset == caret {
                        style = style.add_modifier(Modifier::REVERSED);
                    }

                    Span::styled(ch.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    // Keep the caret row on screen
    let (row, _) = surface.cursor();
    let visible_height = inner.height as usize;
    let scroll_offset = if visible_height > 0 && row >= visible_height {
        row - visible_height + 1
    } else {
        0
    };

    let paragraph = Paragraph::new(lines).scroll((scroll_offset as u16, 0));
    frame.render_widget(paragraph, inner);
}

fn draw_label(frame: &mut Frame, session: &Session, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT0))
        .title("Label");

    let label = if session.label.is_empty() {
        Span::styled("e.g. INGREDIENT, PERSON, CITY", Style::default().fg(SUBTEXT0))
    } else {
        Span::styled(session.label.as_str(), Style::default().fg(TEAL))
    };

    frame.render_widget(Paragraph::new(Line::from(label)).block(block), area);
}

fn draw_annotations(frame: &mut Frame, session: &Session, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT0))
        .title(format!("Annotations ({})", session.store.len()));

    let log = Paragraph::new(session.render())
        .style(Style::default().fg(TEXT))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(log, area);
}

fn draw_status_bar(frame: &mut Frame, session: &Session, area: Rect) {
    let mode_str = match session.mode {
        Mode::Normal => "NORMAL",
        Mode::Visual => "VISUAL",
        Mode::Insert => "INSERT",
        Mode::Label => "LABEL",
        Mode::Help => "HELP",
    };

    let status = session.status_message.as_deref().unwrap_or("");

    let help_hint = "v select | s save | S save page selection | L label | F download | ? help";

    let status_text = format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    );

    let status_bar = Paragraph::new(status_text).style(Style::default().fg(SUBTEXT0).bg(SURFACE0));

    frame.render_widget(status_bar, area);
}

fn draw_label_dialog(frame: &mut Frame, session: &Session) {
    let area = centered_rect(50, 3, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GREEN))
        .title("Label for selected text (Enter to set)");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = Paragraph::new(format!("{}_", session.label_buffer)).style(Style::default().fg(TEXT));
    frame.render_widget(input, inner);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let heading = Style::default().fg(MAUVE).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Navigation", heading)),
        Line::from("  h/j/k/l  Move caret"),
        Line::from("  w/b      Next/prev word"),
        Line::from("  0/$      Line start/end"),
        Line::from("  g/G      Go to top/bottom"),
        Line::from(""),
        Line::from(Span::styled("Annotations", heading)),
        Line::from("  v        Start selecting"),
        Line::from("  s/Enter  Save selection with current label"),
        Line::from("  L        Edit label"),
        Line::from("  S        Save the page's text selection"),
        Line::from("  F        Finalize: download annotations.json and clear"),
        Line::from(""),
        Line::from(Span::styled("Text", heading)),
        Line::from("  i        Edit text (Esc to leave)"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(SUBTEXT0))),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
