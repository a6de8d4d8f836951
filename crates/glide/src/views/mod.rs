//! View rendering modules

mod code;
mod image;
mod text;

use crate::app::App;
use glide_core::Slide;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    if app.orchestrator.is_computing() {
        render_waiting(frame, chunks[1]);
    } else {
        match app.current_slide() {
            Slide::Code(slide) => code::render_code(frame, app, slide, chunks[1]),
            Slide::Text(slide) => text::render_text(frame, slide, chunks[1]),
            Slide::Image(slide) => image::render_image(frame, slide, chunks[1]),
        }
    }

    render_footer(frame, app, chunks[2]);
}

/// Neutral waiting state while transitions are being precomputed
fn render_waiting(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("Please wait while we prepare the presentation...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, middle_row(area));
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    if !app.config.show_title {
        return;
    }
    let title = match app.current_slide() {
        Slide::Code(code) => code.title.clone().unwrap_or_default(),
        _ => String::new(),
    };
    let paragraph = Paragraph::new(title)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let step_part = match app.current_slide() {
        Slide::Code(code) if code.steps.len() > 1 => {
            format!("step {}/{}  ", app.current_step() + 1, code.steps.len())
        }
        _ => String::new(),
    };
    let text = format!(
        "slide {}/{}  {}←/→ navigate  q quit",
        app.slide_index + 1,
        app.deck.len(),
        step_part
    );
    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// The single row at the vertical center of an area
fn middle_row(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}
