//! Text slide rendering

use glide_core::TextSlide;
use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render_text(frame: &mut Frame, slide: &TextSlide, area: Rect) {
    let paragraph = Paragraph::new(slide.content.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, vertically_centered(area, &slide.content));
}

fn vertically_centered(area: Rect, content: &str) -> Rect {
    let lines = content.lines().count().max(1) as u16;
    let height = lines.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}
