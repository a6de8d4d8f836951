//! Image slide rendering
//!
//! Terminals do not raster arbitrary images; slides render as a framed
//! card naming the asset, with the caption underneath.

use glide_core::ImageSlide;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render_image(frame: &mut Frame, slide: &ImageSlide, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::styled("[ image ]", Style::default().fg(Color::DarkGray)),
        Line::from(slide.url.as_str()),
    ];
    if let Some(caption) = &slide.caption {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            caption.as_str(),
            Style::default().fg(Color::Gray),
        ));
    }

    let height = (lines.len() as u16 + 2).min(area.height);
    let card = Rect {
        y: area.y + (area.height.saturating_sub(height)) / 2,
        height,
        ..area
    };
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    frame.render_widget(paragraph, card);
}
