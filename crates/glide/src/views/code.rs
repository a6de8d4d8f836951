//! Animated code slide rendering
//!
//! A step transition paints three families of tokens straight into the
//! frame buffer: unchanged tokens interpolate from their old position
//! toward rest, removed tokens dim out where they used to be, and added
//! tokens appear at their final position once the travel settles.

use crate::app::{AnimationPhase, App};
use glide_core::{
    CodeSlide, Layer, LayerRun, MeasureSurface, MonospaceSurface, Point, PrecomputedDiff,
    SegmentKind,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render_code(frame: &mut Frame, app: &App, slide: &CodeSlide, area: Rect) {
    let step = app.current_step();
    let Some(text) = slide.steps.get(step).map(|s| s.value.as_str()) else {
        return;
    };

    let phase = app.animation_phase();
    if step == 0 || phase == AnimationPhase::Idle {
        render_static(frame, text, area, app.config.wrap_code);
        return;
    }
    match app.orchestrator.diff_for_step(step) {
        Some(diff) => render_transition(frame, app, diff, phase, area),
        None => render_static(frame, text, area, app.config.wrap_code),
    }
}

fn render_static(frame: &mut Frame, text: &str, area: Rect, wrap: bool) {
    let mut paragraph = Paragraph::new(text);
    if wrap {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    frame.render_widget(paragraph, area);
}

fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn render_transition(
    frame: &mut Frame,
    app: &App,
    diff: &PrecomputedDiff,
    phase: AnimationPhase,
    area: Rect,
) {
    // rest positions on the after layout, in terminal cells, measured with
    // the same surface the orchestrator used
    let after_runs: Vec<LayerRun> = diff
        .segments
        .iter()
        .enumerate()
        .filter(|(_, seg)| seg.in_after())
        .map(|(i, seg)| LayerRun {
            segment: i,
            text: &seg.text,
        })
        .collect();
    let rests = rest_origins(&app.surface(), &Layer::new(after_runs), diff.segments.len());

    let buf = frame.buffer_mut();
    for (i, seg) in diff.segments.iter().enumerate() {
        match seg.kind {
            SegmentKind::Unchanged => {
                let Some(rest) = rests[i] else { continue };
                let remaining = match phase {
                    AnimationPhase::Sliding(p) => 1.0 - ease_in_out(p),
                    _ => 0.0,
                };
                let pos = Point::new(
                    rest.top + seg.from.top * remaining,
                    rest.left + seg.from.left * remaining,
                );
                draw_run(buf, area, pos, &seg.text, Style::default());
            }
            SegmentKind::Added => {
                let style = match phase {
                    AnimationPhase::Sliding(_) => continue,
                    AnimationPhase::Settling(p) if p < 0.5 => {
                        Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
                    }
                    _ => Style::default().fg(Color::Green),
                };
                draw_run(buf, area, seg.from, &seg.text, style);
            }
            SegmentKind::Removed => {
                let style = match phase {
                    AnimationPhase::Sliding(p) if p < 0.4 => Style::default().fg(Color::Red),
                    AnimationPhase::Sliding(p) if p < 0.8 => {
                        Style::default().fg(Color::Red).add_modifier(Modifier::DIM)
                    }
                    _ => continue,
                };
                draw_run(buf, area, seg.from, &seg.text, style);
            }
        }
    }
}

/// Measure the after layout and index the origins by segment position
fn rest_origins(
    surface: &MonospaceSurface,
    layer: &Layer<'_>,
    segment_count: usize,
) -> Vec<Option<Point>> {
    let measured = surface.measure(layer);
    let mut origins = vec![None; segment_count];
    for (run, point) in layer.runs.iter().zip(measured) {
        origins[run.segment] = point;
    }
    origins
}

/// Paint one run into the buffer at a cell position, splitting at line
/// breaks and clipping to the viewport.
fn draw_run(buf: &mut Buffer, area: Rect, origin: Point, text: &str, style: Style) {
    let mut row = origin.top.round() as i64;
    let mut col = origin.left.round() as i64;
    let mut first = true;
    for line in text.split('\n') {
        if !first {
            row += 1;
            col = 0;
        }
        first = false;
        if line.is_empty() {
            continue;
        }
        if row < 0 || col < 0 || row >= i64::from(area.height) || col >= i64::from(area.width) {
            continue;
        }
        let x = area.x + col as u16;
        let y = area.y + row as u16;
        let max_width = (area.width - col as u16) as usize;
        buf.set_stringn(x, y, line, max_width, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!(ease_in_out(0.5) > 0.4 && ease_in_out(0.5) < 0.6);
    }

    #[test]
    fn test_draw_run_clips_to_area() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        draw_run(
            &mut buf,
            area,
            Point::new(0.0, 6.0),
            "overflowing",
            Style::default(),
        );
        // only four cells fit before the right edge
        assert_eq!(buf[(6, 0)].symbol(), "o");
        assert_eq!(buf[(9, 0)].symbol(), "r");
    }

    #[test]
    fn test_draw_run_breaks_lines() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        draw_run(&mut buf, area, Point::new(0.0, 2.0), "ab\ncd", Style::default());
        assert_eq!(buf[(2, 0)].symbol(), "a");
        assert_eq!(buf[(0, 1)].symbol(), "c");
    }

    #[test]
    fn test_draw_run_skips_out_of_bounds_rows() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        // second line falls below the viewport; must not panic
        draw_run(&mut buf, area, Point::new(0.0, 0.0), "a\nb", Style::default());
        assert_eq!(buf[(0, 0)].symbol(), "a");
    }
}
