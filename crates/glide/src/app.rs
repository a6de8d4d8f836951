//! Application state and input handling

use crate::config::Config;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use glide_core::{Deck, MonospaceSurface, Orchestrator, Slide};
use std::time::Instant;

/// Fraction of the transition spent travelling before added tokens settle in
const SLIDE_SHARE: f64 = 2.0 / 3.0;

/// Where the current step transition is in its playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationPhase {
    /// No transition playing; the step renders statically
    Idle,
    /// Unchanged tokens travel, removed tokens fade out
    Sliding(f64),
    /// Added tokens fade in
    Settling(f64),
}

pub struct App {
    pub deck: Deck,
    pub config: Config,
    pub slide_index: usize,
    /// Current step per slide (non-code slides stay at 0)
    step_indices: Vec<usize>,
    pub orchestrator: Orchestrator,
    animation_started: Option<Instant>,
    /// Width of the code viewport, in cells (0 until the first resize)
    viewport_width: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(deck: Deck, config: Config) -> Self {
        let step_indices = deck
            .slides
            .iter()
            .map(|slide| match slide.as_code() {
                Some(code) => code.current_step.min(code.steps.len().saturating_sub(1)),
                None => 0,
            })
            .collect();
        let mut app = Self {
            deck,
            config,
            slide_index: 0,
            step_indices,
            orchestrator: Orchestrator::new(),
            animation_started: None,
            viewport_width: 0,
            should_quit: false,
        };
        app.activate_slide();
        app
    }

    pub fn current_slide(&self) -> &Slide {
        &self.deck.slides[self.slide_index]
    }

    pub fn current_step(&self) -> usize {
        self.step_indices[self.slide_index]
    }

    /// Measurement surface matching the current code viewport
    pub fn surface(&self) -> MonospaceSurface {
        let surface = MonospaceSurface::new();
        if self.config.wrap_code && self.viewport_width > 0 {
            surface.with_wrap(self.viewport_width as usize)
        } else {
            surface
        }
    }

    /// Track the code viewport width; in wrap mode a change re-measures
    /// the active slide
    pub fn on_resize(&mut self, width: u16) {
        if width == self.viewport_width {
            return;
        }
        self.viewport_width = width;
        if self.config.wrap_code && self.current_slide().is_code() {
            self.activate_slide();
        }
    }

    /// Precompute every transition for the slide that just became active
    fn activate_slide(&mut self) {
        self.animation_started = None;
        let surface = self.surface();
        match &self.deck.slides[self.slide_index] {
            Slide::Code(code) => {
                let steps = code.steps.clone();
                self.orchestrator.recompute(&steps, &surface);
                tracing::debug!(
                    slide = self.slide_index,
                    steps = steps.len(),
                    "precomputed code slide transitions"
                );
            }
            _ => self.orchestrator.reset(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('j') | KeyCode::Enter => {
                self.advance()
            }
            KeyCode::Left | KeyCode::Char('k') | KeyCode::Backspace => self.retreat(),
            KeyCode::Home => self.jump_to_slide(0),
            KeyCode::End => self.jump_to_slide(self.deck.len().saturating_sub(1)),
            _ => {}
        }
    }

    /// Next step within a code slide, otherwise next slide
    fn advance(&mut self) {
        if self.orchestrator.is_computing() {
            return;
        }
        if let Slide::Code(code) = self.current_slide() {
            let step = self.step_indices[self.slide_index];
            if step + 1 < code.steps.len() {
                self.step_indices[self.slide_index] = step + 1;
                self.animation_started = Some(Instant::now());
                return;
            }
        }
        if self.slide_index + 1 < self.deck.len() {
            self.jump_to_slide(self.slide_index + 1);
        }
    }

    /// Stepping backwards renders statically; only forward steps animate
    fn retreat(&mut self) {
        if self.current_slide().is_code() {
            let step = self.step_indices[self.slide_index];
            if step > 0 {
                self.step_indices[self.slide_index] = step - 1;
                self.animation_started = None;
                return;
            }
        }
        if self.slide_index > 0 {
            self.jump_to_slide(self.slide_index - 1);
        }
    }

    fn jump_to_slide(&mut self, index: usize) {
        if index != self.slide_index && index < self.deck.len() {
            self.slide_index = index;
            self.activate_slide();
        }
    }

    /// Expire a finished animation
    pub fn tick(&mut self) {
        if let Some(started) = self.animation_started {
            if started.elapsed() >= self.config.animation_duration() {
                self.animation_started = None;
            }
        }
    }

    pub fn animation_phase(&self) -> AnimationPhase {
        let Some(started) = self.animation_started else {
            return AnimationPhase::Idle;
        };
        let total = self.config.animation_duration().as_secs_f64();
        let progress = (started.elapsed().as_secs_f64() / total).clamp(0.0, 1.0);
        if progress < SLIDE_SHARE {
            AnimationPhase::Sliding(progress / SLIDE_SHARE)
        } else {
            AnimationPhase::Settling((progress - SLIDE_SHARE) / (1.0 - SLIDE_SHARE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::{CodeSlide, CodeStep, SegmentKind, TextSlide};

    fn demo_deck() -> Deck {
        Deck {
            slides: vec![
                Slide::Code(CodeSlide {
                    title: Some("demo".into()),
                    steps: vec![
                        CodeStep::new("let x = 1"),
                        CodeStep::new("let x = 2"),
                        CodeStep::new("let x = 3"),
                    ],
                    current_step: 0,
                }),
                Slide::Text(TextSlide {
                    content: "The end".into(),
                }),
            ],
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_activation_precomputes_all_transitions() {
        let app = App::new(demo_deck(), Config::default());
        assert!(app.orchestrator.is_ready());
        assert_eq!(app.orchestrator.diffs().unwrap().len(), 2);
    }

    #[test]
    fn test_advance_walks_steps_then_slides() {
        let mut app = App::new(demo_deck(), Config::default());
        assert_eq!((app.slide_index, app.current_step()), (0, 0));

        app.on_key(key(KeyCode::Right));
        assert_eq!((app.slide_index, app.current_step()), (0, 1));
        assert_ne!(app.animation_phase(), AnimationPhase::Idle);

        app.on_key(key(KeyCode::Right));
        assert_eq!((app.slide_index, app.current_step()), (0, 2));

        app.on_key(key(KeyCode::Right));
        assert_eq!(app.slide_index, 1);

        // already on the last slide; stay put
        app.on_key(key(KeyCode::Right));
        assert_eq!(app.slide_index, 1);
    }

    #[test]
    fn test_retreat_is_static() {
        let mut app = App::new(demo_deck(), Config::default());
        app.on_key(key(KeyCode::Right));
        app.on_key(key(KeyCode::Left));
        assert_eq!((app.slide_index, app.current_step()), (0, 0));
        assert_eq!(app.animation_phase(), AnimationPhase::Idle);

        app.on_key(key(KeyCode::Left));
        assert_eq!(app.slide_index, 0, "nothing before the first slide");
    }

    #[test]
    fn test_text_slide_resets_orchestrator() {
        let mut app = App::new(demo_deck(), Config::default());
        app.on_key(key(KeyCode::End));
        assert_eq!(app.slide_index, 1);
        assert!(!app.orchestrator.is_ready());
        assert!(app.orchestrator.diffs().is_none());

        app.on_key(key(KeyCode::Home));
        assert!(app.orchestrator.is_ready());
    }

    #[test]
    fn test_wrap_mode_remeasures_on_resize() {
        let deck = Deck {
            slides: vec![Slide::Code(CodeSlide {
                title: None,
                steps: vec![CodeStep::new("aaaa bb"), CodeStep::new("bb")],
                current_step: 0,
            })],
        };
        let mut config = Config::default();
        config.wrap_code = true;
        let mut app = App::new(deck, config);

        // unwrapped, "bb" only travels horizontally
        let flat = app.orchestrator.diff_for_step(1).unwrap();
        let token = flat
            .segments
            .iter()
            .find(|s| s.kind == SegmentKind::Unchanged)
            .unwrap()
            .clone();
        assert_eq!(token.from.top, 0.0);

        // a 4-cell viewport folds "bb" onto the second row of the before
        // layout, so the token now travels vertically too
        app.on_resize(4);
        let wrapped = app.orchestrator.diff_for_step(1).unwrap();
        let token = wrapped
            .segments
            .iter()
            .find(|s| s.kind == SegmentKind::Unchanged)
            .unwrap();
        assert_eq!(token.from.top, 1.0);
    }

    #[test]
    fn test_resize_without_wrap_keeps_measurements() {
        let mut app = App::new(demo_deck(), Config::default());
        let before = app.orchestrator.diffs().unwrap().to_vec();
        app.on_resize(4);
        assert_eq!(app.orchestrator.diffs().unwrap(), &before[..]);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(demo_deck(), Config::default());
        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = App::new(demo_deck(), Config::default());
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
