//! Glide core - animated code-diff engine
//!
//! Turns successive snippet "steps" into typed diff segments, probes a
//! layout surface for the positions each token travels between, and
//! precomputes every step transition of a slide before playback starts.

pub mod deck;
pub mod differ;
pub mod layout;
pub mod orchestrator;
pub mod segment;

pub use deck::{CodeSlide, CodeStep, Deck, DeckError, ImageSlide, Slide, TextSlide};
pub use differ::segment_diff;
pub use layout::{measure, Layer, LayerRun, MeasureSurface, MonospaceSurface, NullSurface};
pub use orchestrator::{Orchestrator, Phase, PrecomputedDiff, Ticket};
pub use segment::{AnimSegment, Point, Segment, SegmentKind};
