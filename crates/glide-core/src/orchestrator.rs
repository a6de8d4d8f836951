//! Per-slide diff precomputation and lifecycle
//!
//! When a code slide becomes active, every step transition is diffed and
//! measured up front so playback never waits on layout work mid-animation.
//! The batch runs synchronously but is triggered from an asynchronous
//! boundary that may be superseded; a generation ticket makes sure a stale
//! run can never commit over a newer one.

use crate::deck::CodeStep;
use crate::differ::segment_diff;
use crate::layout::{measure, MeasureSurface};
use crate::segment::AnimSegment;

/// A fully prepared step transition, ready for playback.
///
/// Immutable once stored; the presentation layer only reads.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecomputedDiff {
    pub before_text: String,
    pub after_text: String,
    pub segments: Vec<AnimSegment>,
}

/// Orchestrator phase for the active code slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Computing,
    Ready,
}

/// Claim on one computation run.
///
/// Holds a snapshot of the step texts, so the computation is unaffected by
/// later edits; committing with a superseded ticket is a silent no-op.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    steps: Vec<String>,
}

impl Ticket {
    /// Run the batch: one [`PrecomputedDiff`] per transition
    /// `steps[i-1] -> steps[i]`, stored at index `i-1`. Step 0 has no
    /// predecessor and produces nothing.
    pub fn compute(&self, surface: &dyn MeasureSurface) -> Vec<PrecomputedDiff> {
        self.steps
            .windows(2)
            .map(|pair| {
                let segments = segment_diff(&pair[0], &pair[1]);
                PrecomputedDiff {
                    before_text: pair[0].clone(),
                    after_text: pair[1].clone(),
                    segments: measure(segments, surface),
                }
            })
            .collect()
    }
}

/// Owns the precomputed diffs for the currently displayed code slide
#[derive(Debug, Default)]
pub struct Orchestrator {
    phase: Phase,
    generation: u64,
    diffs: Vec<PrecomputedDiff>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The "please wait" flag for the presentation layer
    pub fn is_computing(&self) -> bool {
        self.phase == Phase::Computing
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Enter `Computing` for a new set of step texts, invalidating any
    /// in-flight run.
    pub fn begin(&mut self, steps: &[CodeStep]) -> Ticket {
        self.generation += 1;
        self.phase = Phase::Computing;
        self.diffs.clear();
        Ticket {
            generation: self.generation,
            steps: steps.iter().map(|s| s.value.clone()).collect(),
        }
    }

    /// Commit a finished run. Returns `false` and discards the result when
    /// the ticket was superseded by a newer `begin` or by `reset`.
    pub fn commit(&mut self, ticket: &Ticket, diffs: Vec<PrecomputedDiff>) -> bool {
        if ticket.generation != self.generation || self.phase != Phase::Computing {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded diff computation"
            );
            return false;
        }
        self.diffs = diffs;
        self.phase = Phase::Ready;
        true
    }

    /// `begin` + `compute` + `commit` in one synchronous pass
    pub fn recompute(&mut self, steps: &[CodeStep], surface: &dyn MeasureSurface) {
        let ticket = self.begin(steps);
        let diffs = ticket.compute(surface);
        self.commit(&ticket, diffs);
    }

    /// Back to `Idle`: the slide changed away, drop everything
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = Phase::Idle;
        self.diffs.clear();
    }

    /// The prepared transition into `step_index`, readable only once the
    /// whole batch is ready. Step 0 has no transition (static render).
    pub fn diff_for_step(&self, step_index: usize) -> Option<&PrecomputedDiff> {
        if self.phase != Phase::Ready || step_index == 0 {
            return None;
        }
        self.diffs.get(step_index - 1)
    }

    /// All prepared transitions, in step order, once ready
    pub fn diffs(&self) -> Option<&[PrecomputedDiff]> {
        (self.phase == Phase::Ready).then(|| self.diffs.as_slice())
    }
}
