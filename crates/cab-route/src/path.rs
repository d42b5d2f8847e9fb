//! Route representation and idle padding.
//!
//! # Step directions
//!
//! Every step after the first carries the direction of travel into it.  The
//! first step carries the initial heading, the direction of the first move.
//! A one-step path (start equals end) has no direction at all.  Idle steps
//! copy the step they pad, direction included.

use cab_core::{Direction, SimConfig, TilePos};

// ── PathStep ──────────────────────────────────────────────────────────────────

/// One position along a route.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub pos:       TilePos,
    pub direction: Option<Direction>,
}

impl PathStep {
    #[inline]
    pub fn new(pos: TilePos, direction: Option<Direction>) -> Self {
        Self { pos, direction }
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered step sequence.  Empty means "no route".
///
/// A path is built once by a router and then only read; replacing a car's
/// route means replacing its `Path`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    #[inline]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&PathStep> {
        self.steps.get(index)
    }

    #[inline]
    pub fn first(&self) -> Option<&PathStep> {
        self.steps.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    /// Heading a vehicle starts with: the first step's direction.
    pub fn initial_direction(&self) -> Option<Direction> {
        self.first().and_then(|s| s.direction)
    }

    /// Number of moves between distinct tiles, ignoring idle steps.
    pub fn moves(&self) -> usize {
        self.steps.windows(2).filter(|w| w[0].pos != w[1].pos).count()
    }

    /// Repeat the first step `from_idle` times in front and the last step
    /// `to_idle` times at the back.  An empty path stays empty.
    ///
    /// Before tail padding, a last step without a direction takes the
    /// direction of the step before it, so the idle car keeps its heading.
    pub fn with_idle_padding(mut self, from_idle: usize, to_idle: usize) -> Self {
        let Some(&first) = self.steps.first() else {
            return self;
        };
        if from_idle > 0 {
            self.steps.splice(0..0, std::iter::repeat_n(first, from_idle));
        }
        if to_idle > 0 {
            let n = self.steps.len();
            if self.steps[n - 1].direction.is_none() && n >= 2 {
                self.steps[n - 1].direction = self.steps[n - 2].direction;
            }
            let last = self.steps[n - 1];
            self.steps.extend(std::iter::repeat_n(last, to_idle));
        }
        self
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

// ── PathOptions ───────────────────────────────────────────────────────────────

/// Idle padding requested for a route.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PathOptions {
    /// Stationary repeats of the first step.
    pub from_idle_steps: usize,
    /// Stationary repeats of the last step.
    pub to_idle_steps: usize,
}

impl PathOptions {
    pub fn new(from_idle_steps: usize, to_idle_steps: usize) -> Self {
        Self { from_idle_steps, to_idle_steps }
    }
}

impl From<&SimConfig> for PathOptions {
    fn from(config: &SimConfig) -> Self {
        Self::new(config.from_idle_steps, config.to_idle_steps)
    }
}
