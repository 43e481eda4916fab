//! Position types for board ordering using fractional indexing.
//!
//! A position is a float whose only meaning is relative order: a new item
//! dropped between two neighbors takes the midpoint of their positions, so
//! nothing else in the list needs renumbering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use taskboard_config::{BoardConfig, DEFAULT_SEED_POSITION};

/// Display-order key of a task within its column or of a column within the board
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(f64);

impl Position {
    /// Position of the first item in an empty list
    pub const SEED: Position = Position(DEFAULT_SEED_POSITION);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw float value
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Total ordering, NaN included, so sorting never panics or misbehaves
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// Absolute distance to another position
    pub fn distance(self, other: Position) -> f64 {
        (self.0 - other.0).abs()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::SEED
    }
}

impl From<f64> for Position {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that occupies a slot in a draggable list
pub trait Orderable {
    type Id: ?Sized;

    fn id(&self) -> &Self::Id;

    fn position(&self) -> Position;
}

impl<T: Orderable + ?Sized> Orderable for &T {
    type Id = T::Id;

    fn id(&self) -> &Self::Id {
        (**self).id()
    }

    fn position(&self) -> Position {
        (**self).position()
    }
}

/// A bare `{ id, position }` pair, for callers that only have ordering data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draggable {
    pub id: String,
    pub position: Position,
}

impl Draggable {
    pub fn new(id: impl Into<String>, position: impl Into<Position>) -> Self {
        Self {
            id: id.into(),
            position: position.into(),
        }
    }
}

impl Orderable for Draggable {
    type Id = str;

    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// Computes the position for an item inserted between two neighbors.
///
/// Gaps are never renormalized: repeated inserts at one boundary halve the
/// gap each time until float precision runs out. See [`crate::rebalance`]
/// for the explicit remedy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionAllocator {
    seed: Position,
}

impl PositionAllocator {
    pub fn new(seed: impl Into<Position>) -> Self {
        Self { seed: seed.into() }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.seed_position)
    }

    /// Position given to the first item of an empty list
    pub fn seed(&self) -> Position {
        self.seed
    }

    /// Position between two optional neighbor positions
    pub fn between(&self, before: Option<Position>, after: Option<Position>) -> Position {
        match (before, after) {
            (None, None) => self.seed,
            (None, Some(after)) => Position(after.0 / 2.0),
            (Some(before), None) => Position(before.0 * 2.0),
            (Some(before), Some(after)) => Position((before.0 + after.0) / 2.0),
        }
    }

    /// Position between two optional neighbors
    pub fn allocate<T: Orderable>(&self, before: Option<&T>, after: Option<&T>) -> Position {
        self.between(
            before.map(Orderable::position),
            after.map(Orderable::position),
        )
    }
}

impl Default for PositionAllocator {
    fn default() -> Self {
        Self::new(Position::SEED)
    }
}

/// Allocate with the default seed
pub fn allocate<T: Orderable>(before: Option<&T>, after: Option<&T>) -> Position {
    PositionAllocator::default().allocate(before, after)
}

/// Stable ascending view of `items` by position; the input is left as is
pub fn sorted<T: Orderable>(items: &[T]) -> Vec<&T> {
    let mut view: Vec<&T> = items.iter().collect();
    view.sort_by(|a, b| a.position().total_cmp(&b.position()));
    view
}
