// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hold data structures.
//!
//! This module defines the core data structures for representing
//! points, holds (polygon outlines on the board image) and the
//! climbing roles a hold can take within a problem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D point with normalized coordinates (0.0 to 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Clamp both coordinates into the normalized range.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }

    fn in_bounds(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// Identity of a persisted hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldId(pub u32);

impl fmt::Display for HoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A persisted hold on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hold {
    pub id: HoldId,
    pub vertices: Vec<Point>,
}

/// A hold as handed back by the editor: existing holds keep their id,
/// newly drawn ones have none until the board assigns it.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldDraft {
    pub id: Option<HoldId>,
    pub vertices: Vec<Point>,
}

impl HoldDraft {
    /// Check the outline is usable as a hold.
    ///
    /// Coordinates may drift slightly outside the image when a shape is
    /// dragged against an edge, so callers clamp before validating.
    pub fn validate(&self) -> Result<(), HoldValidationError> {
        if self.vertices.len() < 3 {
            return Err(HoldValidationError::TooFewVertices {
                count: self.vertices.len(),
            });
        }
        if let Some(index) = self.vertices.iter().position(|p| !p.in_bounds()) {
            return Err(HoldValidationError::OutOfBounds { index });
        }
        Ok(())
    }
}

/// Reasons a hold outline is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HoldValidationError {
    #[error("hold must have at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("vertex {index} lies outside the image")]
    OutOfBounds { index: usize },
}

/// Role of a hold within a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldRole {
    Start,
    Hand,
    Foot,
    Finish,
}

impl HoldRole {
    pub fn label(self) -> &'static str {
        match self {
            HoldRole::Start => "start",
            HoldRole::Hand => "hand",
            HoldRole::Foot => "foot",
            HoldRole::Finish => "finish",
        }
    }
}
