//! Block geometry.
//!
//! Positions are unconstrained (a block may sit off-canvas while dragged);
//! sizes must be strictly positive. Both must be finite so that stored
//! values compare equal after a round-trip.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Top-left corner of a block, in canvas units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Width and height of a block, in canvas units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reject NaN and infinities; any finite coordinate is accepted.
    pub fn validate(&self) -> Result<(), SharedError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(SharedError::validation(
                "position",
                format!("coordinates must be finite, got ({}, {})", self.x, self.y),
            ));
        }
        Ok(())
    }
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions must be finite and strictly greater than zero.
    pub fn validate(&self) -> Result<(), SharedError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(SharedError::validation(
                "size.width",
                format!("width must be a positive number, got {}", self.width),
            ));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(SharedError::validation(
                "size.height",
                format!("height must be a positive number, got {}", self.height),
            ));
        }
        Ok(())
    }
}
