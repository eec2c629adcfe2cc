// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! What can go wrong while carving.

use failure::Fail;
use std::fmt;

/// The direction a seam runs.  A vertical seam has one pixel per row
/// and narrows the image; a horizontal seam has one pixel per column
/// and shortens it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The image dimension a seam of this orientation removes from.
    pub(crate) fn dimension_name(self) -> &'static str {
        match self {
            Orientation::Vertical => "width",
            Orientation::Horizontal => "height",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum CarveError {
    /// The caller asked for more seams than the image can give up.
    #[fail(
        display = "cannot remove {} {} seams from an image of {} {}",
        requested, orientation, dimension, available
    )]
    InvalidDimensionRequest {
        orientation: Orientation,
        requested: u32,
        dimension: &'static str,
        available: u32,
    },

    /// Seam carving only ever removes pixels.
    #[fail(
        display = "cannot carve {} {} up to {}",
        dimension, available, requested
    )]
    CannotUpscale {
        orientation: Orientation,
        requested: u32,
        dimension: &'static str,
        available: u32,
    },

    /// A grid lost all of its rows or columns.
    #[fail(display = "degenerate {}x{} grid", width, height)]
    DegenerateGrid { width: u32, height: u32 },

    #[fail(
        display = "pixel ({}, {}) is outside the {}x{} grid",
        x, y, width, height
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// A seam that cannot be removed from the grid it was handed to.
    #[fail(display = "malformed {} seam: {}", orientation, reason)]
    SeamMismatch {
        orientation: Orientation,
        reason: String,
    },
}

impl CarveError {
    /// A request to grow `available` pixels to `requested` along the
    /// dimension seams of `orientation` remove from.
    pub fn cannot_upscale(orientation: Orientation, requested: u32, available: u32) -> Self {
        CarveError::CannotUpscale {
            orientation,
            requested,
            dimension: orientation.dimension_name(),
            available,
        }
    }

    pub(crate) fn invalid_request(orientation: Orientation, requested: u32, available: u32) -> Self {
        CarveError::InvalidDimensionRequest {
            orientation,
            requested,
            dimension: orientation.dimension_name(),
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_axis() {
        let err = CarveError::invalid_request(Orientation::Vertical, 5, 5);
        assert_eq!(
            err.to_string(),
            "cannot remove 5 vertical seams from an image of width 5"
        );
        let err = CarveError::invalid_request(Orientation::Horizontal, 9, 3);
        assert_eq!(
            err.to_string(),
            "cannot remove 9 horizontal seams from an image of height 3"
        );
        let err = CarveError::cannot_upscale(Orientation::Vertical, 12, 10);
        assert_eq!(err.to_string(), "cannot carve width 10 up to 12");
    }
}
