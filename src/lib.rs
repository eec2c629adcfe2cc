// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image reduction by seam carving.
//!
//! A seam is a connected path of pixels running from one edge of an
//! image to the opposite one, one pixel per row or per column.  The
//! carver repeatedly removes the seam whose summed dual-gradient
//! energy is lowest, so flat regions give way before detailed ones.

pub mod energy;
pub mod error;
pub mod filters;
pub mod flipper;
pub mod pixelgrid;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

pub use energy::{calculate_energy, EnergyComputer, EnergyMap};
pub use error::{CarveError, Orientation};
pub use filters::{energy_to_image, negative};
pub use pixelgrid::PixelGrid;
pub use seamcarver::{reduce_image, seamcarve, SeamCarver};
pub use seamfinder::{CostCell, Seam, SeamFinder, TieBreak};
