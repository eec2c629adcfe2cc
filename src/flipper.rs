// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Lattice dimensional flipper
//!
//! A utility proxy that maps the width of a lattice to its height, and
//! vice versa, as well as every x to y and vice versa.
//!
//! The seam search only knows how to walk a lattice top to bottom.  By
//! virtually "flipping" the energy map 90°, a left-to-right seam
//! becomes a top-to-bottom one, and the same search routine (and the
//! same cost table) serves both orientations.

use crate::twodmap::TwoDimensionalMap;

/// A read-only, addressable two-dimensional field of values.
pub trait Lattice {
    type Item;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// The value at `(x, y)`.  Callers stay inside
    /// `[0, width) × [0, height)`.
    fn value(&self, x: u32, y: u32) -> Self::Item;
}

impl<P: Copy> Lattice for TwoDimensionalMap<P> {
    type Item = P;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn value(&self, x: u32, y: u32) -> P {
        self[(x, y)]
    }
}

/// A transposed view of another lattice.
pub struct Flipper<'a, L> {
    pub lattice: &'a L,
}

impl<'a, L> Flipper<'a, L> {
    pub fn new(lattice: &'a L) -> Self {
        Flipper { lattice }
    }
}

impl<'a, L: Lattice> Lattice for Flipper<'a, L> {
    type Item = L::Item;

    fn width(&self) -> u32 {
        self.lattice.height()
    }

    fn height(&self) -> u32 {
        self.lattice.width()
    }

    fn value(&self, x: u32, y: u32) -> L::Item {
        self.lattice.value(y, x)
    }
}
