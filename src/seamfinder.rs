// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through an energy map
//!
//! The search is the classic shortest-path dynamic program: every
//! cell of the cost table holds the cheapest cumulative energy of any
//! seam reaching it from the first row, together with the address of
//! the cell it came from.  Walking those back pointers from the
//! cheapest cell of the last row recovers the seam.
//!
//! The search only runs top to bottom.  Horizontal seams are found by
//! running it over a `Flipper` of the energy map.

use crate::energy::EnergyMap;
use crate::error::{CarveError, Orientation};
use crate::flipper::{Flipper, Lattice};
use crate::twodmap::TwoDimensionalMap;
use std::cmp::Ordering;
use std::str::FromStr;

/// How to choose between equally cheap parents.
///
/// Every rule here yields a minimal seam; they differ only in which
/// one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TieBreak {
    /// Prefer the lower index on every tie, for both orientations.
    LowerIndex,
    /// Reproduce the historical output: vertical seams prefer the lower
    /// index, while interior cells of horizontal seams only take the
    /// upper neighbour when it is strictly cheaper than both others.
    Reference,
}

impl Default for TieBreak {
    fn default() -> Self {
        TieBreak::LowerIndex
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lower-index" => Ok(TieBreak::LowerIndex),
            "reference" => Ok(TieBreak::Reference),
            _ => Err(format!("unknown tie-break rule '{}'", s)),
        }
    }
}

/// A cell of the cost table: the cheapest cumulative energy reaching
/// this cell, and the `(x, y)` of the cell it was reached from.  The
/// two halves of the back pointer live in one field and are only ever
/// read together.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct CostCell {
    pub cost: f64,
    pub parent: (u32, u32),
}

/// A seam: one index per step along its length.  For a vertical seam
/// `path[y]` is the column removed from row `y`; for a horizontal seam
/// `path[x]` is the row removed from column `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Seam {
    orientation: Orientation,
    path: Vec<u32>,
    cost: f64,
}

impl Seam {
    pub fn new(orientation: Orientation, path: Vec<u32>, cost: f64) -> Self {
        Seam {
            orientation,
            path,
            cost,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn path(&self) -> &[u32] {
        &self.path
    }

    /// Cumulative energy of every pixel on the seam.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The `(x, y)` of every pixel on the seam, in path order.
    pub fn coordinates<'a>(&'a self) -> impl Iterator<Item = (u32, u32)> + 'a {
        let orientation = self.orientation;
        self.path
            .iter()
            .enumerate()
            .map(move |(step, &pos)| match orientation {
                Orientation::Vertical => (pos, step as u32),
                Orientation::Horizontal => (step as u32, pos),
            })
    }

    /// True if no two consecutive steps are more than one pixel apart.
    pub fn is_connected(&self) -> bool {
        self.path
            .windows(2)
            .all(|w| (i64::from(w[0]) - i64::from(w[1])).abs() <= 1)
    }

    /// Confirm the seam can be cut out of a `width` x `height` grid.
    pub(crate) fn check_fits(&self, width: u32, height: u32) -> Result<(), CarveError> {
        let (length, breadth) = match self.orientation {
            Orientation::Vertical => (height, width),
            Orientation::Horizontal => (width, height),
        };
        let mismatch = |reason: String| {
            Err(CarveError::SeamMismatch {
                orientation: self.orientation,
                reason,
            })
        };
        if self.path.len() != length as usize {
            return mismatch(format!(
                "{} steps for a grid {} long",
                self.path.len(),
                length
            ));
        }
        if let Some(pos) = self.path.iter().find(|&&pos| pos >= breadth) {
            return mismatch(format!("index {} for a grid {} across", pos, breadth));
        }
        if !self.is_connected() {
            return mismatch("consecutive steps more than one pixel apart".to_string());
        }
        Ok(())
    }
}

// Pick the parent of `pos` from the previous row of the cost table.
// At the edges only two candidates exist and ties go to the lower
// index.  In the interior the default takes left when it is no worse
// than both others, then straight, then right.  The strict variant
// only takes left when it strictly beats both, and straight when it is
// no worse than left and strictly beats right.
fn choose_parent(above: &[CostCell], pos: u32, strict: bool) -> u32 {
    let last = above.len() as u32 - 1;
    let cost = |i: u32| above[i as usize].cost;
    if last == 0 {
        return 0;
    }
    if pos == 0 {
        return if cost(0) <= cost(1) { 0 } else { 1 };
    }
    if pos == last {
        return if cost(last - 1) <= cost(last) { last - 1 } else { last };
    }

    let (left, straight, right) = (cost(pos - 1), cost(pos), cost(pos + 1));
    if strict {
        if left < straight && left < right {
            pos - 1
        } else if straight <= left && straight < right {
            pos
        } else {
            pos + 1
        }
    } else if left <= straight && left <= right {
        pos - 1
    } else if straight < left && straight <= right {
        pos
    } else {
        pos + 1
    }
}

/// The seam search engine.  Owns the cost table so that repeated
/// searches over a shrinking image reuse one allocation.
#[derive(Debug)]
pub struct SeamFinder {
    costs: TwoDimensionalMap<CostCell>,
    tie_break: TieBreak,
}

impl SeamFinder {
    /// A finder whose cost table is preallocated for a `width` x
    /// `height` energy map.
    pub fn new(width: u32, height: u32) -> Self {
        SeamFinder {
            costs: TwoDimensionalMap::new(width, height),
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// The cost table of the most recent search, in the coordinates of
    /// the lattice that was searched: for a horizontal search that is
    /// the flipped energy map.
    pub fn cost_table(&self) -> &TwoDimensionalMap<CostCell> {
        &self.costs
    }

    /// Find the cheapest seam of the given orientation.
    pub fn find(&mut self, energy: &EnergyMap, orientation: Orientation) -> Result<Seam, CarveError> {
        let (width, height) = energy.dimensions();
        if width == 0 || height == 0 {
            return Err(CarveError::DegenerateGrid { width, height });
        }
        let (path, cost) = match orientation {
            Orientation::Vertical => self.search(energy, false),
            Orientation::Horizontal => {
                let strict = self.tie_break == TieBreak::Reference;
                self.search(&Flipper::new(energy), strict)
            }
        };
        Ok(Seam::new(orientation, path, cost))
    }

    /// Request a vertical seam.
    pub fn find_vertical_seam(&mut self, energy: &EnergyMap) -> Result<Seam, CarveError> {
        self.find(energy, Orientation::Vertical)
    }

    /// Request a horizontal seam.
    pub fn find_horizontal_seam(&mut self, energy: &EnergyMap) -> Result<Seam, CarveError> {
        self.find(energy, Orientation::Horizontal)
    }

    // Top-to-bottom search over any lattice with at least one cell.
    fn search<L: Lattice<Item = f64>>(&mut self, energy: &L, strict: bool) -> (Vec<u32>, f64) {
        let (width, height) = (energy.width(), energy.height());
        self.costs.reshape(width, height);

        // The first row is just its own energy, and its own parent.
        for x in 0..width {
            self.costs[(x, 0)] = CostCell {
                cost: energy.value(x, 0),
                parent: (x, 0),
            };
        }

        // For every subsequent row, populate the cell with the sum of
        // its energy and the cheapest permitted cell above it.
        for y in 1..height {
            for x in 0..width {
                let parent_x = choose_parent(self.costs.row(y - 1), x, strict);
                let parent = (parent_x, y - 1);
                self.costs[(x, y)] = CostCell {
                    cost: energy.value(x, y) + self.costs[parent].cost,
                    parent,
                };
            }
        }

        // The cheapest cell of the last row; the first one wins a tie.
        let bottom = height - 1;
        let costs = &self.costs;
        let start = (0..width)
            .min_by(|&a, &b| {
                costs[(a, bottom)]
                    .cost
                    .partial_cmp(&costs[(b, bottom)].cost)
                    .unwrap_or(Ordering::Equal)
            })
            .unwrap_or(0);
        let total = costs[(start, bottom)].cost;

        // Walk the back pointers to the first row.  Each step records
        // where it is, then moves to the whole (x, y) stored there.
        let mut path = vec![0; height as usize];
        let mut here = (start, bottom);
        loop {
            path[here.1 as usize] = here.0;
            if here.1 == 0 {
                break;
            }
            here = costs[here].parent;
        }
        (path, total)
    }
}
