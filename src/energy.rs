// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Given a pixel grid, calculate the dual-gradient energy of every
//! pixel.  The energy map is derived data: it is rebuilt from scratch
//! before every seam search and never patched incrementally.

use crate::pixelgrid::PixelGrid;
use crate::twodmap::TwoDimensionalMap;
use image::{Pixel, Rgb};
use itertools::{iproduct, zip};

/// One non-negative energy value per pixel.
pub type EnergyMap = TwoDimensionalMap<f64>;

// Takes the channels (R,G,B) from two pixels and maps the difference
// between each channel, squares it, and then sums them all up:
//
//        |Δx|² = (Δrx)²+(Δgx)²+(Δbx)²
//        |Δy|² = (Δry)²+(Δgy)²+(Δby)²
//       e(x,y) = √(|Δx|²+|Δy|²)
fn energy_of_pair(p1: &Rgb<u8>, p2: &Rgb<u8>) -> f64 {
    zip(p1.channels(), p2.channels())
        .map(|(c1, c2)| {
            let delta = f64::from(*c1) - f64::from(*c2);
            delta * delta
        })
        .sum()
}

// The pair of neighbours whose difference is the gradient at `pos`
// along an axis `len` pixels long.  Border pixels borrow the gradient
// one step inward; axes too short for that compare their two ends, or
// the single pixel with itself.
fn gradient_span(pos: u32, len: u32) -> (u32, u32) {
    if len < 3 {
        return (0, len - 1);
    }
    let centre = pos.max(1).min(len - 2);
    (centre - 1, centre + 1)
}

fn fill_energy(grid: &PixelGrid, emap: &mut EnergyMap) {
    let (width, height) = grid.dimensions();
    emap.reshape(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let (left, right) = gradient_span(x, width);
        let (up, down) = gradient_span(y, height);
        let gx = energy_of_pair(&grid[(right, y)], &grid[(left, y)]);
        let gy = energy_of_pair(&grid[(x, down)], &grid[(x, up)]);
        emap[(x, y)] = (gx + gy).sqrt();
    }
}

/// Compute the energy of every pixel in a grid into a fresh map.
pub fn calculate_energy(grid: &PixelGrid) -> EnergyMap {
    let mut emap = EnergyMap::new(grid.width(), grid.height());
    fill_energy(grid, &mut emap);
    emap
}

/// An energy calculator that owns its output buffer.  The buffer is
/// sized for the largest grid it has seen and reshaped for each call,
/// so a reduction that shrinks one image many times allocates once.
#[derive(Debug)]
pub struct EnergyComputer {
    energy: EnergyMap,
}

impl EnergyComputer {
    pub fn new(width: u32, height: u32) -> Self {
        EnergyComputer {
            energy: EnergyMap::new(width, height),
        }
    }

    /// Recompute the energy map for `grid`.  Nothing from a previous
    /// call survives into the result.
    pub fn compute(&mut self, grid: &PixelGrid) -> &EnergyMap {
        fill_energy(grid, &mut self.energy);
        &self.energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8) -> Rgb<u8> {
        Rgb([v, v, v])
    }

    #[test]
    fn uniform_grid_has_no_energy() {
        let grid = PixelGrid::new(3, 3, gray(128)).unwrap();
        let energy = calculate_energy(&grid);
        assert!(energy.values().iter().all(|e| *e == 0.0));
    }

    #[test]
    fn borders_reuse_the_inner_gradient() {
        // Red ramps along x; green ramps along y.
        let grid = PixelGrid::from_fn(4, 3, |x, y| Rgb([(x * 10) as u8, (y * 20) as u8, 0])).unwrap();
        let energy = calculate_energy(&grid);
        // Every Gx spans two columns (Δr = 20) and every Gy spans two
        // rows (Δg = 40), including on the border.
        let expected = (20.0f64 * 20.0 + 40.0 * 40.0).sqrt();
        for (y, x) in iproduct!(0..3, 0..4) {
            assert!((energy[(x, y)] - expected).abs() < 1e-9, "at ({}, {})", x, y);
        }
    }

    #[test]
    fn energy_of_a_known_neighbourhood() {
        #[rustfmt::skip]
        let values: [u8; 9] = [
            0, 0, 0,
            0, 0, 90,
            0, 30, 0,
        ];
        let grid = PixelGrid::from_fn(3, 3, |x, y| gray(values[(y * 3 + x) as usize])).unwrap();
        let energy = calculate_energy(&grid);
        // Centre: Gx = 3 * 90², Gy = 3 * 30².
        let centre = (3.0f64 * 8100.0 + 3.0 * 900.0).sqrt();
        assert!((energy[(1, 1)] - centre).abs() < 1e-9);
        // (0, 0) borrows the centre column's Gx on row 0 (0 - 0) and
        // the centre row's Gy on column 0 (0 - 0).
        assert_eq!(energy[(0, 0)], 0.0);
        // (2, 2): Gx from row 2 between columns 0 and 2 (0), Gy from
        // column 2 between rows 0 and 2 (0).
        assert_eq!(energy[(2, 2)], 0.0);
        // (2, 1): Gx between (0,1) and (2,1), Gy between (2,0) and (2,2).
        assert!((energy[(2, 1)] - (3.0f64 * 8100.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn flat_stripe_centre_has_no_horizontal_gradient() {
        // The centred difference at a one-pixel stripe compares the two
        // background pixels on either side of it.
        let grid = PixelGrid::from_fn(5, 5, |x, _| if x == 2 { gray(255) } else { gray(0) }).unwrap();
        let energy = calculate_energy(&grid);
        for y in 0..5 {
            assert_eq!(energy[(2, y)], 0.0);
            assert!(energy[(1, y)] > 0.0 && energy[(3, y)] > 0.0);
        }
    }

    #[test]
    fn energy_is_finite_and_non_negative() {
        let grid = PixelGrid::from_fn(7, 5, |x, y| {
            Rgb([(x * 37 % 256) as u8, (y * 91 % 256) as u8, ((x + y) * 255 % 256) as u8])
        })
        .unwrap();
        let energy = calculate_energy(&grid);
        assert!(energy.values().iter().all(|e| e.is_finite() && *e >= 0.0));
    }

    #[test]
    fn recomputing_is_idempotent() {
        let grid = PixelGrid::from_fn(5, 4, |x, y| Rgb([(x * y) as u8, x as u8, y as u8])).unwrap();
        let mut computer = EnergyComputer::new(5, 4);
        let first = computer.compute(&grid).clone();
        let second = computer.compute(&grid).clone();
        assert_eq!(first, second);
        assert_eq!(first, calculate_energy(&grid));
    }

    #[test]
    fn computer_follows_a_shrinking_grid() {
        let big = PixelGrid::from_fn(6, 6, |x, _| gray((x * 40) as u8)).unwrap();
        let small = PixelGrid::new(3, 2, gray(7)).unwrap();
        let mut computer = EnergyComputer::new(6, 6);
        computer.compute(&big);
        let energy = computer.compute(&small);
        assert_eq!(energy.dimensions(), (3, 2));
        assert!(energy.values().iter().all(|e| *e == 0.0));
    }

    #[test]
    fn narrow_grids_compare_their_ends() {
        let grid = PixelGrid::from_fn(2, 1, |x, _| gray(x as u8 * 10)).unwrap();
        let energy = calculate_energy(&grid);
        let expected = (3.0f64 * 100.0).sqrt();
        assert!((energy[(0, 0)] - expected).abs() < 1e-9);
        assert!((energy[(1, 0)] - expected).abs() < 1e-9);

        let single = PixelGrid::new(1, 1, gray(200)).unwrap();
        assert_eq!(calculate_energy(&single)[(0, 0)], 0.0);
    }
}
