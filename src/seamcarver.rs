// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main routine
//!
//! The carver holds one image across a whole reduction.  It removes
//! all of the vertical seams first, then all of the horizontal ones,
//! recomputing the energy map and the cost table before every seam.

use crate::energy::EnergyComputer;
use crate::error::{CarveError, Orientation};
use crate::pixelgrid::PixelGrid;
use crate::seamfinder::{Seam, SeamFinder, TieBreak};
use image::{GenericImageView, Pixel, RgbImage};
use log::{debug, info};

// One iteration: fresh energy, fresh search, and the grid without the
// seam.  The input grid is left alone.
fn carve_once(
    energy: &mut EnergyComputer,
    finder: &mut SeamFinder,
    grid: &PixelGrid,
    orientation: Orientation,
) -> Result<(PixelGrid, Seam), CarveError> {
    let seam = finder.find(energy.compute(grid), orientation)?;
    let carved = grid.remove_seam(&seam)?;
    Ok((carved, seam))
}

/// A struct for holding the image to be carved, along with the
/// scratch buffers reused by every iteration.
#[derive(Debug)]
pub struct SeamCarver {
    grid: PixelGrid,
    energy: EnergyComputer,
    finder: SeamFinder,
}

impl SeamCarver {
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(grid: PixelGrid) -> Self {
        let (width, height) = grid.dimensions();
        SeamCarver {
            grid,
            energy: EnergyComputer::new(width, height),
            finder: SeamFinder::new(width, height),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.finder = self.finder.with_tie_break(tie_break);
        self
    }

    pub fn tie_break(&self) -> TieBreak {
        self.finder.tie_break()
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.grid.dimensions()
    }

    /// The seam the next removal of this orientation would take,
    /// without removing it.
    pub fn find_seam(&mut self, orientation: Orientation) -> Result<Seam, CarveError> {
        self.finder
            .find(self.energy.compute(&self.grid), orientation)
    }

    /// Remove a single seam, returning it.
    pub fn carve_once(&mut self, orientation: Orientation) -> Result<Seam, CarveError> {
        let (carved, seam) = carve_once(&mut self.energy, &mut self.finder, &self.grid, orientation)?;
        self.grid = carved;
        Ok(seam)
    }

    /// Remove `vertical` seams and then `horizontal` seams.  Both
    /// counts are checked before anything is carved: each must be
    /// smaller than the dimension it shrinks.
    pub fn reduce(&mut self, vertical: u32, horizontal: u32) -> Result<(), CarveError> {
        let (width, height) = self.grid.dimensions();
        if vertical >= width {
            return Err(CarveError::invalid_request(Orientation::Vertical, vertical, width));
        }
        if horizontal >= height {
            return Err(CarveError::invalid_request(
                Orientation::Horizontal,
                horizontal,
                height,
            ));
        }
        self.run_phase(Orientation::Vertical, vertical)?;
        self.run_phase(Orientation::Horizontal, horizontal)
    }

    /// Carve down to `new_width` x `new_height`.  Seam carving only
    /// ever removes pixels, so neither target may exceed the current
    /// size, and neither may be zero.
    pub fn carve_to(&mut self, new_width: u32, new_height: u32) -> Result<(), CarveError> {
        let (width, height) = self.grid.dimensions();
        if new_width > width {
            return Err(CarveError::cannot_upscale(Orientation::Vertical, new_width, width));
        }
        if new_height > height {
            return Err(CarveError::cannot_upscale(
                Orientation::Horizontal,
                new_height,
                height,
            ));
        }
        self.reduce(width - new_width, height - new_height)
    }

    // A phase either completes or leaves the grid as it found it: the
    // intermediate grids only replace the carver's grid at the end.
    fn run_phase(&mut self, orientation: Orientation, count: u32) -> Result<(), CarveError> {
        if count == 0 {
            return Ok(());
        }
        let SeamCarver {
            grid,
            energy,
            finder,
        } = self;
        info!(
            "removing {} {} seams from a {}x{} image",
            count,
            orientation,
            grid.width(),
            grid.height()
        );

        let mut carved: Option<PixelGrid> = None;
        for n in 1..=count {
            let current = carved.as_ref().unwrap_or(&*grid);
            let (next, seam) = carve_once(energy, finder, current, orientation)?;
            debug!(
                "{} seam {}/{} cost {:.3}, now {}x{}",
                orientation,
                n,
                count,
                seam.cost(),
                next.width(),
                next.height()
            );
            carved = Some(next);
        }
        if let Some(carved) = carved {
            *grid = carved;
        }
        Ok(())
    }
}

/// Grid in, grid out: the reduction of `grid` by `vertical` columns
/// and `horizontal` rows.  `grid` itself is not touched.
pub fn reduce_image(grid: &PixelGrid, vertical: u32, horizontal: u32) -> Result<PixelGrid, CarveError> {
    let mut carver = SeamCarver::new(grid.clone());
    carver.reduce(vertical, horizontal)?;
    Ok(carver.into_grid())
}

/// A convenience wrapper for `image` users: carve any 8-bit image and
/// get an RGB buffer back.
pub fn seamcarve<I, P>(image: &I, vertical: u32, horizontal: u32) -> Result<RgbImage, CarveError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    let grid = PixelGrid::from_image(image)?;
    Ok(reduce_image(&grid, vertical, horizontal)?.to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const GRAY: Rgb<u8> = Rgb([128, 128, 128]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    // A one-pixel stripe of black and white bars on gray.  The bars
    // change every two rows, so the stripe's own column carries a
    // strong vertical gradient as well as lighting up its neighbours.
    fn stripe_colour(y: u32) -> Rgb<u8> {
        if (y / 2) % 2 == 0 {
            BLACK
        } else {
            WHITE
        }
    }

    fn striped(width: u32, height: u32, stripe: u32) -> PixelGrid {
        PixelGrid::from_fn(width, height, |x, y| {
            if x == stripe {
                stripe_colour(y)
            } else {
                GRAY
            }
        })
        .unwrap()
    }

    fn noisy(width: u32, height: u32) -> PixelGrid {
        PixelGrid::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 73 + y * 31) % 256) as u8,
                ((x * x + y * 17) % 256) as u8,
                ((x * y * 13) % 256) as u8,
            ])
        })
        .unwrap()
    }

    #[test]
    fn uniform_gray_loses_a_column() {
        let mut carver = SeamCarver::new(PixelGrid::new(3, 3, GRAY).unwrap());
        let seam = carver.find_seam(Orientation::Vertical).unwrap();
        assert_eq!(seam.cost(), 0.0);
        carver.reduce(1, 0).unwrap();
        let grid = carver.into_grid();
        assert_eq!(grid.dimensions(), (2, 3));
        assert!(grid.pixels().iter().all(|p| *p == GRAY));
    }

    #[test]
    fn seam_avoids_the_stripe() {
        let mut carver = SeamCarver::new(striped(5, 5, 2));
        let seam = carver.find_seam(Orientation::Vertical).unwrap();
        assert_eq!(seam.len(), 5);
        assert!(seam.path().iter().all(|&x| x != 2), "{:?}", seam.path());
    }

    #[test]
    fn stripe_survives_a_reduction() {
        let grid = reduce_image(&striped(5, 5, 2), 3, 0).unwrap();
        assert_eq!(grid.dimensions(), (2, 5));
        for y in 0..5 {
            assert!((0..2).any(|x| grid[(x, y)] == stripe_colour(y)), "row {}", y);
        }
    }

    #[test]
    fn dimension_law() {
        for &(width, height, vertical, horizontal) in
            &[(6, 5, 0, 0), (6, 5, 5, 0), (6, 5, 0, 4), (6, 5, 3, 2), (9, 4, 8, 3)]
        {
            let grid = reduce_image(&noisy(width, height), vertical, horizontal).unwrap();
            assert_eq!(grid.dimensions(), (width - vertical, height - horizontal));
        }
    }

    #[test]
    fn too_many_seams_is_refused_without_carving() {
        let original = noisy(4, 3);
        let mut carver = SeamCarver::new(original.clone());
        assert_eq!(
            carver.reduce(4, 0),
            Err(CarveError::InvalidDimensionRequest {
                orientation: Orientation::Vertical,
                requested: 4,
                dimension: "width",
                available: 4,
            })
        );
        assert!(carver.reduce(7, 0).is_err());
        // The horizontal count is checked before the vertical phase runs.
        assert!(carver.reduce(1, 3).is_err());
        assert_eq!(carver.grid(), &original);
    }

    #[test]
    fn carving_one_seam_matches_the_phase() {
        let grid = noisy(7, 6);
        let mut stepwise = SeamCarver::new(grid.clone());
        stepwise.carve_once(Orientation::Vertical).unwrap();
        stepwise.carve_once(Orientation::Vertical).unwrap();
        stepwise.carve_once(Orientation::Horizontal).unwrap();
        assert_eq!(stepwise.into_grid(), reduce_image(&grid, 2, 1).unwrap());
    }

    #[test]
    fn removed_seams_are_valid() {
        let mut carver = SeamCarver::new(noisy(8, 6));
        for orientation in &[Orientation::Vertical, Orientation::Horizontal] {
            let (width, height) = carver.dimensions();
            let seam = carver.carve_once(*orientation).unwrap();
            assert!(!seam.is_empty());
            assert!(seam.is_connected());
            let expected = match orientation {
                Orientation::Vertical => height,
                Orientation::Horizontal => width,
            };
            assert_eq!(seam.len(), expected as usize);
        }
        assert_eq!(carver.dimensions(), (7, 5));
    }

    #[test]
    fn carve_to_translates_dimensions() {
        let mut carver = SeamCarver::new(noisy(8, 6));
        carver.carve_to(5, 4).unwrap();
        assert_eq!(carver.dimensions(), (5, 4));
        match carver.carve_to(6, 4) {
            Err(CarveError::CannotUpscale { requested: 6, .. }) => {}
            other => panic!("expected an upscale refusal, got {:?}", other),
        }
        assert!(carver.carve_to(0, 4).is_err());
        assert_eq!(carver.dimensions(), (5, 4));
    }

    #[test]
    fn tie_break_only_changes_which_seam() {
        let grid = PixelGrid::new(5, 5, GRAY).unwrap();
        let mut lower = SeamCarver::new(grid.clone());
        let mut reference = SeamCarver::new(grid).with_tie_break(TieBreak::Reference);
        assert_eq!(lower.tie_break(), TieBreak::LowerIndex);
        assert_eq!(reference.tie_break(), TieBreak::Reference);
        let a = lower.find_seam(Orientation::Horizontal).unwrap();
        let b = reference.find_seam(Orientation::Horizontal).unwrap();
        assert_eq!(a.cost(), b.cost());
        assert_eq!(a.path(), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn image_wrapper_carves_buffers() {
        let image = noisy(6, 4).to_image();
        let carved = seamcarve(&image, 2, 1).unwrap();
        assert_eq!(carved.dimensions(), (4, 3));
    }
}
