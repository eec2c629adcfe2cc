// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The image being carved.
//!
//! A `PixelGrid` is a plain RGB raster, independent of whatever file
//! format it came from.  Removing a seam never edits a grid in place:
//! it produces a new grid one column narrower or one row shorter, so
//! every step of a reduction is "grid in, grid out".

use crate::error::{CarveError, Orientation};
use crate::seamfinder::Seam;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, ImageBuffer, Pixel, Rgb, RgbImage};
use itertools::iproduct;
use std::ops::Index;

#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    pixels: TwoDimensionalMap<Rgb<u8>>,
}

fn check_dimensions(width: u32, height: u32) -> Result<(), CarveError> {
    if width == 0 || height == 0 {
        Err(CarveError::DegenerateGrid { width, height })
    } else {
        Ok(())
    }
}

impl PixelGrid {
    /// A grid with every pixel set to `fill`.
    pub fn new(width: u32, height: u32, fill: Rgb<u8>) -> Result<Self, CarveError> {
        check_dimensions(width, height)?;
        Ok(PixelGrid {
            pixels: TwoDimensionalMap::filled(width, height, fill),
        })
    }

    /// A grid whose pixel at `(x, y)` is `f(x, y)`.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, CarveError>
    where
        F: FnMut(u32, u32) -> Rgb<u8>,
    {
        check_dimensions(width, height)?;
        let data = iproduct!(0..height, 0..width)
            .map(|(y, x)| f(x, y))
            .collect();
        Self::from_map(TwoDimensionalMap::from_vec(width, height, data), width, height)
    }

    /// Copy any 8-bit image into a grid, converting each pixel to RGB.
    pub fn from_image<I, P>(image: &I) -> Result<Self, CarveError>
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = u8> + 'static,
    {
        let (width, height) = image.dimensions();
        Self::from_fn(width, height, |x, y| image.get_pixel(x, y).to_rgb())
    }

    /// Hand the grid back as an `image` buffer.
    pub fn to_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width(), self.height(), |x, y| self.pixels[(x, y)])
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn get(&self, x: u32, y: u32) -> Result<Rgb<u8>, CarveError> {
        self.pixels.get(x, y).ok_or_else(|| self.out_of_bounds(x, y))
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: Rgb<u8>) -> Result<(), CarveError> {
        if !self.pixels.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        self.pixels[(x, y)] = pixel;
        Ok(())
    }

    /// Every pixel in row-major order.
    pub fn pixels(&self) -> &[Rgb<u8>] {
        self.pixels.values()
    }

    /// A grid of the same size with `f` applied to every pixel.
    pub fn map<F>(&self, f: F) -> PixelGrid
    where
        F: FnMut(Rgb<u8>) -> Rgb<u8>,
    {
        let (width, height) = self.dimensions();
        PixelGrid {
            pixels: TwoDimensionalMap {
                width,
                height,
                data: self.pixels.values().iter().cloned().map(f).collect(),
            },
        }
    }

    /// Build the grid that results from cutting `seam` out of this one.
    pub fn remove_seam(&self, seam: &Seam) -> Result<PixelGrid, CarveError> {
        seam.check_fits(self.width(), self.height())?;
        match seam.orientation() {
            Orientation::Vertical => self.remove_vertical_seam(seam.path()),
            Orientation::Horizontal => self.remove_horizontal_seam(seam.path()),
        }
    }

    // Pixels to the right of the seam slide one column left.
    fn remove_vertical_seam(&self, seam: &[u32]) -> Result<PixelGrid, CarveError> {
        let (width, height) = (self.width() - 1, self.height());
        check_dimensions(width, height)?;
        let data = iproduct!(0..height, 0..width)
            .map(|(y, x)| {
                let source_x = if x < seam[y as usize] { x } else { x + 1 };
                self.pixels[(source_x, y)]
            })
            .collect();
        Self::from_map(TwoDimensionalMap::from_vec(width, height, data), width, height)
    }

    // Pixels below the seam slide one row up.
    fn remove_horizontal_seam(&self, seam: &[u32]) -> Result<PixelGrid, CarveError> {
        let (width, height) = (self.width(), self.height() - 1);
        check_dimensions(width, height)?;
        let data = iproduct!(0..height, 0..width)
            .map(|(y, x)| {
                let source_y = if y < seam[x as usize] { y } else { y + 1 };
                self.pixels[(x, source_y)]
            })
            .collect();
        Self::from_map(TwoDimensionalMap::from_vec(width, height, data), width, height)
    }

    fn from_map(
        pixels: Option<TwoDimensionalMap<Rgb<u8>>>,
        width: u32,
        height: u32,
    ) -> Result<PixelGrid, CarveError> {
        pixels
            .map(|pixels| PixelGrid { pixels })
            .ok_or(CarveError::DegenerateGrid { width, height })
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> CarveError {
        CarveError::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        }
    }
}

impl Index<(u32, u32)> for PixelGrid {
    type Output = Rgb<u8>;

    /// Unchecked-by-`Result` addressing; panics outside the grid.
    fn index(&self, (x, y): (u32, u32)) -> &Rgb<u8> {
        &self.pixels[(x, y)]
    }
}
