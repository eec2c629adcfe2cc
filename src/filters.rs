// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Whole-image transforms that sit beside the carver: a photographic
//! negative, and a grayscale picture of the energy map.

use crate::energy::EnergyMap;
use crate::pixelgrid::PixelGrid;
use image::{GrayImage, ImageBuffer, Luma, Pixel};
use num_traits::NumCast;

/// Invert every channel: (r, g, b) becomes (255 - r, 255 - g, 255 - b).
pub fn negative(grid: &PixelGrid) -> PixelGrid {
    grid.map(|pixel| pixel.map(|c| 255 - c))
}

/// Render an energy map as a grayscale image, scaled so that the most
/// energetic pixel is white.  A map with no energy at all is black.
pub fn energy_to_image(energy: &EnergyMap) -> GrayImage {
    let factor = energy.values().iter().cloned().fold(0.0, f64::max);
    ImageBuffer::from_fn(energy.width(), energy.height(), |x, y| {
        let scaled = if factor > 0.0 {
            (255.0 * energy[(x, y)] / factor).floor()
        } else {
            0.0
        };
        let c: u8 = NumCast::from(scaled).unwrap_or(std::u8::MAX);
        Luma([c])
    })
}
