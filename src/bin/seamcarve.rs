// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{crate_version, value_t, App, Arg, ArgMatches};
use failure::{format_err, Error, ResultExt};
use log::info;
use seamcarve::{
    calculate_energy, energy_to_image, negative, CarveError, Orientation, PixelGrid, SeamCarver,
    TieBreak,
};
use std::process;

// Options that only mean something when carving.
const CARVING_ARGS: [&str; 5] = ["columns", "rows", "width", "height", "tie-break"];

fn cli<'a, 'b>() -> App<'a, 'b> {
    App::new("seamcarve")
        .version(crate_version!())
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image reduction by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("columns")
                .help("Number of vertical seams (columns) to remove")
                .short("c")
                .long("columns")
                .takes_value(true)
                .conflicts_with("width"),
        )
        .arg(
            Arg::with_name("rows")
                .help("Number of horizontal seams (rows) to remove")
                .short("r")
                .long("rows")
                .takes_value(true)
                .conflicts_with("height"),
        )
        .arg(
            Arg::with_name("width")
                .help("Target width in pixels")
                .long("width")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .help("Target height in pixels")
                .long("height")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("tie-break")
                .help("Which of several equally cheap seams to take")
                .long("tie-break")
                .takes_value(true)
                .possible_values(&["lower-index", "reference"]),
        )
        .arg(
            Arg::with_name("negative")
                .help("Write the photographic negative instead of carving")
                .long("negative")
                .conflicts_with("energy")
                .conflicts_with_all(&CARVING_ARGS),
        )
        .arg(
            Arg::with_name("energy")
                .help("Write the energy map as a grayscale image instead of carving")
                .long("energy")
                .conflicts_with_all(&CARVING_ARGS),
        )
}

// Seam count for one axis, given either directly or as a target size.
fn seams(
    matches: &ArgMatches,
    orientation: Orientation,
    count: &str,
    target: &str,
    current: u32,
) -> Result<u32, Error> {
    if matches.is_present(count) {
        return Ok(value_t!(matches, count, u32)?);
    }
    if matches.is_present(target) {
        let wanted = value_t!(matches, target, u32)?;
        let seams = current
            .checked_sub(wanted)
            .ok_or_else(|| CarveError::cannot_upscale(orientation, wanted, current))?;
        return Ok(seams);
    }
    Ok(0)
}

fn run() -> Result<(), Error> {
    let matches = cli().get_matches();
    let input = matches
        .value_of("input")
        .ok_or_else(|| format_err!("no input image"))?;
    let output = matches
        .value_of("output")
        .ok_or_else(|| format_err!("no output path"))?;

    let image = image::open(input).with_context(|_| format!("could not read {}", input))?;
    let grid = PixelGrid::from_image(&image)?;
    let (width, height) = grid.dimensions();
    info!("read {}x{} image from {}", width, height, input);

    if matches.is_present("negative") {
        negative(&grid)
            .to_image()
            .save(output)
            .with_context(|_| format!("could not write {}", output))?;
        return Ok(());
    }

    if matches.is_present("energy") {
        energy_to_image(&calculate_energy(&grid))
            .save(output)
            .with_context(|_| format!("could not write {}", output))?;
        return Ok(());
    }

    let vertical = seams(&matches, Orientation::Vertical, "columns", "width", width)?;
    let horizontal = seams(&matches, Orientation::Horizontal, "rows", "height", height)?;
    let tie_break = if matches.is_present("tie-break") {
        value_t!(matches, "tie-break", TieBreak)?
    } else {
        TieBreak::default()
    };

    let mut carver = SeamCarver::new(grid).with_tie_break(tie_break);
    info!("carving with {:?} tie-breaks", carver.tie_break());
    carver.reduce(vertical, horizontal)?;
    let (width, height) = carver.dimensions();
    carver
        .into_grid()
        .to_image()
        .save(output)
        .with_context(|_| format!("could not write {}", output))?;
    info!("wrote {}x{} image to {}", width, height, output);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("seamcarve: {}", err);
        for cause in err.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}
