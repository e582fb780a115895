//! CSV snapshot export and re-import.
//!
//! One file per timestep, one row per alive particle, fixed five-decimal
//! precision. The reader exists so analysis tooling (and the round-trip
//! tests) can consume the files without guessing the format.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::particles::{ParticleStore, StarRegistry};
use crate::utils::SimError;

pub const SNAPSHOT_HEADER: &str = "x,y,z,vx,vy,vz,temperature,density,pressure,is_star";
pub const STAR_EXPORT_HEADER: &str = "mass,x,y,z,vx,vy,vz,formation_time";

/// One parsed snapshot row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRow {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
    pub temperature: f64,
    pub density: f64,
    pub pressure: f64,
    pub is_star: bool,
}

/// Writes the alive particles of a store to a CSV snapshot file.
///
/// Dead slots are skipped entirely; the format records observable state
/// only, not the internal slot layout.
pub fn write_snapshot(store: &ParticleStore, path: &Path) -> Result<(), SimError> {
    store.assert_coherent();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", SNAPSHOT_HEADER)?;
    for i in 0..store.len() {
        if !store.alive[i] {
            continue;
        }
        writeln!(
            writer,
            "{:.5},{:.5},{:.5},{:.5},{:.5},{:.5},{:.5},{:.5},{:.5},{}",
            store.x[i],
            store.y[i],
            store.z[i],
            store.vx[i],
            store.vy[i],
            store.vz[i],
            store.temperature[i],
            store.density[i],
            store.pressure[i],
            if store.is_star[i] { 1 } else { 0 },
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a snapshot file back into rows.
///
/// The header line is skipped; any row that does not parse into ten fields
/// aborts the read with a [`SimError::MalformedRecord`].
pub fn read_snapshot(path: &Path) -> Result<Vec<SnapshotRow>, SimError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut rows = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line_no == 0 || line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 10 {
            return Err(SimError::MalformedRecord(line));
        }
        let parse = |s: &str| -> Result<f64, SimError> {
            s.trim()
                .parse::<f64>()
                .map_err(|_| SimError::MalformedRecord(line.clone()))
        };
        rows.push(SnapshotRow {
            x: parse(fields[0])?,
            y: parse(fields[1])?,
            z: parse(fields[2])?,
            vx: parse(fields[3])?,
            vy: parse(fields[4])?,
            vz: parse(fields[5])?,
            temperature: parse(fields[6])?,
            density: parse(fields[7])?,
            pressure: parse(fields[8])?,
            is_star: fields[9].trim() == "1",
        });
    }
    Ok(rows)
}

/// Exports every star formed so far, one row per star.
pub fn write_star_registry(registry: &StarRegistry, path: &Path) -> Result<(), SimError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", STAR_EXPORT_HEADER)?;
    for star in registry.stars() {
        writeln!(
            writer,
            "{:.5},{:.5},{:.5},{:.5},{:.5},{:.5},{:.5},{:.5}",
            star.mass, star.x, star.y, star.z, star.vx, star.vy, star.vz, star.formation_time,
        )?;
    }
    writer.flush()?;
    Ok(())
}
