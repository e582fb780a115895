use std::fs;
use std::path::PathBuf;

use crate::particles::{ParticleStore, Star, StarRegistry};
use crate::snapshots::{read_snapshot, write_snapshot, write_star_registry};
use crate::utils::SimError;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rs_starform_{}_{}", std::process::id(), name))
}

fn sample_store() -> ParticleStore {
    let mut store = ParticleStore::new(4);
    for i in 0..4 {
        store.x[i] = i as f64 * 0.123;
        store.y[i] = -(i as f64) * 1.5;
        store.z[i] = 0.25 + i as f64;
        store.vx[i] = i as f64 * 0.01;
        store.vy[i] = 0.5;
        store.vz[i] = -0.125 * i as f64;
        store.temperature[i] = 1.0 + i as f64 * 0.1;
        store.density[i] = 2.0 + i as f64;
        store.pressure[i] = store.density[i] * store.temperature[i];
    }
    store.is_star[2] = true;
    store
}

#[test]
fn test_round_trip_preserves_fields_within_precision() {
    let store = sample_store();
    let path = temp_path("roundtrip.csv");
    write_snapshot(&store, &path).expect("write failed");

    let rows = read_snapshot(&path).expect("read failed");
    assert_eq!(rows.len(), 4);
    for (i, row) in rows.iter().enumerate() {
        assert!((row.x - store.x[i]).abs() < 1.0e-4);
        assert!((row.y - store.y[i]).abs() < 1.0e-4);
        assert!((row.z - store.z[i]).abs() < 1.0e-4);
        assert!((row.vx - store.vx[i]).abs() < 1.0e-4);
        assert!((row.vy - store.vy[i]).abs() < 1.0e-4);
        assert!((row.vz - store.vz[i]).abs() < 1.0e-4);
        assert!((row.temperature - store.temperature[i]).abs() < 1.0e-4);
        assert!((row.density - store.density[i]).abs() < 1.0e-4);
        assert!((row.pressure - store.pressure[i]).abs() < 1.0e-4);
        assert_eq!(row.is_star, store.is_star[i]);
    }
    fs::remove_file(&path).ok();
}

#[test]
fn test_dead_particles_are_not_written() {
    let mut store = sample_store();
    store.kill(1);
    store.kill(3);
    let path = temp_path("dead.csv");
    write_snapshot(&store, &path).expect("write failed");

    let rows = read_snapshot(&path).expect("read failed");
    assert_eq!(rows.len(), 2);
    fs::remove_file(&path).ok();
}

#[test]
fn test_missing_file_reports_io_error() {
    let path = temp_path("does_not_exist.csv");
    match read_snapshot(&path) {
        Err(SimError::Io(_)) => {}
        other => panic!("expected Io error, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn test_malformed_row_is_rejected() {
    let path = temp_path("malformed.csv");
    fs::write(&path, "x,y,z,vx,vy,vz,temperature,density,pressure,is_star\n1,2,3\n").unwrap();
    match read_snapshot(&path) {
        Err(SimError::MalformedRecord(_)) => {}
        other => panic!("expected MalformedRecord, got {:?}", other.map(|r| r.len())),
    }
    fs::remove_file(&path).ok();
}

#[test]
fn test_star_registry_export() {
    let mut registry = StarRegistry::new();
    registry.push(Star::new(5.5, (1.0, 2.0, 3.0), (0.1, 0.2, 0.3), 7.0));
    registry.push(Star::new(2.25, (-1.0, 0.0, 0.5), (0.0, 0.0, 0.0), 9.5));

    let path = temp_path("stars.csv");
    write_star_registry(&registry, &path).expect("write failed");

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "mass,x,y,z,vx,vy,vz,formation_time");
    assert!(lines[1].starts_with("5.50000,1.00000,"));
    assert!(lines[2].ends_with("9.50000"));
    fs::remove_file(&path).ok();
}
