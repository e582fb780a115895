mod snapshot;

pub use snapshot::*;

#[cfg(test)]
mod snapshot_tests;
