mod kernels;
mod density;
mod pressure;

pub use kernels::*;
pub use density::*;
pub use pressure::*;

#[cfg(test)]
mod kernels_tests;
#[cfg(test)]
mod density_tests;
