use std::error::Error;
use std::fmt;

/// Represents errors that can occur while configuring or running a simulation.
#[derive(Debug)]
pub enum SimError {
    /// Indicates an invalid mass value (e.g., negative or zero mass).
    InvalidMass,
    /// Indicates an invalid timestep (zero, negative, or non-finite).
    InvalidTimestep,
    /// Indicates an invalid SPH smoothing length.
    InvalidSmoothingLength,
    /// Indicates an invalid tree opening angle.
    InvalidOpeningAngle,
    /// Indicates an invalid neighbor count for the kNN density estimator.
    InvalidNeighborCount,
    /// A general error for calculations that produce invalid results.
    CalculationError(String),
    /// An I/O failure while reading or writing snapshot/reference files.
    Io(std::io::Error),
    /// A snapshot or reference row that could not be parsed.
    MalformedRecord(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::InvalidMass => write!(f, "Invalid mass value"),
            SimError::InvalidTimestep => write!(f, "Invalid timestep"),
            SimError::InvalidSmoothingLength => write!(f, "Invalid smoothing length"),
            SimError::InvalidOpeningAngle => write!(f, "Invalid opening angle"),
            SimError::InvalidNeighborCount => write!(f, "Invalid neighbor count"),
            SimError::CalculationError(msg) => write!(f, "Calculation error: {}", msg),
            SimError::Io(err) => write!(f, "I/O error: {}", err),
            SimError::MalformedRecord(line) => write!(f, "Malformed record: {}", line),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Io(err)
    }
}
