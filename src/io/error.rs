//! Error types for grid generation and tile-set persistence

use std::fmt;
use std::path::PathBuf;

/// Main error type for all grid operations
#[derive(Debug)]
pub enum GridError {
    /// Parameter validation failed before any work was done
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A tile name does not follow the `GRID<digits>` convention
    InvalidTileName {
        /// The offending name
        name: String,
    },

    /// Two tiles in a strictly constructed set share a name
    DuplicateTileName {
        /// The repeated name
        name: String,
    },

    /// A GeoJSON feature could not be interpreted as a tile or area of interest
    InvalidGeometry {
        /// Feature position or name, for locating the problem in the input
        feature: String,
        /// Description of what's wrong with the geometry
        reason: String,
    },

    /// GeoJSON could not be encoded or decoded
    Serialization {
        /// File being read or written
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileName { name } => {
                write!(f, "Invalid tile name '{name}': expected GRID followed by digits")
            }
            Self::DuplicateTileName { name } => {
                write!(f, "Tile name '{name}' appears more than once")
            }
            Self::InvalidGeometry { feature, reason } => {
                write!(f, "Invalid geometry in feature {feature}: {reason}")
            }
            Self::Serialization { path, source } => {
                write!(f, "Malformed GeoJSON in '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for grid results
pub type Result<T> = std::result::Result<T, GridError>;

/// Attaches a path and operation to raw I/O failures
pub trait WithPath<T> {
    /// Wrap an I/O error with the path and operation it occurred on
    ///
    /// # Errors
    ///
    /// Propagates the original error as [`GridError::FileSystem`]
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.map_err(|source| GridError::FileSystem {
            path: path.into(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GridError {
    GridError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> GridError {
    GridError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create an invalid geometry error
pub fn invalid_geometry(feature: &impl ToString, reason: &impl ToString) -> GridError {
    GridError::InvalidGeometry {
        feature: feature.to_string(),
        reason: reason.to_string(),
    }
}
