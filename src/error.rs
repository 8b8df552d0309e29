//! Error module for the visual stimulus library.
use std::error::Error;
use std::fmt;

use crate::{ELECTRODE_WINDOW, NUM_SAMPLES};

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum StimError {
    /// Error for a subject id absent from the store.
    NotFound(usize),
    /// Error for an index outside its valid domain, e.g., repetition or electrode number.
    OutOfRange(String),
    /// Error for a required metadata attribute missing at construction.
    MissingAttribute(String),
    /// Error for two subjects sharing the same id.
    DuplicateSubject(usize),
    /// Error for a voltage array or label vector with an unexpected shape.
    IncompatibleShape(String),
    /// Error for invalid parameters
    InvalidParameter(String),
    /// Error while rendering a figure.
    PlotError(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for StimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StimError::NotFound(id) => write!(f, "Subject {} not found in the store", id),
            StimError::OutOfRange(e) => write!(f, "Index out of range: {}", e),
            StimError::MissingAttribute(key) => {
                write!(f, "Missing required attribute: {}", key)
            }
            StimError::DuplicateSubject(id) => write!(f, "Subject {} is defined twice", id),
            StimError::IncompatibleShape(e) => write!(
                f,
                "Incompatible shape (expected {} samples in windows of {}): {}",
                NUM_SAMPLES, ELECTRODE_WINDOW, e
            ),
            StimError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            StimError::PlotError(e) => write!(f, "Plotting error: {}", e),
            StimError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for StimError {}

impl From<std::io::Error> for StimError {
    fn from(e: std::io::Error) -> Self {
        StimError::IOError(e.to_string())
    }
}
